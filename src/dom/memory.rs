// SPDX-License-Identifier: MPL-2.0
//! In-memory document used by tests, benchmarks and the headless driver.
//!
//! Elements live in an arena and are never freed: a detached element keeps
//! its id, attributes and markup, like a DOM node that is still referenced.

use super::{escape_html, NodeId, Surface};
use std::fmt::Write as _;

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    /// Attributes other than `class`, in insertion order.
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    inner_html: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            classes: Vec::new(),
            inner_html: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Arena-backed [`Surface`] with inspection helpers.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    elements: Vec<Element>,
    body: NodeId,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    /// Creates a document holding only an empty `<body>`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: vec![Element::new("body")],
            body: NodeId(0),
        }
    }

    fn get(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.0)
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(node.0)
    }

    /// Finds an element attached under the body by its `id` attribute.
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut stack = vec![self.body];
        while let Some(node) = stack.pop() {
            let element = &self.elements[node.0];
            if element
                .attributes
                .iter()
                .any(|(name, value)| name == "id" && value == id)
            {
                return Some(node);
            }
            stack.extend(element.children.iter().rev().copied());
        }
        None
    }

    /// Element children of `node`, in document order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.get(node).map(|e| e.children.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    /// Space-separated class list.
    #[must_use]
    pub fn class_name(&self, node: NodeId) -> String {
        self.get(node).map(|e| e.classes.join(" ")).unwrap_or_default()
    }

    /// Markup set through [`Surface::set_inner_html`].
    #[must_use]
    pub fn inner_html(&self, node: NodeId) -> &str {
        self.get(node).map_or("", |e| e.inner_html.as_str())
    }

    /// Returns whether `node` is reachable from the body.
    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == self.body {
                return true;
            }
            current = self.get(n).and_then(|e| e.parent);
        }
        false
    }

    /// Serializes `node` and its subtree.
    #[must_use]
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(element) = self.get(node) else {
            return;
        };
        let _ = write!(out, "<{}", element.tag);
        if let Some((_, id)) = element.attributes.iter().find(|(name, _)| name == "id") {
            let _ = write!(out, " id=\"{}\"", escape_html(id));
        }
        if !element.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_html(&element.classes.join(" ")));
        }
        for (name, value) in element.attributes.iter().filter(|(name, _)| name != "id") {
            let _ = write!(out, " {name}=\"{}\"", escape_html(value));
        }
        out.push('>');
        out.push_str(&element.inner_html);
        for child in &element.children {
            self.write_html(*child, out);
        }
        let _ = write!(out, "</{}>", element.tag);
    }

    fn unlink(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.get(node).and_then(|e| e.parent) else {
            return false;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|c| *c != node);
        }
        if let Some(e) = self.get_mut(node) {
            e.parent = None;
        }
        true
    }
}

impl Surface for MemorySurface {
    fn body(&self) -> NodeId {
        self.body
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.elements.push(Element::new(tag));
        NodeId(self.elements.len() - 1)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if name == "class" {
            self.set_class_name(node, value);
            return;
        }
        let Some(element) = self.get_mut(node) else {
            return;
        };
        match element.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => element
                .attributes
                .push((name.to_string(), value.to_string())),
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let element = self.get(node)?;
        if name == "class" {
            return Some(element.classes.join(" "));
        }
        element
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn set_class_name(&mut self, node: NodeId, class_name: &str) {
        if let Some(element) = self.get_mut(node) {
            element.classes = class_name.split_whitespace().map(str::to_string).collect();
        }
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.get_mut(node) {
            if !element.classes.iter().any(|c| c == class) {
                element.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.get_mut(node) {
            element.classes.retain(|c| c != class);
        }
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        self.clear_children(node);
        if let Some(element) = self.get_mut(node) {
            element.inner_html = html.to_string();
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        self.unlink(child);
        self.elements[parent.0].children.push(child);
        self.elements[child.0].parent = Some(parent);
    }

    fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        self.unlink(child);
        self.elements[parent.0].children.insert(0, child);
        self.elements[child.0].parent = Some(parent);
    }

    fn detach(&mut self, node: NodeId) -> bool {
        self.unlink(node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|e| e.parent)
    }

    fn child_count(&self, node: NodeId) -> usize {
        self.get(node).map_or(0, |e| e.children.len())
    }

    fn clear_children(&mut self, node: NodeId) {
        let children = self.children(node);
        for child in children {
            self.unlink(child);
        }
        if let Some(element) = self.get_mut(node) {
            element.inner_html.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attached_div(surface: &mut MemorySurface, id: &str) -> NodeId {
        let node = surface.create_element("div");
        surface.set_attribute(node, "id", id);
        let body = surface.body();
        surface.append_child(body, node);
        node
    }

    #[test]
    fn new_surface_has_empty_body() {
        let surface = MemorySurface::new();
        assert_eq!(surface.child_count(surface.body()), 0);
        assert_eq!(surface.outer_html(surface.body()), "<body></body>");
    }

    #[test]
    fn append_and_prepend_control_order() {
        let mut surface = MemorySurface::new();
        let parent = attached_div(&mut surface, "parent");
        let a = surface.create_element("p");
        let b = surface.create_element("p");
        let c = surface.create_element("p");

        surface.append_child(parent, a);
        surface.append_child(parent, b);
        surface.prepend_child(parent, c);

        assert_eq!(surface.children(parent), vec![c, a, b]);
        assert_eq!(surface.parent(a), Some(parent));
    }

    #[test]
    fn detach_is_idempotent() {
        let mut surface = MemorySurface::new();
        let node = attached_div(&mut surface, "x");

        assert!(surface.detach(node));
        assert!(!surface.detach(node));
        assert!(!surface.is_attached(node));
        assert_eq!(surface.child_count(surface.body()), 0);
    }

    #[test]
    fn element_by_id_only_finds_attached_nodes() {
        let mut surface = MemorySurface::new();
        let node = attached_div(&mut surface, "target");
        assert_eq!(surface.element_by_id("target"), Some(node));

        surface.detach(node);
        assert_eq!(surface.element_by_id("target"), None);
    }

    #[test]
    fn class_list_operations() {
        let mut surface = MemorySurface::new();
        let node = surface.create_element("div");
        surface.set_class_name(node, "toast  toast-info");
        surface.add_class(node, "show");
        surface.add_class(node, "show");
        assert_eq!(surface.class_name(node), "toast toast-info show");

        surface.remove_class(node, "show");
        assert!(!surface.has_class(node, "show"));
        assert_eq!(surface.attribute(node, "class").as_deref(), Some("toast toast-info"));
    }

    #[test]
    fn outer_html_serializes_subtree() {
        let mut surface = MemorySurface::new();
        let node = attached_div(&mut surface, "c");
        surface.set_class_name(node, "box");
        surface.set_attribute(node, "role", "alert");
        let child = surface.create_element("span");
        surface.set_inner_html(child, "hi &amp; bye");
        surface.append_child(node, child);

        assert_eq!(
            surface.outer_html(node),
            r#"<div id="c" class="box" role="alert"><span>hi &amp; bye</span></div>"#
        );
    }

    #[test]
    fn outer_html_escapes_attribute_values() {
        let mut surface = MemorySurface::new();
        let node = attached_div(&mut surface, "a\"b");
        surface.set_class_name(node, "x<y");
        surface.set_attribute(node, "title", "Tom & 'Jerry'");

        assert_eq!(
            surface.outer_html(node),
            r#"<div id="a&quot;b" class="x&lt;y" title="Tom &amp; &#039;Jerry&#039;"></div>"#
        );
    }

    #[test]
    fn clear_children_detaches_everything() {
        let mut surface = MemorySurface::new();
        let parent = attached_div(&mut surface, "p");
        let a = surface.create_element("p");
        surface.append_child(parent, a);
        surface.clear_children(parent);

        assert_eq!(surface.child_count(parent), 0);
        assert_eq!(surface.parent(a), None);
    }

    #[test]
    fn operations_on_unknown_nodes_are_ignored() {
        let mut surface = MemorySurface::new();
        let ghost = NodeId(99);
        surface.add_class(ghost, "x");
        surface.set_attribute(ghost, "id", "x");
        surface.append_child(surface.body(), ghost);
        assert!(!surface.detach(ghost));
        assert_eq!(surface.child_count(surface.body()), 0);
    }
}
