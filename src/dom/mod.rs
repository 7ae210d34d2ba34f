// SPDX-License-Identifier: MPL-2.0
//! Minimal rendering-surface abstraction.
//!
//! The toast lifecycle only needs a handful of DOM capabilities: create an
//! element, set attributes and classes, insert it first or last under a
//! parent, and detach it again. [`Surface`] captures exactly that, so the
//! lifecycle logic runs unchanged against a browser binding or against the
//! in-memory [`MemorySurface`].

mod escape;
mod memory;

pub use escape::escape_html;
pub use memory::MemorySurface;

/// Opaque handle to an element owned by a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the raw index of this node in its surface.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Capabilities the toast manager needs from a document.
///
/// Mutating operations on a node that no longer exists, or that is not
/// attached where the call expects, must be silent no-ops.
pub trait Surface {
    /// The document body, the parent of the toast container.
    fn body(&self) -> NodeId;

    /// Creates a detached element.
    fn create_element(&mut self, tag: &str) -> NodeId;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Replaces the whole class list.
    fn set_class_name(&mut self, node: NodeId, class_name: &str);

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Replaces the children of `node` with pre-escaped markup.
    fn set_inner_html(&mut self, node: NodeId, html: &str);

    /// Inserts `child` as the last child of `parent`.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Inserts `child` before the current first child of `parent`.
    fn prepend_child(&mut self, parent: NodeId, child: NodeId);

    /// Detaches `node` from its parent.
    ///
    /// Returns `false` if it had no parent.
    fn detach(&mut self, node: NodeId) -> bool;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Number of element children of `node`.
    fn child_count(&self, node: NodeId) -> usize;

    /// Removes all children of `node`, including inner markup.
    fn clear_children(&mut self, node: NodeId);
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn body(&self) -> NodeId {
        (**self).body()
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        (**self).create_element(tag)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        (**self).set_attribute(node, name, value);
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        (**self).attribute(node, name)
    }

    fn set_class_name(&mut self, node: NodeId, class_name: &str) {
        (**self).set_class_name(node, class_name);
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        (**self).add_class(node, class);
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        (**self).remove_class(node, class);
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        (**self).set_inner_html(node, html);
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        (**self).append_child(parent, child);
    }

    fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        (**self).prepend_child(parent, child);
    }

    fn detach(&mut self, node: NodeId) -> bool {
        (**self).detach(node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        (**self).parent(node)
    }

    fn child_count(&self, node: NodeId) -> usize {
        (**self).child_count(node)
    }

    fn clear_children(&mut self, node: NodeId) {
        (**self).clear_children(node);
    }
}
