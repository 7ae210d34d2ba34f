// SPDX-License-Identifier: MPL-2.0
//! Markup for individual toasts and their container.
//!
//! Everything caller-supplied goes through [`escape_html`] before it is
//! placed in markup.

use super::notification::Severity;
use crate::config::Options;
use crate::dom::{escape_html, NodeId, Surface};

pub const TITLE_CLASS: &str = "toast-title";
pub const MESSAGE_CLASS: &str = "toast-message";
pub const CLOSE_BUTTON_CLASS: &str = "toast-close-button";
pub const PROGRESS_CLASS: &str = "toast-progress";

/// Length of the random suffix in generated element ids.
const ELEMENT_ID_SUFFIX_LEN: usize = 9;

/// Stateless rendering helpers.
pub struct ToastView;

impl ToastView {
    /// Generates a fresh element id of the form `toast-xxxxxxxxx`.
    #[must_use]
    pub fn element_id() -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("toast-{}", &suffix[..ELEMENT_ID_SUFFIX_LEN])
    }

    /// Class list of a toast element, e.g. `toast toast-success`.
    #[must_use]
    pub fn class_name(options: &Options, severity: &Severity) -> String {
        format!("{} {}", options.toast_class, severity.class_name())
    }

    /// Inner markup: title, message and the optional close control.
    ///
    /// An empty title renders no title block.
    #[must_use]
    pub fn markup(title: Option<&str>, message: &str, options: &Options) -> String {
        let mut html = String::new();

        if let Some(title) = title.filter(|t| !t.is_empty()) {
            html.push_str(&format!(
                "<div class=\"{TITLE_CLASS}\">{}</div>",
                escape_html(title)
            ));
        }

        html.push_str(&format!(
            "<div class=\"{MESSAGE_CLASS}\">{}</div>",
            escape_html(message)
        ));

        if options.close_button {
            html.push_str(&format!(
                "<button type=\"button\" class=\"{CLOSE_BUTTON_CLASS}\">&times;</button>"
            ));
        }

        html
    }

    /// Builds a detached toast element with its markup and, when enabled,
    /// a progress bar child. Returns the toast and progress nodes.
    pub fn build<S: Surface + ?Sized>(
        surface: &mut S,
        element_id: &str,
        severity: &Severity,
        message: &str,
        title: Option<&str>,
        options: &Options,
    ) -> (NodeId, Option<NodeId>) {
        let node = surface.create_element("div");
        surface.set_attribute(node, "id", element_id);
        surface.set_class_name(node, &Self::class_name(options, severity));
        surface.set_attribute(node, "role", "alert");
        surface.set_attribute(node, "aria-live", "assertive");
        surface.set_inner_html(node, &Self::markup(title, message, options));

        let progress = options.progress_bar.then(|| {
            let bar = surface.create_element("div");
            surface.set_class_name(bar, PROGRESS_CLASS);
            surface.append_child(node, bar);
            bar
        });

        (node, progress)
    }

    /// Builds the detached container element.
    pub fn build_container<S: Surface + ?Sized>(surface: &mut S, options: &Options) -> NodeId {
        let container = surface.create_element("div");
        surface.set_attribute(container, "id", &options.container_id);
        surface.set_class_name(container, options.position.class_name());
        surface.set_attribute(container, "aria-live", "polite");
        surface.set_attribute(container, "role", "alert");
        container
    }

    /// Inline style for a progress bar with `fraction` of its time left.
    #[must_use]
    pub fn progress_style(fraction: f64) -> String {
        format!("width: {:.0}%", (fraction * 100.0).clamp(0.0, 100.0))
    }
}
