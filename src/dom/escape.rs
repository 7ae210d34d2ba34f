// SPDX-License-Identifier: MPL-2.0
//! HTML escaping for untrusted text inserted as markup.

use serde_json::Value;

/// Escapes `&`, `<`, `>`, `"` and `'` so `unsafe_text` renders literally.
#[must_use]
pub fn escape_html(unsafe_text: &str) -> String {
    let mut out = String::with_capacity(unsafe_text.len());
    for ch in unsafe_text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Escapes a loosely-typed value. Anything but a string yields `""`.
///
/// Rendering paths take `&str` and call [`escape_html`] directly; this is
/// the same rule for values that have not been coerced yet.
#[cfg_attr(not(test), allow(dead_code))]
#[must_use]
pub(crate) fn escape_value(value: &Value) -> String {
    value.as_str().map(escape_html).unwrap_or_default()
}
