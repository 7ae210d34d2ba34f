// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all toast options.
//!
//! This module serves as the single source of truth for the built-in
//! defaults that every per-call override is merged over.
//!
//! # Categories
//!
//! - **Markup**: CSS class names and element ids
//! - **Timing**: Auto-dismiss, extended and animation durations (milliseconds)
//! - **Behavior**: Ordering, dismissal and duplicate handling flags
//! - **Animation**: Easing and method names consumed by the stylesheet

// ==========================================================================
// Markup Defaults
// ==========================================================================

/// CSS class applied to every toast element.
pub const DEFAULT_TOAST_CLASS: &str = "toast";

/// Element id of the shared container.
pub const DEFAULT_CONTAINER_ID: &str = "toast-container";

/// CSS class applied to a toast once it is visible.
pub const SHOW_CLASS: &str = "show";

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Auto-dismiss delay. Zero keeps the toast until it is dismissed manually.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Auto-dismiss delay re-armed after the pointer leaves a toast.
pub const DEFAULT_EXTENDED_TIMEOUT_MS: u64 = 1000;

/// Duration of the show animation.
pub const DEFAULT_SHOW_DURATION_MS: u64 = 300;

/// Delay between hiding a toast and detaching it from the container.
pub const DEFAULT_HIDE_DURATION_MS: u64 = 1000;

/// Delay before the visible class is applied, so the starting style is
/// painted before the transition runs.
pub const SHOW_DELAY_MS: u64 = 10;

// ==========================================================================
// Behavior Defaults
// ==========================================================================

pub const DEFAULT_TAP_TO_DISMISS: bool = true;
pub const DEFAULT_CLOSE_BUTTON: bool = false;
pub const DEFAULT_DEBUG: bool = false;
pub const DEFAULT_NEWEST_ON_TOP: bool = true;
pub const DEFAULT_PROGRESS_BAR: bool = false;
pub const DEFAULT_PREVENT_DUPLICATES: bool = false;

// ==========================================================================
// Animation Defaults
// ==========================================================================

pub const DEFAULT_SHOW_EASING: &str = "swing";
pub const DEFAULT_HIDE_EASING: &str = "swing";
pub const DEFAULT_SHOW_METHOD: &str = "fadeIn";
pub const DEFAULT_HIDE_METHOD: &str = "fadeOut";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_delay_is_shorter_than_any_default_duration() {
        assert!(SHOW_DELAY_MS < DEFAULT_SHOW_DURATION_MS);
        assert!(SHOW_DELAY_MS < DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn extended_timeout_is_shorter_than_timeout() {
        assert!(DEFAULT_EXTENDED_TIMEOUT_MS < DEFAULT_TIMEOUT_MS);
    }
}
