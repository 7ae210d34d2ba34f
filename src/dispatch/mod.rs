// SPDX-License-Identifier: MPL-2.0
//! The caller-facing entry point.
//!
//! [`Notifier`] accepts every supported call shape, merges options over the
//! notifier-wide defaults and forwards a single canonical request to the
//! toast [`Manager`]. It owns no toast state of its own.

pub mod call;
pub mod fragment;
pub mod global;

pub use call::{Call, Invocation, ToastRequest};
pub use fragment::{Flash, Location, StaticLocation};

use crate::config::{Options, OptionsOverride};
use crate::dom::Surface;
use crate::ui::notifications::{Manager, Severity, ToastHandle, ToastMessage};
use serde_json::Value;
use std::time::Duration;

/// Dispatches notification requests to a toast manager.
#[derive(Debug)]
pub struct Notifier<S: Surface> {
    manager: Manager<S>,
    /// Built-in defaults merged with site configuration.
    base: Options,
    /// Notifier-wide overrides applied to every call.
    overrides: OptionsOverride,
    page_ready_handled: bool,
}

impl<S: Surface> Notifier<S> {
    /// Creates a notifier with the built-in defaults.
    pub fn new(surface: S) -> Self {
        Self::with_options(surface, Options::default())
    }

    /// Creates a notifier whose calls merge over `base`.
    pub fn with_options(surface: S, base: Options) -> Self {
        Self {
            manager: Manager::new(surface),
            base,
            overrides: OptionsOverride::default(),
            page_ready_handled: false,
        }
    }

    /// Notifier-wide overrides, applied before per-call options.
    pub fn options_mut(&mut self) -> &mut OptionsOverride {
        &mut self.overrides
    }

    /// The options a call with no overrides would use.
    #[must_use]
    pub fn effective_options(&self) -> Options {
        self.base.merged(&self.overrides)
    }

    /// Shows a notification for any supported call shape.
    pub fn notify(&mut self, call: Call) -> Option<ToastHandle> {
        let invocation = call.resolve()?;
        self.show(invocation)
    }

    /// Shows a notification from a loosely-typed argument list, such as
    /// values forwarded from a scripting bridge.
    pub fn notify_args(&mut self, args: &[Value]) -> Option<ToastHandle> {
        Call::from_args(args).and_then(|call| self.notify(call))
    }

    pub fn success(
        &mut self,
        message: &str,
        title: Option<&str>,
        options: Option<&OptionsOverride>,
    ) -> Option<ToastHandle> {
        self.shortcut(Severity::Success, message, title, options)
    }

    pub fn error(
        &mut self,
        message: &str,
        title: Option<&str>,
        options: Option<&OptionsOverride>,
    ) -> Option<ToastHandle> {
        self.shortcut(Severity::Error, message, title, options)
    }

    pub fn warning(
        &mut self,
        message: &str,
        title: Option<&str>,
        options: Option<&OptionsOverride>,
    ) -> Option<ToastHandle> {
        self.shortcut(Severity::Warning, message, title, options)
    }

    pub fn info(
        &mut self,
        message: &str,
        title: Option<&str>,
        options: Option<&OptionsOverride>,
    ) -> Option<ToastHandle> {
        self.shortcut(Severity::Info, message, title, options)
    }

    fn shortcut(
        &mut self,
        severity: Severity,
        message: &str,
        title: Option<&str>,
        options: Option<&OptionsOverride>,
    ) -> Option<ToastHandle> {
        self.show(Invocation {
            severity,
            message: message.to_string(),
            title: title.map(str::to_string),
            options: options.cloned().unwrap_or_default(),
        })
    }

    fn show(&mut self, invocation: Invocation) -> Option<ToastHandle> {
        let options = self
            .base
            .merged(&self.overrides)
            .merged(&invocation.options);
        self.manager.create_toast(
            &invocation.message,
            invocation.title.as_deref(),
            &invocation.severity,
            &options,
        )
    }

    /// Removes every toast and the container immediately.
    pub fn clear(&mut self) {
        self.manager.clear();
    }

    /// Same as [`Notifier::clear`].
    pub fn close_all(&mut self) {
        self.clear();
    }

    /// Starts hiding one toast. `None` and removed toasts are ignored.
    pub fn remove(&mut self, handle: Option<&ToastHandle>) {
        self.manager.remove_toast(handle);
    }

    pub fn tick(&mut self, now: Duration) {
        self.manager.tick(now);
    }

    pub fn advance(&mut self, delta: Duration) {
        self.manager.advance(delta);
    }

    pub fn handle_message(&mut self, message: &ToastMessage) {
        self.manager.handle_message(message);
    }

    /// Page-ready hook: shows the flash message carried in the location
    /// fragment, if any, and strips it from the address.
    ///
    /// Runs at most once per notifier. Decoding failures are logged and
    /// swallowed.
    pub fn on_page_ready<L: Location + ?Sized>(&mut self, location: &mut L) -> Option<ToastHandle> {
        if self.page_ready_handled {
            return None;
        }
        self.page_ready_handled = true;

        let hash = location.hash();
        if hash.is_empty() {
            return None;
        }

        match fragment::parse(&hash) {
            Ok(Some(flash)) => {
                let handle = self.notify(Call::typed(flash.kind, flash.message));
                let url = format!("{}{}", location.pathname(), location.search());
                let title = location.title();
                location.replace_state(&title, &url);
                handle
            }
            Ok(None) => None,
            Err(err) => {
                tracing::error!(%err, "Error processing notification from URL");
                None
            }
        }
    }

    pub fn manager(&self) -> &Manager<S> {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut Manager<S> {
        &mut self.manager
    }
}
