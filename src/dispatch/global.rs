// SPDX-License-Identifier: MPL-2.0
//! Process-wide notifier binding.
//!
//! Hosts that want a single ambient notifier (the classic global `toastr`)
//! install one per UI thread; everything else can own a [`Notifier`]
//! directly. Both behave identically.
//!
//! ```
//! use toast_notify::dispatch::global;
//! use toast_notify::dom::MemorySurface;
//!
//! global::install_surface(MemorySurface::new());
//! assert!(global::success("Saved", None, None).is_some());
//! global::clear();
//! ```

use super::{Call, Location, Notifier};
use crate::config::OptionsOverride;
use crate::dom::Surface;
use crate::ui::notifications::{ToastHandle, ToastMessage};
use serde_json::Value;
use std::cell::RefCell;

/// A notifier over a type-erased surface.
pub type GlobalNotifier = Notifier<Box<dyn Surface>>;

thread_local! {
    static GLOBAL: RefCell<Option<GlobalNotifier>> = const { RefCell::new(None) };
}

/// Installs `notifier` for this thread, returning the previous one.
pub fn install(notifier: GlobalNotifier) -> Option<GlobalNotifier> {
    GLOBAL.with(|cell| cell.borrow_mut().replace(notifier))
}

/// Installs a default notifier rendering into `surface`.
pub fn install_surface(surface: impl Surface + 'static) -> Option<GlobalNotifier> {
    let surface: Box<dyn Surface> = Box::new(surface);
    install(Notifier::new(surface))
}

/// Removes and returns this thread's notifier.
pub fn uninstall() -> Option<GlobalNotifier> {
    GLOBAL.with(|cell| cell.borrow_mut().take())
}

#[must_use]
pub fn is_installed() -> bool {
    GLOBAL.with(|cell| cell.try_borrow().map(|n| n.is_some()).unwrap_or(true))
}

/// Runs `f` against the installed notifier.
///
/// Returns `None` if nothing is installed or the notifier is already in
/// use further up the stack.
pub fn with<R>(f: impl FnOnce(&mut GlobalNotifier) -> R) -> Option<R> {
    GLOBAL.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            tracing::warn!("global notifier is busy, dropping re-entrant call");
            return None;
        };
        slot.as_mut().map(f)
    })
}

pub fn notify(call: Call) -> Option<ToastHandle> {
    with(|n| n.notify(call)).flatten()
}

pub fn notify_args(args: &[Value]) -> Option<ToastHandle> {
    with(|n| n.notify_args(args)).flatten()
}

pub fn success(
    message: &str,
    title: Option<&str>,
    options: Option<&OptionsOverride>,
) -> Option<ToastHandle> {
    with(|n| n.success(message, title, options)).flatten()
}

pub fn error(
    message: &str,
    title: Option<&str>,
    options: Option<&OptionsOverride>,
) -> Option<ToastHandle> {
    with(|n| n.error(message, title, options)).flatten()
}

pub fn warning(
    message: &str,
    title: Option<&str>,
    options: Option<&OptionsOverride>,
) -> Option<ToastHandle> {
    with(|n| n.warning(message, title, options)).flatten()
}

pub fn info(
    message: &str,
    title: Option<&str>,
    options: Option<&OptionsOverride>,
) -> Option<ToastHandle> {
    with(|n| n.info(message, title, options)).flatten()
}

pub fn clear() {
    with(Notifier::clear);
}

pub fn close_all() {
    clear();
}

pub fn remove(handle: Option<&ToastHandle>) {
    with(|n| n.remove(handle));
}

/// Routes a toast message. Click callbacks run after the notifier is
/// released, so they may call back into this module.
pub fn handle_message(message: &ToastMessage) {
    if let ToastMessage::Clicked { id, target } = *message {
        let handler = with(|n| n.manager_mut().click(id, target)).flatten();
        if let Some(handler) = handler {
            handler.call();
        }
        return;
    }
    with(|n| n.handle_message(message));
}

pub fn on_page_ready<L: Location + ?Sized>(location: &mut L) -> Option<ToastHandle> {
    with(|n| n.on_page_ready(location)).flatten()
}
