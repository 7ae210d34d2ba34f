// SPDX-License-Identifier: MPL-2.0
//! Toast notification system.
//!
//! Toasts are small, transient elements stacked in a single container.
//! Each one fades in, stays for its configured time, fades out and is
//! detached; the container disappears with the last toast.
//!
//! # Components
//!
//! - [`notification`] - Core `Toast` record, `Severity` and `ToastHandle`
//! - [`manager`] - `Manager` for container and toast lifecycle
//! - [`toast`] - Markup and element construction for toasts
//! - [`timer`] - Single-shot timer queue driving transitions
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use toast_notify::config::Options;
//! use toast_notify::dom::MemorySurface;
//! use toast_notify::ui::notifications::{Manager, Severity};
//!
//! let mut manager = Manager::new(MemorySurface::new());
//! let handle = manager
//!     .create_toast("Image saved", None, &Severity::Success, &Options::default())
//!     .expect("not a duplicate");
//!
//! // Drive the clock from the host event loop.
//! manager.advance(Duration::from_millis(10));
//! assert!(manager.surface().has_class(handle.node(), "show"));
//! ```

pub mod manager;
pub mod notification;
pub mod timer;
pub mod toast;

pub use manager::{ClickTarget, Manager, Message as ToastMessage};
pub use notification::{Phase, Severity, Toast, ToastHandle, ToastId};
pub use toast::ToastView;
