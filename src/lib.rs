// SPDX-License-Identifier: MPL-2.0
//! `toast_notify` renders transient "toast" notifications into a document.
//!
//! A [`dispatch::Notifier`] accepts several call shapes (type and message,
//! message only, a configuration object, or severity shortcuts) and hands a
//! single canonical request to the [`ui::notifications::Manager`], which owns
//! the shared container and drives each toast from creation to removal.
//! Rendering goes through the [`dom::Surface`] trait so the same lifecycle
//! runs against a browser binding or the in-memory [`dom::MemorySurface`].

#![doc(html_root_url = "https://docs.rs/toast_notify/0.1.0")]

pub mod config;
pub mod dispatch;
pub mod dom;
pub mod error;
pub mod ui;

pub use dispatch::{global, Call, Notifier};
pub use ui::notifications::{ClickTarget, Severity, ToastHandle, ToastMessage};
