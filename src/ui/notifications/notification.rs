// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `Toast` record owned by the manager, the
//! `Severity` enum and the `ToastHandle` given back to callers.

use crate::config::Options;
use crate::dom::NodeId;
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

/// Unique identifier for a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

/// Notification category, rendered as the `toast-<severity>` class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Severity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
    /// Caller-supplied category, stored lowercased with only
    /// `[a-z0-9_-]` kept so it is safe inside a class attribute.
    Custom(String),
}

impl Severity {
    /// Matches one of the four known severities, ignoring case.
    #[must_use]
    pub fn known(kind: &str) -> Option<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "success" => Some(Severity::Success),
            "error" => Some(Severity::Error),
            "warning" => Some(Severity::Warning),
            "info" => Some(Severity::Info),
            _ => None,
        }
    }

    /// Resolves a type name, falling back to `Info` for anything unknown.
    #[must_use]
    pub fn resolve(kind: &str) -> Self {
        Self::known(kind).unwrap_or(Severity::Info)
    }

    /// Like [`Severity::resolve`], but keeps unknown names as `Custom`.
    #[must_use]
    pub fn parse(kind: &str) -> Self {
        if let Some(known) = Self::known(kind) {
            return known;
        }
        let cleaned: String = kind
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        if cleaned.is_empty() {
            Severity::Info
        } else {
            Severity::Custom(cleaned)
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Custom(name) => name.as_str(),
        }
    }

    /// CSS class for this severity, e.g. `toast-error`.
    #[must_use]
    pub fn class_name(&self) -> Cow<'static, str> {
        match self {
            Severity::Success => Cow::Borrowed("toast-success"),
            Severity::Error => Cow::Borrowed("toast-error"),
            Severity::Warning => Cow::Borrowed("toast-warning"),
            Severity::Info => Cow::Borrowed("toast-info"),
            Severity::Custom(name) => Cow::Owned(format!("toast-{name}")),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a toast is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Inserted, waiting for the visible class.
    Entering,
    /// Visible class applied.
    Shown,
    /// Visible class removed, waiting to be detached.
    Leaving,
}

/// Caller-facing reference to a created toast.
///
/// Holding a handle does not keep the toast alive; once it is removed the
/// handle refers to a detached element and every operation on it is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastHandle {
    id: ToastId,
    node: NodeId,
    element_id: String,
}

impl ToastHandle {
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// The toast element on the surface.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The generated `id` attribute, `toast-xxxxxxxxx`.
    #[must_use]
    pub fn element_id(&self) -> &str {
        &self.element_id
    }
}

/// A toast owned by the manager.
#[derive(Debug, Clone)]
pub struct Toast {
    id: ToastId,
    element_id: String,
    node: NodeId,
    progress: Option<NodeId>,
    severity: Severity,
    message: String,
    title: Option<String>,
    options: Options,
    phase: Phase,
    created_at: Duration,
    /// Pending auto-dismiss deadline and the delay it was armed with.
    deadline: Option<(Duration, Duration)>,
    /// Bumped whenever the auto-dismiss timer is cancelled or re-armed so
    /// stale timers can recognise themselves.
    generation: u32,
}

impl Toast {
    pub(crate) fn new(
        node: NodeId,
        element_id: String,
        severity: Severity,
        message: &str,
        title: Option<&str>,
        options: Options,
        created_at: Duration,
    ) -> Self {
        Self {
            id: ToastId::new(),
            element_id,
            node,
            progress: None,
            severity,
            message: message.to_string(),
            title: title.map(str::to_string),
            options,
            phase: Phase::Entering,
            created_at,
            deadline: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The progress bar element, when the toast has one.
    #[must_use]
    pub fn progress_node(&self) -> Option<NodeId> {
        self.progress
    }

    #[must_use]
    pub fn severity(&self) -> &Severity {
        &self.severity
    }

    /// The unescaped message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The merged options snapshot this toast was created with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn created_at(&self) -> Duration {
        self.created_at
    }

    /// When the pending auto-dismiss fires, if one is armed.
    #[must_use]
    pub fn expires_at(&self) -> Option<Duration> {
        self.deadline.map(|(at, _)| at)
    }

    /// Fraction of the armed auto-dismiss delay still remaining, in `0..=1`.
    #[must_use]
    pub fn remaining_fraction(&self, now: Duration) -> Option<f64> {
        let (at, armed_for) = self.deadline?;
        if armed_for.is_zero() {
            return Some(0.0);
        }
        let remaining = at.saturating_sub(now);
        Some((remaining.as_secs_f64() / armed_for.as_secs_f64()).clamp(0.0, 1.0))
    }

    #[must_use]
    pub fn handle(&self) -> ToastHandle {
        ToastHandle {
            id: self.id,
            node: self.node,
            element_id: self.element_id.clone(),
        }
    }

    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }

    pub(crate) fn set_progress_node(&mut self, node: NodeId) {
        self.progress = Some(node);
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Arms the auto-dismiss deadline, invalidating any earlier one.
    pub(crate) fn arm(&mut self, now: Duration, delay: Duration) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = Some((now + delay, delay));
        self.generation
    }

    /// Cancels the pending auto-dismiss, if any.
    pub(crate) fn disarm(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(now: Duration) -> Toast {
        Toast::new(
            NodeId(1),
            "toast-abc".to_string(),
            Severity::Info,
            "hello",
            None,
            Options::default(),
            now,
        )
    }

    #[test]
    fn toast_ids_are_unique() {
        assert_ne!(ToastId::new(), ToastId::new());
    }

    #[test]
    fn resolve_is_case_insensitive_and_falls_back_to_info() {
        assert_eq!(Severity::resolve("SUCCESS"), Severity::Success);
        assert_eq!(Severity::resolve("Warning"), Severity::Warning);
        assert_eq!(Severity::resolve("error"), Severity::Error);
        assert_eq!(Severity::resolve("danger"), Severity::Info);
        assert_eq!(Severity::resolve(""), Severity::Info);
    }

    #[test]
    fn parse_keeps_custom_names_safe() {
        assert_eq!(Severity::parse("Info"), Severity::Info);
        assert_eq!(
            Severity::parse("Promo Code\"><x"),
            Severity::Custom("promocodex".to_string())
        );
        assert_eq!(Severity::parse("  \"<>"), Severity::Info);
    }

    #[test]
    fn class_names_are_prefixed() {
        assert_eq!(Severity::Success.class_name(), "toast-success");
        assert_eq!(Severity::Custom("promo".into()).class_name(), "toast-promo");
    }

    #[test]
    fn arming_bumps_generation() {
        let mut toast = sample(Duration::ZERO);
        let first = toast.arm(Duration::ZERO, Duration::from_millis(100));
        toast.disarm();
        assert_ne!(toast.generation(), first);
        assert!(toast.expires_at().is_none());
    }

    #[test]
    fn remaining_fraction_tracks_deadline() {
        let mut toast = sample(Duration::ZERO);
        assert!(toast.remaining_fraction(Duration::ZERO).is_none());

        toast.arm(Duration::ZERO, Duration::from_millis(1000));
        let half = toast
            .remaining_fraction(Duration::from_millis(500))
            .expect("armed");
        assert!((half - 0.5).abs() < 1e-9);
        assert_eq!(toast.remaining_fraction(Duration::from_millis(2000)), Some(0.0));
    }

    #[test]
    fn handle_mirrors_toast() {
        let toast = sample(Duration::ZERO);
        let handle = toast.handle();
        assert_eq!(handle.id(), toast.id());
        assert_eq!(handle.element_id(), "toast-abc");
        assert_eq!(handle.node(), NodeId(1));
    }
}
