// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! The `Manager` owns the shared container, every live toast and the timers
//! that move each toast through its lifecycle:
//!
//! ```text
//! create -> (10ms) shown -> (timeOut) leaving -> (hideDuration) detached
//!                       \-> dismissed early --/
//! ```
//!
//! The container is created lazily by the first toast and detached again as
//! soon as the last toast is detached. Every state change is idempotent, so
//! a timer that fires for a toast that is already gone does nothing.

use super::notification::{Phase, Severity, Toast, ToastHandle, ToastId};
use super::timer::{Task, TimerQueue};
use super::toast::ToastView;
use crate::config::{ClickHandler, Options, SHOW_CLASS, SHOW_DELAY_MS};
use crate::dom::{NodeId, Surface};
use std::time::Duration;

/// Part of a toast that received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Anywhere on the toast except the close control.
    Body,
    /// The close control. Treated as `Body` on toasts without one.
    CloseButton,
}

/// Messages for toast state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The host clock advanced to the given time.
    Tick(Duration),
    /// Dismiss a specific toast by ID.
    Dismiss(ToastId),
    /// The user clicked a toast.
    Clicked { id: ToastId, target: ClickTarget },
    /// The pointer entered a toast; its auto-dismiss is paused.
    MouseEnter(ToastId),
    /// The pointer left a toast; auto-dismiss is re-armed with the
    /// extended timeout.
    MouseLeave(ToastId),
}

/// Manages the container and the toasts rendered into it.
#[derive(Debug)]
pub struct Manager<S: Surface> {
    surface: S,
    /// The live container, if any toast is attached.
    container: Option<NodeId>,
    /// Live toasts in creation order.
    toasts: Vec<Toast>,
    timers: TimerQueue,
    /// Time elapsed since the manager was created.
    now: Duration,
    /// Message of the most recent creation attempt.
    previous_message: Option<String>,
}

impl<S: Surface> Manager<S> {
    /// Creates a manager rendering into `surface`, with its clock at zero.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            container: None,
            toasts: Vec::new(),
            timers: TimerQueue::new(),
            now: Duration::ZERO,
            previous_message: None,
        }
    }

    /// Creates a toast and schedules its lifecycle.
    ///
    /// Returns `None` without rendering anything when `prevent_duplicates`
    /// is set and `message` equals the previous message.
    pub fn create_toast(
        &mut self,
        message: &str,
        title: Option<&str>,
        severity: &Severity,
        options: &Options,
    ) -> Option<ToastHandle> {
        let duplicate = self.previous_message.as_deref() == Some(message);
        self.previous_message = Some(message.to_string());
        if options.prevent_duplicates && duplicate {
            log_event(options, "-", "suppressed duplicate");
            return None;
        }

        let container = self.ensure_container(options);
        let element_id = ToastView::element_id();
        let (node, progress) = ToastView::build(
            &mut self.surface,
            &element_id,
            severity,
            message,
            title,
            options,
        );

        if options.newest_on_top {
            self.surface.prepend_child(container, node);
        } else {
            self.surface.append_child(container, node);
        }

        let mut toast = Toast::new(
            node,
            element_id,
            severity.clone(),
            message,
            title,
            options.clone(),
            self.now,
        );
        if let Some(bar) = progress {
            toast.set_progress_node(bar);
        }

        self.timers.schedule(
            self.now + Duration::from_millis(SHOW_DELAY_MS),
            Task::Show(toast.id()),
        );

        if options.time_out > 0 {
            let delay = Duration::from_millis(options.time_out);
            let generation = toast.arm(self.now, delay);
            self.timers.schedule(
                self.now + delay,
                Task::Expire {
                    id: toast.id(),
                    generation,
                },
            );
        }

        tracing::debug!(
            toast = %toast.element_id(),
            severity = %severity,
            "toast created"
        );
        log_event(options, toast.element_id(), "created");

        let handle = toast.handle();
        self.toasts.push(toast);
        self.refresh_progress();
        Some(handle)
    }

    /// Starts hiding the toast behind `handle`. `None` and already removed
    /// toasts are ignored.
    pub fn remove_toast(&mut self, handle: Option<&ToastHandle>) {
        if let Some(handle) = handle {
            self.dismiss(handle.id());
        }
    }

    /// Starts hiding a toast by its ID.
    ///
    /// Returns `true` if the toast was live and is now leaving.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let now = self.now;
        let Some(toast) = self.toasts.iter_mut().find(|t| t.id() == id) else {
            return false;
        };
        if toast.phase() == Phase::Leaving {
            return false;
        }

        toast.set_phase(Phase::Leaving);
        toast.disarm();
        self.surface.remove_class(toast.node(), SHOW_CLASS);
        log_event(toast.options(), toast.element_id(), "hiding");

        let hide = Duration::from_millis(toast.options().hide_duration);
        self.timers.schedule(now + hide, Task::Detach(id));
        true
    }

    /// Synchronously removes every toast and the container.
    ///
    /// Pending timers are left queued; they find nothing to act on.
    pub fn clear(&mut self) {
        if let Some(container) = self.container.take() {
            self.surface.clear_children(container);
            self.surface.detach(container);
        }
        if !self.toasts.is_empty() {
            tracing::debug!(count = self.toasts.len(), "cleared toasts");
        }
        self.toasts.clear();
    }

    /// Advances the clock to `now`, running every timer due by then.
    ///
    /// Each timer runs with the clock set to its own due time. Times earlier
    /// than the current clock are ignored.
    pub fn tick(&mut self, now: Duration) {
        if now < self.now {
            return;
        }
        while let Some((due, task)) = self.timers.pop_due(now) {
            self.now = due;
            self.run(task);
        }
        self.now = now;
        self.refresh_progress();
    }

    /// Advances the clock by `delta`.
    pub fn advance(&mut self, delta: Duration) {
        self.tick(self.now + delta);
    }

    /// Runs timers until none are pending. Persistent toasts stay.
    pub fn run_until_idle(&mut self) {
        while let Some(due) = self.timers.next_due() {
            self.tick(due.max(self.now));
        }
    }

    /// Handles a toast message.
    ///
    /// Click callbacks run here and are not guarded: a panicking callback
    /// unwinds through the caller.
    pub fn handle_message(&mut self, message: &Message) {
        match *message {
            Message::Tick(now) => self.tick(now),
            Message::Dismiss(id) => {
                self.dismiss(id);
            }
            Message::Clicked { id, target } => {
                if let Some(handler) = self.click(id, target) {
                    handler.call();
                }
            }
            Message::MouseEnter(id) => self.pause(id),
            Message::MouseLeave(id) => self.resume(id),
        }
    }

    /// Applies the dismissal effects of a click and returns the callback
    /// the caller should invoke, if any.
    ///
    /// Splitting the callback out lets callers release borrows before
    /// running user code.
    pub fn click(&mut self, id: ToastId, target: ClickTarget) -> Option<ClickHandler> {
        let toast = self.toast(id)?;
        let options = toast.options();

        if target == ClickTarget::CloseButton && options.close_button {
            self.dismiss(id);
            return None;
        }

        let handler = options.on_click.clone();
        if options.tap_to_dismiss {
            self.dismiss(id);
        }
        handler
    }

    fn pause(&mut self, id: ToastId) {
        let Some(toast) = self.toasts.iter_mut().find(|t| t.id() == id) else {
            return;
        };
        if toast.phase() == Phase::Leaving || toast.expires_at().is_none() {
            return;
        }
        toast.disarm();
        log_event(toast.options(), toast.element_id(), "paused");
    }

    fn resume(&mut self, id: ToastId) {
        let now = self.now;
        let Some(toast) = self.toasts.iter_mut().find(|t| t.id() == id) else {
            return;
        };
        let options = toast.options();
        if toast.phase() == Phase::Leaving
            || toast.expires_at().is_some()
            || options.time_out == 0
            || options.extended_time_out == 0
        {
            return;
        }
        let delay = Duration::from_millis(options.extended_time_out);
        let generation = toast.arm(now, delay);
        log_event(toast.options(), toast.element_id(), "resumed");
        self.timers
            .schedule(now + delay, Task::Expire { id, generation });
        self.refresh_progress();
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::Show(id) => {
                let Some(toast) = self.toasts.iter_mut().find(|t| t.id() == id) else {
                    return;
                };
                if toast.phase() != Phase::Entering {
                    return;
                }
                toast.set_phase(Phase::Shown);
                self.surface.add_class(toast.node(), SHOW_CLASS);
                log_event(toast.options(), toast.element_id(), "shown");
            }
            Task::Expire { id, generation } => {
                let current = self
                    .toast(id)
                    .is_some_and(|t| t.generation() == generation);
                if current {
                    self.dismiss(id);
                }
            }
            Task::Detach(id) => self.detach(id),
        }
    }

    fn detach(&mut self, id: ToastId) {
        let Some(pos) = self.toasts.iter().position(|t| t.id() == id) else {
            return;
        };
        let toast = self.toasts.remove(pos);
        self.surface.detach(toast.node());
        log_event(toast.options(), toast.element_id(), "detached");

        if let Some(container) = self.container {
            if self.surface.child_count(container) == 0 {
                self.surface.detach(container);
                self.container = None;
                tracing::trace!("container removed");
            }
        }
    }

    fn ensure_container(&mut self, options: &Options) -> NodeId {
        if let Some(container) = self.container {
            return container;
        }
        let container = ToastView::build_container(&mut self.surface, options);
        let body = self.surface.body();
        self.surface.append_child(body, container);
        self.container = Some(container);
        tracing::trace!(id = %options.container_id, "container created");
        container
    }

    fn refresh_progress(&mut self) {
        let now = self.now;
        for toast in &self.toasts {
            let (Some(bar), Some(fraction)) = (toast.progress_node(), toast.remaining_fraction(now))
            else {
                continue;
            };
            self.surface
                .set_attribute(bar, "style", &ToastView::progress_style(fraction));
        }
    }

    /// Returns a live toast by ID.
    #[must_use]
    pub fn toast(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id() == id)
    }

    /// Returns the live toasts (including those still leaving), oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// Returns the number of live toasts.
    #[must_use]
    pub fn toast_count(&self) -> usize {
        self.toasts.len()
    }

    /// Returns whether any toast is live.
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.toasts.is_empty()
    }

    /// The live container element, if one exists.
    #[must_use]
    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    /// Current clock reading.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers still queued, including ones that will no-op.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the next queued timer.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    /// The message memoized for duplicate suppression.
    #[must_use]
    pub fn previous_message(&self) -> Option<&str> {
        self.previous_message.as_deref()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

/// Lifecycle logging; promoted to `info` for toasts created with `debug`.
fn log_event(options: &Options, element_id: &str, phase: &str) {
    if options.debug {
        tracing::info!(toast = %element_id, phase, "toast lifecycle");
    } else {
        tracing::trace!(toast = %element_id, phase, "toast lifecycle");
    }
}
