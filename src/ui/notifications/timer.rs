// SPDX-License-Identifier: MPL-2.0
//! Single-shot timers for toast transitions.
//!
//! Tasks are ordered by due time, then by the order they were scheduled,
//! so two tasks due at the same instant run first-in first-out.

use super::notification::ToastId;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

/// Work a timer performs when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Apply the visible class.
    Show(ToastId),
    /// Auto-dismiss, valid only while the toast's timer generation matches.
    Expire { id: ToastId, generation: u32 },
    /// Detach a hidden toast and collect the container if it is empty.
    Detach(ToastId),
}

#[derive(Debug)]
struct Entry {
    due: Duration,
    seq: u64,
    task: Task,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Min-queue of pending timers.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Duration, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { due, seq, task }));
    }

    /// Pops the earliest task if it is due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, Task)> {
        if self.heap.peek()?.0.due > now {
            return None;
        }
        self.heap.pop().map(|Reverse(entry)| (entry.due, entry.task))
    }

    /// Due time of the earliest pending task.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(entry)| entry.due)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn pops_in_due_order() {
        let a = ToastId::new();
        let b = ToastId::new();
        let mut queue = TimerQueue::new();
        queue.schedule(ms(50), Task::Detach(a));
        queue.schedule(ms(10), Task::Show(b));

        assert_eq!(queue.next_due(), Some(ms(10)));
        assert_eq!(queue.pop_due(ms(100)), Some((ms(10), Task::Show(b))));
        assert_eq!(queue.pop_due(ms(100)), Some((ms(50), Task::Detach(a))));
        assert!(queue.is_empty());
    }

    #[test]
    fn equal_due_times_keep_scheduling_order() {
        let a = ToastId::new();
        let b = ToastId::new();
        let mut queue = TimerQueue::new();
        queue.schedule(ms(10), Task::Show(a));
        queue.schedule(ms(10), Task::Show(b));

        assert_eq!(queue.pop_due(ms(10)).map(|(_, t)| t), Some(Task::Show(a)));
        assert_eq!(queue.pop_due(ms(10)).map(|(_, t)| t), Some(Task::Show(b)));
    }

    #[test]
    fn nothing_pops_before_due() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(10), Task::Show(ToastId::new()));
        assert!(queue.pop_due(ms(9)).is_none());
        assert_eq!(queue.len(), 1);
    }
}
