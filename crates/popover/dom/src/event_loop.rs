//! Single-threaded cooperative task queue with a virtual clock.
//!
//! Work never runs re-entrantly: tasks are queued and only run when the
//! embedder turns the loop with [`EventLoop::run_until_idle`] or
//! [`EventLoop::advance`]. Tasks due at the same instant run in the order they
//! were queued. Cancellation is left to the tasks themselves, which check the
//! state they care about when they finally run.

use core::cell::RefCell;
use core::time::Duration;
use std::collections::BTreeMap;

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
struct Queue {
    now: Duration,
    next_seq: u64,
    tasks: BTreeMap<(Duration, u64), Task>,
}

/// The event loop popovers schedule deferred work on.
#[derive(Default)]
pub struct EventLoop {
    queue: RefCell<Queue>,
}

impl EventLoop {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    /// Run `task` after the current turn of the loop, like `setTimeout(task, 0)`.
    pub fn defer(&self, task: impl FnOnce() + 'static) {
        self.schedule(Duration::ZERO, task);
    }

    /// Run `task` once `delay` has elapsed.
    pub fn schedule(&self, delay: Duration, task: impl FnOnce() + 'static) {
        let mut queue = self.queue.borrow_mut();
        let due = queue.now.saturating_add(delay);
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.tasks.insert((due, seq), Box::new(task));
    }

    /// Number of queued tasks, due or not.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().tasks.len()
    }

    /// Pop the next task due at or before `limit`, moving the clock to it.
    fn pop_due(&self, limit: Duration) -> Option<Task> {
        let mut queue = self.queue.borrow_mut();
        let (due, _seq) = *queue.tasks.first_key_value()?.0;
        if due > limit {
            return None;
        }
        let (_key, task) = queue.tasks.pop_first()?;
        queue.now = queue.now.max(due);
        Some(task)
    }

    /// Run every task that is due now, including tasks those tasks defer.
    /// Returns the number of tasks run.
    pub fn run_until_idle(&self) -> usize {
        let now = self.now();
        let mut ran = 0;
        while let Some(task) = self.pop_due(now) {
            task();
            ran += 1;
        }
        ran
    }

    /// Move the clock forward by `elapsed`, running tasks as they fall due.
    /// Returns the number of tasks run.
    pub fn advance(&self, elapsed: Duration) -> usize {
        let target = self.now().saturating_add(elapsed);
        let mut ran = 0;
        while let Some(task) = self.pop_due(target) {
            task();
            ran += 1;
        }
        let mut queue = self.queue.borrow_mut();
        queue.now = queue.now.max(target);
        ran
    }
}
