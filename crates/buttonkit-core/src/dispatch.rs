//! Deferred work on the event thread, and fire-and-forget background work.
//!
//! A [`Dispatcher`] is a queue of payloads keyed by one-shot timers. The owner
//! posts payloads (optionally delayed), cancels them by ID, and periodically
//! takes whatever became due. Payloads are plain data, so a widget can post an
//! enum of its own follow-up actions and handle them with `&mut self`.
//!
//! ```
//! use std::time::Duration;
//! use buttonkit_core::Dispatcher;
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.post("now");
//! dispatcher.post_after(Duration::from_secs(60), "later");
//!
//! assert_eq!(dispatcher.take_due(), vec!["now"]);
//! assert_eq!(dispatcher.pending_count(), 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::logging::targets;
use crate::timer::{Clock, TimerId, TimerManager};

/// A boxed task for closure-based dispatch.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A queue of payloads that become available after a delay.
pub struct Dispatcher<T> {
    timers: TimerManager,
    pending: HashMap<TimerId, T>,
}

impl<T> Dispatcher<T> {
    /// Create a dispatcher on the system clock.
    pub fn new() -> Self {
        Self::from_timers(TimerManager::new())
    }

    /// Create a dispatcher on a specific clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::from_timers(TimerManager::with_clock(clock))
    }

    fn from_timers(timers: TimerManager) -> Self {
        Self {
            timers,
            pending: HashMap::new(),
        }
    }

    /// The current instant according to the dispatcher's clock.
    pub fn now(&self) -> Instant {
        self.timers.now()
    }

    /// The clock driving this dispatcher.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        self.timers.clock()
    }

    /// Queue a payload that is due on the next [`take_due`](Self::take_due).
    pub fn post(&mut self, payload: T) -> TimerId {
        self.post_after(Duration::ZERO, payload)
    }

    /// Queue a payload that becomes due after `delay`.
    pub fn post_after(&mut self, delay: Duration, payload: T) -> TimerId {
        let id = self.timers.start_one_shot(delay);
        self.pending.insert(id, payload);
        tracing::trace!(target: targets::DISPATCH, ?id, ?delay, "posted");
        id
    }

    /// Cancel a pending payload, returning it if it had not run yet.
    ///
    /// Cancelling something that already ran (or was already cancelled) is a
    /// no-op.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        // The timer may already be gone if it fired; only the payload matters.
        let _ = self.timers.stop(id);
        let payload = self.pending.remove(&id);
        if payload.is_some() {
            tracing::trace!(target: targets::DISPATCH, ?id, "cancelled");
        }
        payload
    }

    /// Whether a payload is still waiting.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Number of payloads still waiting.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Time until the next payload becomes due.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.timers.time_until_next()
    }

    /// Remove and return every payload that is due, in due order.
    pub fn take_due(&mut self) -> Vec<T> {
        self.timers
            .process_expired()
            .into_iter()
            .filter_map(|id| self.pending.remove(&id))
            .collect()
    }

    /// Drop every pending payload.
    pub fn clear(&mut self) {
        for id in self.pending.keys().copied().collect::<Vec<_>>() {
            let _ = self.timers.stop(id);
        }
        self.pending.clear();
    }
}

impl Dispatcher<Task> {
    /// Queue a closure to run on the next [`run_due`](Self::run_due).
    pub fn main(&mut self, task: impl FnOnce() + Send + 'static) -> TimerId {
        self.post(Box::new(task))
    }

    /// Queue a closure to run after `delay`.
    pub fn main_after(&mut self, delay: Duration, task: impl FnOnce() + Send + 'static) -> TimerId {
        self.post_after(delay, Box::new(task))
    }

    /// Run every closure that is due. Returns how many ran.
    pub fn run_due(&mut self) -> usize {
        let due = self.take_due();
        let count = due.len();
        for task in due {
            task();
        }
        count
    }
}

impl<T> Default for Dispatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("pending", &self.pending.len())
            .field("timers", &self.timers)
            .finish()
    }
}

/// Run a task on the shared background pool.
pub fn background(task: impl FnOnce() + Send + 'static) {
    rayon::spawn(task);
}
