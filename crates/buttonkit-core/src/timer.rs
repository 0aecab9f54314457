//! Timer system for ButtonKit.
//!
//! Provides one-shot and repeating timers driven by an injectable [`Clock`].
//! Nothing here spawns threads: the owner polls [`TimerManager::process_expired`]
//! from its event loop and dispatches whatever fired.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// A source of the current time.
pub trait Clock: Send + Sync + fmt::Debug {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Wall-clock time from [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can hold one handle and
/// hand another to the component under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    /// Create a manual clock starting at the current instant.
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// The type of timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires once after the specified duration.
    OneShot,
    /// Fires repeatedly at the specified interval.
    Repeating,
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData {
    /// When this timer should next fire.
    next_fire: Instant,
    /// The interval for repeating timers.
    interval: Duration,
    /// The kind of timer.
    kind: TimerKind,
}

/// An entry in the timer queue (min-heap by fire time, then insertion order).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
    seq: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time && self.seq == other.seq
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .fire_time
            .cmp(&self.fire_time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Manages a set of timers against a clock.
pub struct TimerManager {
    /// All registered timers.
    timers: SlotMap<TimerId, TimerData>,
    /// Priority queue of pending timer fires.
    queue: BinaryHeap<TimerQueueEntry>,
    /// Monotonic counter so equal fire times keep FIFO order.
    next_seq: u64,
    clock: Arc<dyn Clock>,
}

impl TimerManager {
    /// Create a timer manager on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a timer manager on a specific clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            next_seq: 0,
            clock,
        }
    }

    /// The clock this manager reads.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// The current instant according to the manager's clock.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Start a one-shot timer that fires after the specified duration.
    pub fn start_one_shot(&mut self, duration: Duration) -> TimerId {
        self.insert(duration, TimerKind::OneShot)
    }

    /// Start a repeating timer that fires at the specified interval.
    ///
    /// The first fire occurs after `interval`.
    pub fn start_repeating(&mut self, interval: Duration) -> TimerId {
        self.insert(interval, TimerKind::Repeating)
    }

    fn insert(&mut self, interval: Duration, kind: TimerKind) -> TimerId {
        let next_fire = self.clock.now() + interval;
        let id = self.timers.insert(TimerData {
            next_fire,
            interval,
            kind,
        });
        self.enqueue(id, next_fire);
        tracing::trace!(target: targets::TIMER, ?id, ?interval, ?kind, "timer started");
        id
    }

    fn enqueue(&mut self, id: TimerId, fire_time: Instant) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(TimerQueueEntry { id, fire_time, seq });
    }

    /// Stop and remove a timer.
    ///
    /// Returns an error if the timer already fired (one-shot) or was stopped.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        if self.timers.remove(id).is_some() {
            tracing::trace!(target: targets::TIMER, ?id, "timer stopped");
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId.into())
        }
    }

    /// Check if a timer is currently active.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Get the duration until the next timer fires, if any.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        // Drop stopped timers from the front of the queue.
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }

        let now = self.clock.now();
        self.queue
            .peek()
            .map(|entry| entry.fire_time.saturating_duration_since(now))
    }

    /// Process all timers that are due, in fire order.
    ///
    /// Returns the IDs of the timers that fired.
    pub fn process_expired(&mut self) -> Vec<TimerId> {
        let _span = tracing::trace_span!(target: targets::TIMER, "process_expired").entered();
        let now = self.clock.now();
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_time > now {
                break;
            }
            self.queue.pop();

            let Some(timer) = self.timers.get_mut(entry.id) else {
                continue;
            };
            // A stale entry left behind by a repeating timer's reschedule.
            if timer.next_fire != entry.fire_time {
                continue;
            }

            tracing::trace!(target: targets::TIMER, id = ?entry.id, "timer fired");
            fired.push(entry.id);

            match timer.kind {
                TimerKind::OneShot => {
                    self.timers.remove(entry.id);
                }
                TimerKind::Repeating => {
                    // A zero interval would refire forever within this call.
                    timer.next_fire = now + timer.interval.max(Duration::from_nanos(1));
                    let next_fire = timer.next_fire;
                    self.enqueue(entry.id, next_fire);
                }
            }
        }

        fired
    }

    /// Get the number of active timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }
}

impl Default for TimerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TimerManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerManager")
            .field("active", &self.timers.len())
            .field("queued", &self.queue.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual() -> (ManualClock, TimerManager) {
        let clock = ManualClock::new();
        let timers = TimerManager::with_clock(Arc::new(clock.clone()));
        (clock, timers)
    }

    #[test]
    fn one_shot_fires_once() {
        let (clock, mut timers) = manual();
        let id = timers.start_one_shot(Duration::from_millis(100));

        clock.advance(Duration::from_millis(99));
        assert!(timers.process_expired().is_empty());

        clock.advance(Duration::from_millis(1));
        assert_eq!(timers.process_expired(), vec![id]);
        assert!(!timers.is_active(id));

        clock.advance(Duration::from_secs(1));
        assert!(timers.process_expired().is_empty());
    }

    #[test]
    fn repeating_fires_until_stopped() {
        let (clock, mut timers) = manual();
        let id = timers.start_repeating(Duration::from_millis(10));

        clock.advance(Duration::from_millis(10));
        assert_eq!(timers.process_expired(), vec![id]);
        clock.advance(Duration::from_millis(10));
        assert_eq!(timers.process_expired(), vec![id]);

        timers.stop(id).unwrap();
        clock.advance(Duration::from_millis(10));
        assert!(timers.process_expired().is_empty());
    }

    #[test]
    fn fires_in_due_order_with_fifo_ties() {
        let (clock, mut timers) = manual();
        let late = timers.start_one_shot(Duration::from_millis(50));
        let first = timers.start_one_shot(Duration::from_millis(10));
        let second = timers.start_one_shot(Duration::from_millis(10));

        clock.advance(Duration::from_millis(60));
        assert_eq!(timers.process_expired(), vec![first, second, late]);
    }

    #[test]
    fn stopping_twice_is_an_error() {
        let (_clock, mut timers) = manual();
        let id = timers.start_one_shot(Duration::from_millis(5));
        assert!(timers.stop(id).is_ok());
        assert!(timers.stop(id).is_err());
    }

    #[test]
    fn time_until_next_skips_stopped() {
        let (_clock, mut timers) = manual();
        let a = timers.start_one_shot(Duration::from_millis(5));
        timers.start_one_shot(Duration::from_millis(20));
        timers.stop(a).unwrap();
        assert_eq!(timers.time_until_next(), Some(Duration::from_millis(20)));
        assert_eq!(timers.active_count(), 1);
    }
}
