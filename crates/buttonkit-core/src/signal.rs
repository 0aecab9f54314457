//! Signal/slot notifications.
//!
//! A [`Signal<Args>`] holds an ordered list of slots. Emitting calls every
//! connected slot synchronously, in connection order, on the emitting thread.
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use buttonkit_core::Signal;
//!
//! let tapped = Signal::<u32>::new();
//! let total = Arc::new(AtomicU32::new(0));
//!
//! let sink = total.clone();
//! let id = tapped.connect(move |n| {
//!     sink.fetch_add(*n, Ordering::SeqCst);
//! });
//!
//! tapped.emit(2);
//! tapped.disconnect(id).unwrap();
//! tapped.emit(5);
//! assert_eq!(total.load(Ordering::SeqCst), 2);
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, SignalError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

struct Connections<Args> {
    slots: SlotMap<ConnectionId, Slot<Args>>,
    /// Connection order; slotmap iteration order is not insertion order.
    order: Vec<ConnectionId>,
}

/// A type-safe signal that can have multiple connected slots.
pub struct Signal<Args> {
    connections: Mutex<Connections<Args>>,
    blocked: AtomicBool,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Connections {
                slots: SlotMap::with_key(),
                order: Vec::new(),
            }),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot. Slots run in the order they were connected.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let mut connections = self.connections.lock();
        let id = connections.slots.insert(Arc::new(slot));
        connections.order.push(id);
        tracing::trace!(target: targets::SIGNAL, ?id, "connected");
        id
    }

    /// Disconnect a slot.
    pub fn disconnect(&self, id: ConnectionId) -> Result<()> {
        let mut connections = self.connections.lock();
        if connections.slots.remove(id).is_none() {
            return Err(SignalError::InvalidConnection.into());
        }
        connections.order.retain(|other| *other != id);
        Ok(())
    }

    /// Disconnect every slot.
    pub fn disconnect_all(&self) {
        let mut connections = self.connections.lock();
        connections.slots.clear();
        connections.order.clear();
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().order.len()
    }

    /// Temporarily suppress emission.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Whether emission is currently suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Call every connected slot with `args`.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            return;
        }

        // Snapshot so slots may connect/disconnect without deadlocking.
        let slots: Vec<Slot<Args>> = {
            let connections = self.connections.lock();
            connections
                .order
                .iter()
                .filter_map(|id| connections.slots.get(*id).cloned())
                .collect()
        };

        tracing::trace!(target: targets::SIGNAL, slots = slots.len(), "emit");
        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_run_in_connection_order() {
        let signal = Signal::<()>::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let first = signal.connect({
            let log = log.clone();
            move |_| log.lock().push("a")
        });
        signal.connect({
            let log = log.clone();
            move |_| log.lock().push("b")
        });
        signal.disconnect(first).unwrap();
        signal.connect({
            let log = log.clone();
            move |_| log.lock().push("c")
        });

        signal.emit(());
        assert_eq!(*log.lock(), vec!["b", "c"]);
    }

    #[test]
    fn blocked_signal_is_silent() {
        let signal = Signal::<i32>::new();
        let hits = Arc::new(Mutex::new(0));
        signal.connect({
            let hits = hits.clone();
            move |n| *hits.lock() += *n
        });

        signal.set_blocked(true);
        signal.emit(1);
        signal.set_blocked(false);
        signal.emit(2);
        assert_eq!(*hits.lock(), 2);
    }

    #[test]
    fn disconnect_unknown_is_error() {
        let signal = Signal::<()>::new();
        let id = signal.connect(|_| {});
        signal.disconnect(id).unwrap();
        assert!(signal.disconnect(id).is_err());
        assert_eq!(signal.connection_count(), 0);
    }
}
