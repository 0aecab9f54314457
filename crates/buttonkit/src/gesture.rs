//! Tap events and the gesture source seam.

use std::collections::VecDeque;

/// A recognized touch phase on a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapEvent {
    /// A touch went down inside the button.
    Down,
    /// The touch lifted.
    Up,
    /// The system cancelled the touch.
    Cancel,
    /// A complete tap: down and up inside the button.
    Complete,
}

/// Yields tap events recognized by the host's input system.
pub trait GestureSource {
    /// The next pending event, if any.
    fn next_event(&mut self) -> Option<TapEvent>;
}

impl GestureSource for VecDeque<TapEvent> {
    fn next_event(&mut self) -> Option<TapEvent> {
        self.pop_front()
    }
}

impl<I> GestureSource for std::iter::Fuse<I>
where
    I: Iterator<Item = TapEvent>,
{
    fn next_event(&mut self) -> Option<TapEvent> {
        self.next()
    }
}

/// The event sequence of an ordinary finger tap.
pub fn tap_sequence() -> VecDeque<TapEvent> {
    VecDeque::from([TapEvent::Down, TapEvent::Up, TapEvent::Complete])
}
