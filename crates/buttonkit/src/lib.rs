//! ButtonKit - a styled button with tap feedback and a busy spinner.
//!
//! This is the umbrella crate: it re-exports the core and style crates and
//! adds the interactive parts.
//!
//! - [`button::Button`]: resolves its config, handles taps, notifies listeners
//! - [`interaction`]: the Idle / FeedbackActive / Spinning state machine
//! - [`spinner::Spinner`]: the three-dot busy indicator
//! - [`animation`] and [`gesture`]: seams to the host's animation engine and
//!   input system
//!
//! # Example
//!
//! ```
//! use std::collections::VecDeque;
//! use buttonkit::prelude::*;
//!
//! let mut button = Button::new(ButtonConfig::new(240.0))
//!     .with_text("Pay")
//!     .with_detail_text("$4.99");
//! assert_eq!(button.appearance().layout, ButtonLayout::DetailRight);
//!
//! let mut touches = VecDeque::from([TapEvent::Down, TapEvent::Up, TapEvent::Complete]);
//! button.pump(&mut touches);
//! assert_eq!(button.state(), InteractionState::Spinning);
//! ```

pub use buttonkit_core::*;

/// Style resolution module.
pub mod style {
    pub use buttonkit_style::*;
}

pub mod animation;
pub mod button;
pub mod gesture;
pub mod interaction;
pub mod prelude;
pub mod selection;
pub mod spinner;
