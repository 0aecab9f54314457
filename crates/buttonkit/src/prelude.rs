//! Prelude module for ButtonKit.
//!
//! ```
//! use buttonkit::prelude::*;
//! ```

// ============================================================================
// Button
// ============================================================================

pub use crate::button::{Button, ButtonId, FeedbackOverlay, Visibility};
pub use crate::selection::{SelectionBlock, SelectionDelegate};
pub use crate::spinner::{Dot, Spinner};

// ============================================================================
// Interaction
// ============================================================================

pub use crate::gesture::{GestureSource, TapEvent};
pub use crate::interaction::{
    Effect, FeedbackKind, InteractionContext, InteractionEvent, InteractionState,
    InteractionStateMachine,
};

// ============================================================================
// Animation
// ============================================================================

pub use crate::animation::{
    AnimatedValue, AnimationRequest, AnimationRunner, AnimationTarget, Easing,
    NullAnimationRunner, RecordingAnimationRunner, RepeatMode, Scale,
};

// ============================================================================
// Style & Core
// ============================================================================

pub use buttonkit_core::{Clock, ManualClock, Signal, SystemClock};
pub use buttonkit_style::prelude::*;
