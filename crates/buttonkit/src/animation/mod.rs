//! Animation requests and the runner seam.
//!
//! Buttons never tick animations themselves. They describe each animation as
//! an [`AnimationRequest`] and hand it to an [`AnimationRunner`] supplied by
//! the host, which maps it onto whatever animation engine it renders with.
//! The button's own model values (transform, overlay alpha, dot scale) jump
//! to the final value immediately.

mod easing;
mod recording;

use std::time::Duration;

pub use easing::{Easing, ease, lerp_eased};
pub use recording::RecordingAnimationRunner;

/// A 2D scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn uniform(factor: f32) -> Self {
        Self::new(factor, factor)
    }

    /// Compose with another scale.
    pub fn scaled_by(self, other: Scale) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// What an animation drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTarget {
    /// The button's scale transform.
    Transform,
    /// Alpha of the color feedback overlay.
    OverlayAlpha,
    /// Scale of one spinner dot.
    SpinnerDot(usize),
}

/// A value an animation interpolates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatedValue {
    Scale(Scale),
    Alpha(f32),
}

impl AnimatedValue {
    /// Eased interpolation. Mismatched kinds snap to `to`.
    pub fn interpolate(from: Self, to: Self, easing: Easing, t: f32) -> Self {
        match (from, to) {
            (Self::Scale(a), Self::Scale(b)) => Self::Scale(Scale::new(
                lerp_eased(easing, a.x, b.x, t),
                lerp_eased(easing, a.y, b.y, t),
            )),
            (Self::Alpha(a), Self::Alpha(b)) => Self::Alpha(lerp_eased(easing, a, b, t)),
            _ => to,
        }
    }
}

/// How an animation repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Play once and hold the final value.
    #[default]
    Once,
    /// Play forward then backward, forever, until cancelled.
    AutoreverseForever,
}

/// One animation for the runner to play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRequest {
    pub target: AnimationTarget,
    pub from: AnimatedValue,
    pub to: AnimatedValue,
    pub duration: Duration,
    pub easing: Easing,
    pub repeat: RepeatMode,
}

impl AnimationRequest {
    /// A request that plays once.
    pub fn once(
        target: AnimationTarget,
        from: AnimatedValue,
        to: AnimatedValue,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            target,
            from,
            to,
            duration,
            easing,
            repeat: RepeatMode::Once,
        }
    }

    /// Make the request autoreverse forever.
    pub fn autoreversing(mut self) -> Self {
        self.repeat = RepeatMode::AutoreverseForever;
        self
    }

    /// The animated value `elapsed` after the animation started.
    pub fn sample(&self, elapsed: Duration) -> AnimatedValue {
        let duration = self.duration.as_secs_f32();
        if duration <= 0.0 {
            return self.to;
        }

        let cycles = elapsed.as_secs_f32() / duration;
        let t = match self.repeat {
            RepeatMode::Once => cycles.min(1.0),
            RepeatMode::AutoreverseForever => {
                let phase = cycles % 2.0;
                if phase <= 1.0 { phase } else { 2.0 - phase }
            }
        };
        AnimatedValue::interpolate(self.from, self.to, self.easing, t)
    }

    /// Whether a one-shot animation has run its course. Repeating animations
    /// never finish.
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.repeat == RepeatMode::Once && elapsed >= self.duration
    }
}

/// Plays animation requests on the host's animation engine.
pub trait AnimationRunner: Send {
    /// Start an animation, replacing any running animation on the same target.
    fn animate(&mut self, request: AnimationRequest);

    /// Stop whatever animation runs on `target`.
    fn cancel(&mut self, target: AnimationTarget);
}

/// A runner that drops every request, for hosts that don't animate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAnimationRunner;

impl AnimationRunner for NullAnimationRunner {
    fn animate(&mut self, _request: AnimationRequest) {}

    fn cancel(&mut self, _target: AnimationTarget) {}
}
