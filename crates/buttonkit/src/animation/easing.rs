//! Easing curves for requested animations.
//!
//! Easing functions map linear progress (0.0 to 1.0) to eased progress. The
//! animation runner owns the actual timing; these are what it should apply.

/// Available easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Quadratic ease-in (starts slow, accelerates).
    EaseIn,
    /// Quadratic ease-out (starts fast, decelerates).
    EaseOut,
    /// Quadratic ease-in-out.
    EaseInOut,
}

/// Apply an easing curve to a progress value.
///
/// ```
/// use buttonkit::animation::{ease, Easing};
///
/// assert_eq!(ease(Easing::Linear, 0.5), 0.5);
/// assert!(ease(Easing::EaseOut, 0.5) > 0.5);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
    }
}

/// Interpolate between two values along an easing curve.
#[inline]
pub fn lerp_eased(easing: Easing, start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * ease(easing, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(ease(easing, 0.0), 0.0, "{easing:?}");
            assert_eq!(ease(easing, 1.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn curve_shapes() {
        assert!(ease(Easing::EaseIn, 0.5) < 0.5);
        assert!(ease(Easing::EaseOut, 0.5) > 0.5);
        assert_eq!(ease(Easing::EaseInOut, 0.5), 0.5);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(ease(Easing::Linear, -0.5), 0.0);
        assert_eq!(ease(Easing::Linear, 1.5), 1.0);
    }

    #[test]
    fn lerp_between_values() {
        assert_eq!(lerp_eased(Easing::Linear, 1.0, 0.0, 0.25), 0.75);
        assert_eq!(lerp_eased(Easing::EaseOut, 0.15, 0.0, 1.0), 0.0);
    }
}
