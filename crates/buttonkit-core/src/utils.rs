//! Small numeric helpers.

use rand::Rng;

/// Modulus that is never negative for a positive divisor.
///
/// # Panics
///
/// Panics if `divisor` is zero.
///
/// ```
/// assert_eq!(buttonkit_core::utils::modulus(-1, 3), 2);
/// assert_eq!(buttonkit_core::utils::modulus(7, 3), 1);
/// ```
pub fn modulus(number: i64, divisor: i64) -> i64 {
    number.rem_euclid(divisor)
}

/// A random value in `[between, and)` with two decimals of granularity.
///
/// Returns `between` when the range is empty.
pub fn random_float(between: f32, and: f32) -> f32 {
    let low = (between * 100.0).round() as i64;
    let high = (and * 100.0).round() as i64;
    if high <= low {
        return between;
    }
    rand::thread_rng().gen_range(low..high) as f32 / 100.0
}

/// A random integer in `[between, and)`.
///
/// Returns `between` when the range is empty.
pub fn random_int(between: i64, and: i64) -> i64 {
    if and <= between {
        return between;
    }
    rand::thread_rng().gen_range(between..and)
}
