//! Shared arithmetic helpers.
//!
//! [`coalesce`] turns an absent line item into `0.0` for arithmetic, and
//! [`ratio`] turns a zero or non-finite denominator into `None`. Every derived
//! figure goes through these two so the policy lives in one place.

/// Absent values count as zero in arithmetic.
#[must_use]
pub fn coalesce(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

/// Divides `numerator` by `denominator`, or returns `None` when the
/// denominator is zero or the result is not finite.
#[must_use]
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }
    Some(numerator / denominator).filter(|v| v.is_finite())
}

/// Rounds to the given number of decimal places.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Arithmetic mean, or `None` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    ratio(values.iter().sum(), values.len() as f64)
}
