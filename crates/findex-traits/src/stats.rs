//! Small numeric helpers shared by ingestion and evaluation.

/// Round to two decimal places (cents, or hundredths of a percent).
///
/// # Examples
///
/// ```
/// use findex_traits::stats::round2;
///
/// assert_eq!(round2(1.23456), 1.23);
/// assert_eq!(round2(159.996), 160.0);
/// ```
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage change from `from` to `to`, e.g. `50 → 80` is `60.0`.
///
/// Returns `None` when `from` is not a positive finite number.
#[must_use]
pub fn pct_change(from: f64, to: f64) -> Option<f64> {
    if from.is_finite() && from > 0.0 && to.is_finite() {
        Some((to / from - 1.0) * 100.0)
    } else {
        None
    }
}
