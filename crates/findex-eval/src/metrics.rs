//! Return statistics.
//!
//! This module provides the growth statistics reported by the backtest and
//! the quote summaries:
//! - Total return of an index normalized to 100
//! - Compound annual growth rate over monthly points
//! - Trailing N-month return of a price series
//!
//! All values are percentages.

use findex_traits::PriceSeries;
use findex_traits::stats::{pct_change, round2};

/// Value of a growth index at its first point.
pub const BASE_INDEX: f64 = 100.0;

/// Monthly points per year.
pub const MONTHS_PER_YEAR: usize = 12;

/// Total return, in percent, of an index that started at [`BASE_INDEX`].
#[must_use]
pub const fn total_return(last_index: f64) -> f64 {
    last_index - BASE_INDEX
}

/// Compound annual growth rate, in percent, of an index that started at
/// [`BASE_INDEX`] and ended at `last_index` after `points` monthly points.
///
/// Elapsed time is `(points - 1) / 12` years. Returns 0 when fewer than two
/// points exist.
///
/// # Example
///
/// ```rust
/// use findex_eval::metrics::cagr;
///
/// // Doubling over 25 monthly points (two years) is ~41.42% a year.
/// assert!((cagr(200.0, 25) - 41.421356).abs() < 1e-4);
/// assert_eq!(cagr(150.0, 1), 0.0);
/// ```
#[must_use]
pub fn cagr(last_index: f64, points: usize) -> f64 {
    if points < 2 {
        return 0.0;
    }
    let years = (points - 1) as f64 / MONTHS_PER_YEAR as f64;
    if years <= 0.0 || last_index <= 0.0 {
        return 0.0;
    }
    ((last_index / BASE_INDEX).powf(1.0 / years) - 1.0) * 100.0
}

/// Return, in percent rounded to 2 decimals, from the close `months` points
/// before the latest one to the latest close.
///
/// Requires at least `months + 1` points; returns 0 otherwise.
#[must_use]
pub fn trailing_return(series: &PriceSeries, months: usize) -> f64 {
    if series.len() < months + 1 {
        return 0.0;
    }
    match (series.close_back(months), series.last()) {
        (Some(then), Some(now)) => pct_change(then, now.close).map_or(0.0, round2),
        _ => 0.0,
    }
}
