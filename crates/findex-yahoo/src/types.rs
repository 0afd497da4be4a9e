//! Data types for Yahoo chart API responses.
//!
//! Every field is optional: the chart endpoint omits or nulls fields freely
//! (delisted symbols, months without a close), and a partial payload must
//! degrade to fewer points rather than a parse failure.

use findex_traits::{MonthKey, MonthlyPrice, PriceSeries};
use serde::Deserialize;

/// Top-level chart response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    /// The chart envelope.
    pub chart: Chart,
}

/// Chart envelope holding either results or an error.
#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    /// Chart results; the first entry is the requested symbol.
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    /// Error reported by the API.
    #[serde(default)]
    pub error: Option<ChartError>,
}

/// Candle data for one symbol.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    /// Candle open times, Unix seconds.
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    /// Indicator series aligned with `timestamp`.
    #[serde(default)]
    pub indicators: Option<Indicators>,
}

/// Indicator series of a chart result.
#[derive(Debug, Clone, Deserialize)]
pub struct Indicators {
    /// Adjusted close series.
    #[serde(default)]
    pub adjclose: Option<Vec<AdjClose>>,
}

/// Adjusted closes, `null` where the month has no close.
#[derive(Debug, Clone, Deserialize)]
pub struct AdjClose {
    /// Adjusted close values aligned with the result timestamps.
    #[serde(default)]
    pub adjclose: Option<Vec<Option<f64>>>,
}

/// Error object inside the chart envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartError {
    /// Error code, e.g. `Not Found`.
    #[serde(default)]
    pub code: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

impl ChartResult {
    /// Pair timestamps with adjusted closes into a normalized series.
    ///
    /// Points with a missing timestamp, a `null` close, or a non-positive
    /// close are dropped.
    #[must_use]
    pub fn to_series(&self) -> PriceSeries {
        let timestamps = self.timestamp.as_deref().unwrap_or_default();
        let closes = self
            .indicators
            .as_ref()
            .and_then(|i| i.adjclose.as_ref())
            .and_then(|a| a.first())
            .and_then(|a| a.adjclose.as_deref())
            .unwrap_or_default();

        PriceSeries::from_points(timestamps.iter().zip(closes).filter_map(|(&ts, close)| {
            let close = (*close)?;
            let date = MonthKey::from_timestamp(ts)?;
            Some(MonthlyPrice::new(date, close))
        }))
    }
}
