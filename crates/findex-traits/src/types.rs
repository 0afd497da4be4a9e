//! Common types used throughout the findex workspace.
//!
//! This module defines the monthly price history types shared by the
//! provider client, the cache, and the evaluation engines, plus the
//! hand-scored catalog row.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::FindexError;
use crate::stats::round2;

/// A market symbol identifier, e.g. `"META"` or `"BRK.B"`.
pub type Symbol = String;

/// Price histories keyed by symbol.
///
/// A symbol absent from the map has no usable data; that is distinct from a
/// symbol present with a flat (zero-return) series.
pub type PriceMap = HashMap<Symbol, PriceSeries>;

/// A calendar year-month, rendered as zero-padded `YYYY-MM`.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Creates a month key, returning `None` unless `month` is in `1..=12`.
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Option<Self> {
        if month >= 1 && month <= 12 {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Month containing the given Unix timestamp (seconds, UTC).
    #[must_use]
    pub fn from_timestamp(secs: i64) -> Option<Self> {
        let at = DateTime::from_timestamp(secs, 0)?;
        Self::new(at.year(), at.month())
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Calendar month, `1..=12`.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = FindexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FindexError::InvalidDate(format!("expected YYYY-MM, got {s:?}"));
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One month of adjusted-close history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPrice {
    /// Month this close belongs to.
    pub date: MonthKey,
    /// Adjusted close, always positive inside a [`PriceSeries`].
    pub close: f64,
}

impl MonthlyPrice {
    /// Creates a monthly price point.
    #[must_use]
    pub const fn new(date: MonthKey, close: f64) -> Self {
        Self { date, close }
    }

    /// Whether the close is a usable (finite, positive) price.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }
}

/// A chronologically ordered monthly price history for one symbol.
///
/// Construction through [`PriceSeries::from_points`] enforces the series
/// invariants: no non-positive or non-finite closes, one point per month,
/// ascending month order. Closes are rounded to cents.
///
/// Deserialization goes through the same normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<MonthlyPrice>,
}

impl PriceSeries {
    /// Normalizes raw points into a series.
    ///
    /// Invalid closes are dropped. When two points fall in the same month the
    /// later one in input order wins, so a trailing partial-month candle
    /// replaces the month-start candle.
    #[must_use]
    pub fn from_points(raw: impl IntoIterator<Item = MonthlyPrice>) -> Self {
        let mut by_month: BTreeMap<MonthKey, f64> = BTreeMap::new();
        for point in raw.into_iter().filter(MonthlyPrice::is_valid) {
            let close = round2(point.close);
            if close > 0.0 {
                by_month.insert(point.date, close);
            }
        }
        let points = by_month
            .into_iter()
            .map(|(date, close)| MonthlyPrice::new(date, close))
            .collect();
        Self { points }
    }

    /// The points in chronological order.
    #[must_use]
    pub fn points(&self) -> &[MonthlyPrice] {
        &self.points
    }

    /// Number of months in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest point.
    #[must_use]
    pub fn first(&self) -> Option<&MonthlyPrice> {
        self.points.first()
    }

    /// Latest point.
    #[must_use]
    pub fn last(&self) -> Option<&MonthlyPrice> {
        self.points.last()
    }

    /// The last `n` points, or all of them if the series is shorter.
    #[must_use]
    pub fn tail(&self, n: usize) -> &[MonthlyPrice] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }

    /// Close `months_back` points before the latest one.
    #[must_use]
    pub fn close_back(&self, months_back: usize) -> Option<f64> {
        let idx = self.points.len().checked_sub(months_back + 1)?;
        Some(self.points[idx].close)
    }

    /// Month → close lookup for alignment against another series.
    #[must_use]
    pub fn close_lookup(&self) -> HashMap<MonthKey, f64> {
        self.points.iter().map(|p| (p.date, p.close)).collect()
    }
}

impl From<Vec<MonthlyPrice>> for PriceSeries {
    fn from(points: Vec<MonthlyPrice>) -> Self {
        Self::from_points(points)
    }
}

impl<'de> Deserialize<'de> for PriceSeries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<MonthlyPrice>::deserialize(deserializer).map(Self::from_points)
    }
}

impl AsRef<[MonthlyPrice]> for PriceSeries {
    fn as_ref(&self) -> &[MonthlyPrice] {
        &self.points
    }
}

/// One row of the hand-scored stock catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredStock {
    /// Ticker symbol in catalog notation (share classes use a dot).
    pub symbol: Symbol,
    /// Display name.
    pub name: String,
    /// Whether the company is founder-led.
    pub founder_led: bool,
    /// Network-effects strength, 1–10.
    pub network_score: u8,
    /// GICS-style sector name.
    pub sector: String,
}
