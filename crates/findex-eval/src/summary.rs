//! Per-stock quote summaries.

use findex_traits::{PriceMap, ScoredStock, Symbol};
use serde::{Deserialize, Serialize};

use crate::metrics::{MONTHS_PER_YEAR, trailing_return};

/// Latest price and trailing returns of one screened stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    /// Ticker symbol
    pub symbol: Symbol,
    /// Company name
    pub name: String,
    /// Latest monthly close
    pub price: f64,
    /// Whether the company is founder-led
    pub founder_led: bool,
    /// Network-effects score, 1–10
    pub network_score: u8,
    /// Sector label
    pub sector: String,
    /// Trailing 12-month return (percent), 0 with fewer than 13 points
    pub return_1y: f64,
    /// Trailing 60-month return (percent), 0 with fewer than 61 points
    pub return_5y: f64,
}

/// Summarize the qualifying stocks that have prices.
///
/// Stocks missing from `prices`, or with an empty series, are dropped. The
/// result is ordered by network score, then 1-year return, both descending.
#[must_use]
pub fn summarize(qualifying: &[ScoredStock], prices: &PriceMap) -> Vec<QuoteSummary> {
    let mut quotes: Vec<QuoteSummary> = qualifying
        .iter()
        .filter_map(|stock| {
            let series = prices.get(&stock.symbol)?;
            let last = series.last()?;
            Some(QuoteSummary {
                symbol: stock.symbol.clone(),
                name: stock.name.clone(),
                price: last.close,
                founder_led: stock.founder_led,
                network_score: stock.network_score,
                sector: stock.sector.clone(),
                return_1y: trailing_return(series, MONTHS_PER_YEAR),
                return_5y: trailing_return(series, 5 * MONTHS_PER_YEAR),
            })
        })
        .collect();

    quotes.sort_by(|a, b| {
        b.network_score
            .cmp(&a.network_score)
            .then_with(|| b.return_1y.total_cmp(&a.return_1y))
    });
    quotes
}
