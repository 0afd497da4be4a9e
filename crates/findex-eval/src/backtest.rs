//! Equal-weight portfolio backtest.
//!
//! Replays a monthly-rebalanced, equal-weight portfolio of the screened
//! stocks against a benchmark. Both curves are growth indices normalized to
//! 100 at the first benchmark month of the lookback window.

use std::collections::HashMap;

use findex_traits::stats::round2;
use findex_traits::{FindexError, LOOKBACK_YEARS, MonthKey, PriceMap, PriceSeries, Result, Symbol};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::metrics::{BASE_INDEX, MONTHS_PER_YEAR, cagr, total_return};

/// Backtest configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Number of trailing benchmark months to replay
    pub lookback_months: usize,
}

impl BacktestConfig {
    /// Configuration replaying the last `years` years.
    ///
    /// Zero is replaced by the default lookback.
    #[must_use]
    pub const fn from_years(years: u32) -> Self {
        let years = if years == 0 { LOOKBACK_YEARS } else { years };
        Self {
            lookback_months: (years as usize).saturating_mul(MONTHS_PER_YEAR),
        }
    }
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self::from_years(LOOKBACK_YEARS)
    }
}

/// One month of the backtest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestPoint {
    /// Month of the point
    pub date: MonthKey,
    /// Portfolio growth index, 100 at the start month
    pub portfolio_value: f64,
    /// Benchmark growth index, 100 at the start month
    pub benchmark_value: f64,
}

/// Backtest results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Monthly growth indices
    pub points: Vec<BacktestPoint>,
    /// Portfolio total return (percent)
    pub portfolio_return: f64,
    /// Benchmark total return (percent)
    pub benchmark_return: f64,
    /// Portfolio compound annual growth rate (percent)
    pub portfolio_cagr: f64,
    /// Benchmark compound annual growth rate (percent)
    pub benchmark_cagr: f64,
    /// Number of qualifying symbols that had prices
    pub stock_count: usize,
    /// The priced qualifying symbols
    pub symbols: Vec<Symbol>,
}

impl BacktestResult {
    /// Result with no points and zeroed statistics.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Backtesting engine.
#[derive(Debug, Default)]
pub struct Backtest {
    config: BacktestConfig,
}

impl Backtest {
    /// Create a new backtest with configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use findex_eval::{Backtest, BacktestConfig};
    ///
    /// let backtest = Backtest::new(BacktestConfig::from_years(5));
    /// assert_eq!(backtest.config().lookback_months, 60);
    /// ```
    #[must_use]
    pub const fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    /// The backtest configuration.
    #[must_use]
    pub const fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Run the backtest.
    ///
    /// # Arguments
    ///
    /// * `symbols` - Qualifying symbols, in the order to report them
    /// * `prices` - Monthly series by symbol; symbols without one are skipped
    /// * `benchmark` - Benchmark series defining the month grid
    ///
    /// Each month the portfolio index is 100 times the mean of
    /// `close(month) / close(start)` over the symbols priced at both months.
    /// A month where no symbol contributes keeps the index at 100.
    ///
    /// # Errors
    ///
    /// Returns [`FindexError::DataUnavailable`] when the benchmark series is
    /// empty.
    pub fn run(
        &self,
        symbols: &[Symbol],
        prices: &PriceMap,
        benchmark: &PriceSeries,
    ) -> Result<BacktestResult> {
        if benchmark.is_empty() {
            return Err(FindexError::DataUnavailable(
                "benchmark price history is unavailable".to_string(),
            ));
        }

        let priced: Vec<(&Symbol, HashMap<MonthKey, f64>)> = symbols
            .iter()
            .filter_map(|symbol| {
                prices
                    .get(symbol)
                    .filter(|series| !series.is_empty())
                    .map(|series| (symbol, series.close_lookup()))
            })
            .collect();

        if priced.is_empty() {
            return Ok(BacktestResult::empty());
        }

        let window = benchmark.tail(self.config.lookback_months.max(1));
        let (start, base_close) = match window.first() {
            Some(first) => (first.date, first.close),
            None => return Ok(BacktestResult::empty()),
        };

        let points: Vec<BacktestPoint> = window
            .iter()
            .map(|bench| {
                let relatives: Array1<f64> = priced
                    .iter()
                    .filter_map(|(_, lookup)| {
                        let base = *lookup.get(&start)?;
                        let now = *lookup.get(&bench.date)?;
                        (base > 0.0).then(|| now / base)
                    })
                    .collect();
                let portfolio = relatives.mean().map_or(BASE_INDEX, |m| BASE_INDEX * m);

                BacktestPoint {
                    date: bench.date,
                    portfolio_value: round2(portfolio),
                    benchmark_value: round2(BASE_INDEX * bench.close / base_close),
                }
            })
            .collect();

        let mut result = BacktestResult {
            stock_count: priced.len(),
            symbols: priced.iter().map(|(symbol, _)| (*symbol).clone()).collect(),
            ..BacktestResult::default()
        };

        if let (n @ 2.., Some(last)) = (points.len(), points.last()) {
            result.portfolio_return = round2(total_return(last.portfolio_value));
            result.benchmark_return = round2(total_return(last.benchmark_value));
            result.portfolio_cagr = round2(cagr(last.portfolio_value, n));
            result.benchmark_cagr = round2(cagr(last.benchmark_value, n));
        }
        result.points = points;

        Ok(result)
    }
}
