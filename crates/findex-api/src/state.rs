//! Shared application state and the request pipeline.

use findex_data::PriceFetcher;
use findex_eval::{Backtest, BacktestConfig, BacktestResult, QuoteSummary, summarize};
use findex_screen::{Catalog, ScreenCriteria, ScreenFilter};
use findex_traits::{FindexError, QuoteProvider, Result, ScoredStock, Symbol};
use tracing::{info, warn};

use crate::config::ServiceConfig;

/// State shared by every request handler.
///
/// The fetcher's cache is the only state that changes after startup.
#[derive(Debug)]
pub struct AppState<P> {
    fetcher: PriceFetcher<P>,
    catalog: Catalog,
    filter: ScreenFilter,
    config: ServiceConfig,
}

impl<P: QuoteProvider> AppState<P> {
    /// Assemble the state from its parts.
    pub fn new(fetcher: PriceFetcher<P>, catalog: Catalog, config: ServiceConfig) -> Self {
        Self {
            fetcher,
            catalog,
            filter: ScreenFilter::new(config.benchmark.clone()),
            config,
        }
    }

    /// The caching price fetcher.
    pub const fn fetcher(&self) -> &PriceFetcher<P> {
        &self.fetcher
    }

    /// The scored stock catalog.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The screen excluding the benchmark.
    pub const fn filter(&self) -> &ScreenFilter {
        &self.filter
    }

    /// The service configuration.
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The benchmark symbol.
    pub fn benchmark(&self) -> &str {
        self.filter.benchmark()
    }

    /// Catalog stocks meeting `criteria`, benchmark excluded.
    pub fn qualifying(&self, criteria: &ScreenCriteria) -> Vec<ScoredStock> {
        self.filter.apply(self.catalog.stocks(), criteria)
    }

    /// Screen, fetch and backtest over the last `years` years.
    ///
    /// The benchmark is fetched first; nothing else is requested when it is
    /// unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`FindexError::DataUnavailable`] when no benchmark series can
    /// be obtained, fresh or cached.
    pub async fn backtest(&self, criteria: &ScreenCriteria, years: u32) -> Result<BacktestResult> {
        let benchmark = self.fetcher.fetch_series(self.benchmark()).await;
        if benchmark.is_empty() {
            warn!(benchmark = self.benchmark(), "benchmark prices unavailable");
            return Err(FindexError::DataUnavailable(format!(
                "could not fetch {} benchmark data",
                self.benchmark()
            )));
        }

        let symbols: Vec<Symbol> = self
            .qualifying(criteria)
            .into_iter()
            .map(|s| s.symbol)
            .collect();
        let prices = self.fetcher.fetch_all(&symbols).await;

        let result = Backtest::new(BacktestConfig::from_years(years)).run(&symbols, &prices, &benchmark)?;
        info!(
            qualifying = symbols.len(),
            priced = result.stock_count,
            years,
            portfolio_return = result.portfolio_return,
            benchmark_return = result.benchmark_return,
            "backtest complete"
        );
        Ok(result)
    }

    /// Screen, fetch and summarize the qualifying stocks.
    pub async fn quotes(&self, criteria: &ScreenCriteria) -> Vec<QuoteSummary> {
        let qualifying = self.qualifying(criteria);
        let symbols: Vec<Symbol> = qualifying.iter().map(|s| s.symbol.clone()).collect();
        let prices = self.fetcher.fetch_all(&symbols).await;
        summarize(&qualifying, &prices)
    }
}
