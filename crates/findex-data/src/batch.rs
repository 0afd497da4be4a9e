//! Bounded-concurrency batch fetching.

use std::collections::HashSet;

use findex_traits::{PriceMap, QuoteProvider, Symbol};
use futures::future::join_all;
use tracing::debug;

use crate::fetcher::PriceFetcher;

impl<P: QuoteProvider> PriceFetcher<P> {
    /// Fetch series for many symbols.
    ///
    /// Symbols are fetched in groups of `batch_size`; a group runs
    /// concurrently and completes before the next one starts, so at most
    /// `batch_size` upstream requests are in flight. Symbols with no usable
    /// data are left out of the returned map. Duplicate symbols are fetched
    /// once.
    pub async fn fetch_all(&self, symbols: &[Symbol]) -> PriceMap {
        let mut seen = HashSet::with_capacity(symbols.len());
        let unique: Vec<&str> = symbols
            .iter()
            .map(String::as_str)
            .filter(|s| seen.insert(*s))
            .collect();

        let mut prices = PriceMap::with_capacity(unique.len());
        let mut fallbacks = 0usize;
        for group in unique.chunks(self.config().batch_size.max(1)) {
            let fetched = join_all(group.iter().map(|symbol| self.fetch(symbol))).await;
            for (symbol, outcome) in group.iter().zip(fetched) {
                if outcome.is_fallback() {
                    fallbacks += 1;
                }
                let series = outcome.into_series();
                if !series.is_empty() {
                    prices.insert((*symbol).to_string(), series);
                }
            }
        }

        debug!(
            requested = unique.len(),
            priced = prices.len(),
            fallbacks,
            "batch fetch complete"
        );
        prices
    }
}
