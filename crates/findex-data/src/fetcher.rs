//! Best-effort, cached price fetching.
//!
//! [`PriceFetcher`] is the fetch boundary: provider failures are logged and
//! absorbed here and never reach a caller. What the caller gets instead is a
//! [`Fetched`] value saying where the series came from.

use std::time::Duration;

use findex_traits::{FindexError, LOOKBACK_YEARS, PriceSeries, QuoteProvider};
use tracing::{debug, info, warn};

use crate::cache::{Lookup, PriceCache};

/// Default upper bound on a single upstream request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of symbols fetched concurrently per group.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Configuration for a [`PriceFetcher`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Years of history requested per symbol.
    pub lookback_years: u32,
    /// Upper bound on one upstream request; exceeding it fails that symbol.
    pub request_timeout: Duration,
    /// Symbols fetched concurrently per group in [`PriceFetcher::fetch_all`].
    pub batch_size: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            lookback_years: LOOKBACK_YEARS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Outcome of a best-effort fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    /// Newly fetched from the provider and stored in the cache.
    Fresh(PriceSeries),
    /// Served from a cache entry within the TTL; no upstream request made.
    Cached(PriceSeries),
    /// The refresh failed; this is the last good series from the cache.
    Stale(PriceSeries),
    /// The refresh failed and nothing was cached.
    Missing,
}

impl Fetched {
    /// The series, if any data is available.
    #[must_use]
    pub const fn series(&self) -> Option<&PriceSeries> {
        match self {
            Self::Fresh(s) | Self::Cached(s) | Self::Stale(s) => Some(s),
            Self::Missing => None,
        }
    }

    /// The series, empty when nothing is available.
    #[must_use]
    pub fn into_series(self) -> PriceSeries {
        match self {
            Self::Fresh(s) | Self::Cached(s) | Self::Stale(s) => s,
            Self::Missing => PriceSeries::default(),
        }
    }

    /// Whether this is fallback data served after a failed refresh.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Stale(_) | Self::Missing)
    }
}

/// Fetches monthly series through a [`QuoteProvider`], caching results.
///
/// Construct one per process and share it (behind an `Arc`) with every
/// request; the cache it owns is the only cross-request state.
#[derive(Debug)]
pub struct PriceFetcher<P> {
    provider: P,
    cache: PriceCache,
    config: FetcherConfig,
}

impl<P: QuoteProvider> PriceFetcher<P> {
    /// Create a fetcher over `provider` with its own cache.
    pub const fn new(provider: P, cache: PriceCache, config: FetcherConfig) -> Self {
        Self {
            provider,
            cache,
            config,
        }
    }

    /// The underlying provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// The cache owned by this fetcher.
    pub const fn cache(&self) -> &PriceCache {
        &self.cache
    }

    /// The fetcher configuration.
    pub const fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetch the series for one symbol, never failing.
    ///
    /// A fresh cache entry is returned without touching the provider.
    /// Otherwise the provider is asked, bounded by the request timeout; a
    /// non-empty answer replaces the cache entry. Any failure, including an
    /// empty answer, falls back to the stale entry if there is one.
    pub async fn fetch(&self, symbol: &str) -> Fetched {
        let stale = match self.cache.lookup(symbol) {
            Lookup::Fresh(series) => {
                debug!(symbol, months = series.len(), "price cache hit");
                return Fetched::Cached(series);
            }
            Lookup::Stale(series) => Some(series),
            Lookup::Miss => None,
        };

        let request = self
            .provider
            .monthly_history(symbol, self.config.lookback_years);
        let result = match tokio::time::timeout(self.config.request_timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(FindexError::provider(
                symbol,
                format!("timed out after {:?}", self.config.request_timeout),
            )),
        };

        match result {
            Ok(series) if !series.is_empty() => {
                if let (Some(first), Some(last)) = (series.first(), series.last()) {
                    info!(
                        symbol,
                        provider = self.provider.name(),
                        months = series.len(),
                        "cached {} months ({:.2} → {:.2})",
                        series.len(),
                        first.close,
                        last.close
                    );
                }
                self.cache.store(symbol, series.clone());
                Fetched::Fresh(series)
            }
            Ok(_) => {
                warn!(symbol, provider = self.provider.name(), "provider returned no usable prices");
                Self::fallback(stale)
            }
            Err(e) => {
                warn!(symbol, provider = self.provider.name(), error = %e, "price fetch failed");
                Self::fallback(stale)
            }
        }
    }

    /// Fetch the series for one symbol, empty when nothing is available.
    pub async fn fetch_series(&self, symbol: &str) -> PriceSeries {
        self.fetch(symbol).await.into_series()
    }

    fn fallback(stale: Option<PriceSeries>) -> Fetched {
        stale.map_or(Fetched::Missing, Fetched::Stale)
    }
}
