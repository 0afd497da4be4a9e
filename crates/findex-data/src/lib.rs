//! Cached, best-effort price fetching for findex.
//!
//! This crate sits between the evaluation engines and an upstream
//! [`QuoteProvider`](findex_traits::QuoteProvider):
//! - [`PriceCache`]: process-wide, symbol-keyed cache with a TTL
//! - [`PriceFetcher::fetch`]: one symbol, never failing, reporting whether
//!   the data is fresh, cached, a stale fallback, or missing
//! - [`PriceFetcher::fetch_all`]: many symbols in bounded concurrent groups
//!
//! # Example
//!
//! ```rust,ignore
//! use findex_data::{FetcherConfig, PriceCache, PriceFetcher};
//! use findex_yahoo::YahooClient;
//!
//! let fetcher = PriceFetcher::new(YahooClient::new(), PriceCache::new(), FetcherConfig::default());
//! let prices = fetcher.fetch_all(&["SPY".to_string(), "META".to_string()]).await;
//! ```

mod batch;
pub mod cache;
pub mod fetcher;
#[cfg(any(test, feature = "test-util"))]
mod memory;

// Re-export main types
pub use cache::{CacheStats, DEFAULT_TTL, Lookup, PriceCache};
pub use fetcher::{DEFAULT_BATCH_SIZE, DEFAULT_REQUEST_TIMEOUT, Fetched, FetcherConfig, PriceFetcher};
#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryProvider;
