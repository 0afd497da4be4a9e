//! Process-wide price cache.
//!
//! Entries are keyed by symbol and carry the instant they were fetched.
//! Entries older than the TTL are reported as stale rather than evicted, so
//! the fetcher can still fall back to them when a refresh fails.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use findex_traits::{PriceSeries, Symbol};
use tokio::time::Instant;

/// Default time-to-live of a cache entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    series: PriceSeries,
    fetched_at: Instant,
}

/// Result of a cache lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Entry younger than the TTL.
    Fresh(PriceSeries),
    /// Entry at or past the TTL; usable only as a fallback.
    Stale(PriceSeries),
    /// Nothing cached for the symbol.
    Miss,
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached symbols.
    pub total_entries: usize,
    /// Entries still within the TTL.
    pub fresh_entries: usize,
    /// Entries past the TTL.
    pub stale_entries: usize,
}

/// Symbol-keyed price series cache with a fixed TTL.
///
/// Concurrent refreshes of the same symbol are allowed; the last write wins.
#[derive(Debug)]
pub struct PriceCache {
    entries: RwLock<HashMap<Symbol, CacheEntry>>,
    ttl: Duration,
}

impl PriceCache {
    /// Create a cache with the default one-hour TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a cache with a custom TTL.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// The configured TTL.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up the cached series for a symbol.
    pub fn lookup(&self, symbol: &str) -> Lookup {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        match entries.get(symbol) {
            Some(entry) if entry.fetched_at.elapsed() < self.ttl => {
                Lookup::Fresh(entry.series.clone())
            }
            Some(entry) => Lookup::Stale(entry.series.clone()),
            None => Lookup::Miss,
        }
    }

    /// Store a series fetched now, replacing any prior entry.
    ///
    /// Empty series are ignored so that a good entry is never overwritten by
    /// an empty one.
    pub fn store(&self, symbol: &str, series: PriceSeries) {
        if series.is_empty() {
            return;
        }
        let entry = CacheEntry {
            series,
            fetched_at: Instant::now(),
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(symbol.to_string(), entry);
    }

    /// Number of cached symbols, fresh or stale.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let total_entries = entries.len();
        let fresh_entries = entries
            .values()
            .filter(|e| e.fetched_at.elapsed() < self.ttl)
            .count();

        CacheStats {
            total_entries,
            fresh_entries,
            stale_entries: total_entries - fresh_entries,
        }
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use findex_traits::{MonthKey, MonthlyPrice};

    fn series(close: f64) -> PriceSeries {
        PriceSeries::from_points(vec![MonthlyPrice::new(
            MonthKey::new(2024, 1).unwrap(),
            close,
        )])
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_then_stale() {
        let cache = PriceCache::with_ttl(Duration::from_secs(60));
        assert_eq!(cache.lookup("AAPL"), Lookup::Miss);

        cache.store("AAPL", series(10.0));
        assert_eq!(cache.lookup("AAPL"), Lookup::Fresh(series(10.0)));

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.lookup("AAPL"), Lookup::Stale(series(10.0)));
        assert_eq!(
            cache.stats(),
            CacheStats {
                total_entries: 1,
                fresh_entries: 0,
                stale_entries: 1
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_replaces_and_refreshes() {
        let cache = PriceCache::with_ttl(Duration::from_secs(60));
        cache.store("AAPL", series(10.0));
        tokio::time::advance(Duration::from_secs(61)).await;

        cache.store("AAPL", series(12.0));
        assert_eq!(cache.lookup("AAPL"), Lookup::Fresh(series(12.0)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_store_ignores_empty() {
        let cache = PriceCache::new();
        cache.store("AAPL", series(10.0));
        cache.store("AAPL", PriceSeries::default());
        assert_eq!(cache.lookup("AAPL"), Lookup::Fresh(series(10.0)));
        assert!(!cache.is_empty());
    }
}
