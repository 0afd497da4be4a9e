//! Score and leadership screening.

use findex_traits::{ScoredStock, Symbol};
use serde::{Deserialize, Serialize};

/// Symbol of the default comparison benchmark.
pub const DEFAULT_BENCHMARK: &str = "SPY";

/// Thresholds a stock must meet to qualify.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenCriteria {
    /// Minimum network-effects score, inclusive.
    pub min_network_score: i32,
    /// Only keep founder-led companies.
    pub founder_only: bool,
}

impl ScreenCriteria {
    /// Create criteria from a minimum score and the founder-only flag.
    #[must_use]
    pub const fn new(min_network_score: i32, founder_only: bool) -> Self {
        Self {
            min_network_score,
            founder_only,
        }
    }

    /// Whether `stock` meets the thresholds.
    #[must_use]
    pub fn matches(&self, stock: &ScoredStock) -> bool {
        i32::from(stock.network_score) >= self.min_network_score
            && (!self.founder_only || stock.founder_led)
    }
}

/// Selects portfolio constituents from the catalog.
///
/// The benchmark symbol is never a constituent, whatever the criteria.
#[derive(Debug, Clone)]
pub struct ScreenFilter {
    benchmark: Symbol,
}

impl ScreenFilter {
    /// Create a filter that excludes `benchmark`.
    #[must_use]
    pub fn new(benchmark: impl Into<Symbol>) -> Self {
        Self {
            benchmark: benchmark.into(),
        }
    }

    /// The excluded benchmark symbol.
    #[must_use]
    pub fn benchmark(&self) -> &str {
        &self.benchmark
    }

    /// Stocks meeting `criteria`, in catalog order.
    #[must_use]
    pub fn apply(&self, stocks: &[ScoredStock], criteria: &ScreenCriteria) -> Vec<ScoredStock> {
        stocks
            .iter()
            .filter(|s| s.symbol != self.benchmark && criteria.matches(s))
            .cloned()
            .collect()
    }
}

impl Default for ScreenFilter {
    fn default() -> Self {
        Self::new(DEFAULT_BENCHMARK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;

    fn stock(symbol: &str, score: u8, founder_led: bool) -> ScoredStock {
        ScoredStock {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            founder_led,
            network_score: score,
            sector: "Technology".to_string(),
        }
    }

    fn symbols(stocks: &[ScoredStock]) -> Vec<&str> {
        stocks.iter().map(|s| s.symbol.as_str()).collect()
    }

    #[test]
    fn test_min_score_and_founder_only() {
        let stocks = vec![stock("AAA", 8, true), stock("BBB", 3, false), stock("CCC", 8, false)];
        let filter = ScreenFilter::default();

        let founders = filter.apply(&stocks, &ScreenCriteria::new(5, true));
        assert_eq!(symbols(&founders), vec!["AAA"]);

        let all_high = filter.apply(&stocks, &ScreenCriteria::new(5, false));
        assert_eq!(symbols(&all_high), vec!["AAA", "CCC"]);

        let everything = filter.apply(&stocks, &ScreenCriteria::default());
        assert_eq!(symbols(&everything), vec!["AAA", "BBB", "CCC"]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let stocks = vec![stock("AAA", 7, false)];
        let filter = ScreenFilter::default();
        assert_eq!(filter.apply(&stocks, &ScreenCriteria::new(7, false)).len(), 1);
        assert!(filter.apply(&stocks, &ScreenCriteria::new(8, false)).is_empty());
    }

    #[test]
    fn test_benchmark_never_qualifies() {
        let catalog = Catalog::embedded().unwrap();
        let filter = ScreenFilter::default();

        for min in -1..=11 {
            for founder_only in [false, true] {
                let picked = filter.apply(catalog.stocks(), &ScreenCriteria::new(min, founder_only));
                assert!(picked.iter().all(|s| s.symbol != DEFAULT_BENCHMARK));
            }
        }
    }

    #[test]
    fn test_custom_benchmark_excluded() {
        let stocks = vec![stock("QQQ", 9, false), stock("AAA", 9, false)];
        let filter = ScreenFilter::new("QQQ");
        assert_eq!(symbols(&filter.apply(&stocks, &ScreenCriteria::default())), vec!["AAA"]);
    }

    #[test]
    fn test_nothing_qualifies() {
        let catalog = Catalog::embedded().unwrap();
        let picked = ScreenFilter::default().apply(catalog.stocks(), &ScreenCriteria::new(11, false));
        assert!(picked.is_empty());
    }
}
