#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/findex/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the findex screening and backtest service.
//!
//! Every other crate in the workspace speaks in these types: the provider
//! client produces [`PriceSeries`], the fetcher caches them, and the screen
//! and evaluation crates consume them alongside [`ScoredStock`] rows.

/// The version of the findex-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod provider;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{FindexError, Result};
pub use provider::{LOOKBACK_YEARS, QuoteProvider};
pub use types::{MonthKey, MonthlyPrice, PriceMap, PriceSeries, ScoredStock, Symbol};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
