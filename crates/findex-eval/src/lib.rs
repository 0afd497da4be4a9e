//! Backtesting and quote summaries for findex.
//!
//! This crate turns aligned monthly price series into the numbers the service
//! reports:
//! - Equal-weight portfolio vs. benchmark growth curves
//! - Total return and CAGR of both curves
//! - Per-stock latest price with trailing 1- and 5-year returns
//!
//! # Example
//!
//! ```rust,ignore
//! use findex_eval::{Backtest, BacktestConfig, summarize};
//!
//! let result = Backtest::new(BacktestConfig::from_years(10)).run(&symbols, &prices, &spy)?;
//! println!("Portfolio: {:.2}%", result.portfolio_return);
//!
//! let quotes = summarize(&qualifying, &prices);
//! ```

pub mod backtest;
pub mod metrics;
pub mod summary;

// Re-export main types
pub use backtest::{Backtest, BacktestConfig, BacktestPoint, BacktestResult};
pub use summary::{QuoteSummary, summarize};
