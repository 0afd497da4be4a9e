//! Scored stock catalog and screening filter for findex.
//!
//! The catalog assigns every stock two hand-made scores: a 1–10
//! network-effects strength and a founder-led flag. The screen keeps the
//! stocks meeting a minimum network score and, optionally, only founder-led
//! ones, never including the benchmark.
//!
//! # Example
//!
//! ```rust,no_run
//! use findex_screen::{Catalog, ScreenCriteria, ScreenFilter};
//!
//! let catalog = Catalog::embedded().unwrap();
//! let qualifying = ScreenFilter::default().apply(catalog.stocks(), &ScreenCriteria::new(8, true));
//! ```

mod catalog;
mod filter;

pub use catalog::{Catalog, NETWORK_SCORE_RANGE};
pub use filter::{DEFAULT_BENCHMARK, ScreenCriteria, ScreenFilter};
