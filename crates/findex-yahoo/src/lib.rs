//! Yahoo Finance chart API client for findex.
//!
//! This crate fetches monthly adjusted-close history from the
//! [Yahoo Finance](https://finance.yahoo.com/) chart endpoint and implements
//! [`findex_traits::QuoteProvider`] on top of it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use findex_yahoo::YahooClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = YahooClient::new();
//!
//!     // Ten years of monthly closes; BRK.B is requested as BRK-B
//!     let series = client.monthly_closes("BRK.B", 10).await?;
//!     println!("{} months, latest {:?}", series.len(), series.last());
//!
//!     Ok(())
//! }
//! ```
//!
//! The client does no caching and no fallback: every call is one request.
//! Wrap it in `findex_data::PriceFetcher` for the best-effort, cached view.

mod client;
mod error;
mod types;

pub use client::{YAHOO_BASE_URL, YahooClient, provider_symbol};
pub use error::YahooError;
pub use types::*;

/// Result type for Yahoo operations.
pub type Result<T> = std::result::Result<T, YahooError>;
