//! Upstream quote provider abstraction.
//!
//! The caching fetcher talks to the outside world only through
//! [`QuoteProvider`], which keeps the fetch/cache policy independent of any
//! particular quote API and lets tests substitute an in-memory source.

use std::future::Future;

use crate::{PriceSeries, Result};

/// Years of monthly history requested per symbol.
pub const LOOKBACK_YEARS: u32 = 10;

/// A source of monthly adjusted-close history.
///
/// Implementations map the upstream payload into a normalized
/// [`PriceSeries`] and report every upstream problem (transport failure,
/// non-success status, malformed payload) as an error. They do not cache and
/// do not fall back; that policy belongs to the caller.
///
/// # Example
///
/// ```no_run
/// use findex_traits::{PriceSeries, QuoteProvider, Result};
///
/// struct Flat;
///
/// impl QuoteProvider for Flat {
///     fn name(&self) -> &str {
///         "flat"
///     }
///
///     async fn monthly_history(&self, _symbol: &str, _years: u32) -> Result<PriceSeries> {
///         Ok(PriceSeries::default())
///     }
/// }
/// ```
pub trait QuoteProvider: Send + Sync {
    /// Short provider name used in log events.
    fn name(&self) -> &str;

    /// Fetch up to `years` of monthly history for `symbol`.
    ///
    /// `symbol` is given in catalog notation; translating it to the
    /// provider's ticker convention is the implementation's job.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FindexError::ProviderUnavailable`] when the upstream
    /// source cannot deliver a usable payload.
    fn monthly_history(
        &self,
        symbol: &str,
        years: u32,
    ) -> impl Future<Output = Result<PriceSeries>> + Send;
}
