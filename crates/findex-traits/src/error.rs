//! Error types for the findex workspace.
//!
//! Per-symbol provider failures are absorbed by the fetcher and never reach
//! a caller; [`FindexError::DataUnavailable`] is the one condition that
//! escalates to a user-visible failure.

use thiserror::Error;

/// The main error type for findex operations.
#[derive(Debug, Error)]
pub enum FindexError {
    /// The upstream quote provider could not deliver a series for a symbol.
    #[error("Provider unavailable for {symbol}: {reason}")]
    ProviderUnavailable {
        /// Symbol that was requested.
        symbol: String,
        /// What went wrong upstream.
        reason: String,
    },

    /// Data required to produce a result could not be obtained.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// Error when a month key is out of range or malformed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The stock catalog failed validation.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// I/O error, typically while reading a catalog file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FindexError {
    /// Build a [`FindexError::ProviderUnavailable`] for `symbol`.
    pub fn provider(symbol: impl Into<String>, reason: impl ToString) -> Self {
        Self::ProviderUnavailable {
            symbol: symbol.into(),
            reason: reason.to_string(),
        }
    }
}

/// A specialized Result type for findex operations.
pub type Result<T> = std::result::Result<T, FindexError>;
