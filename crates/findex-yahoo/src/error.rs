//! Error types for the Yahoo chart client.

use thiserror::Error;

/// Errors that can occur when using the Yahoo chart API.
#[derive(Debug, Error)]
pub enum YahooError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Upstream answered with a non-success status.
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    /// Upstream reported an error inside the chart payload.
    #[error("Yahoo API error: {code}: {description}")]
    Api {
        /// Yahoo error code, e.g. `Not Found`.
        code: String,
        /// Human-readable description.
        description: String,
    },

    /// The payload held no chart result.
    #[error("No data available for {0}")]
    NoData(String),
}
