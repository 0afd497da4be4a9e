//! Yahoo chart API client implementation.

use crate::{
    Result,
    error::YahooError,
    types::ChartResponse,
};
use findex_traits::{FindexError, PriceSeries, QuoteProvider};
use reqwest::{Client, header};

/// Base URL for the Yahoo Finance query API.
pub const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// The chart endpoint rejects requests without a browser-like user agent.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Translate a catalog symbol to Yahoo's ticker convention.
///
/// Share classes are written with a dot in the catalog (`BRK.B`) and with a
/// dash on Yahoo (`BRK-B`).
#[must_use]
pub fn provider_symbol(symbol: &str) -> String {
    symbol.replace('.', "-")
}

/// Yahoo Finance chart API client.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    /// Create a client against the public Yahoo endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(YAHOO_BASE_URL)
    }

    /// Create a client against a different host, e.g. a proxy or test server.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the monthly chart URL for a symbol.
    fn chart_url(&self, symbol: &str, years: u32) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={years}y&interval=1mo",
            self.base_url,
            provider_symbol(symbol)
        )
    }

    /// Fetch the raw chart payload for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// body that is not a chart payload.
    pub async fn chart(&self, symbol: &str, years: u32) -> Result<ChartResponse> {
        let url = self.chart_url(symbol, years);
        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(YahooError::Status(status));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Get monthly adjusted-close history for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Ticker in catalog notation (e.g., "BRK.B")
    /// * `years` - Range of history to request
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload carries an API
    /// error or no chart result.
    pub async fn monthly_closes(&self, symbol: &str, years: u32) -> Result<PriceSeries> {
        let response = self.chart(symbol, years).await?;

        if let Some(error) = response.chart.error {
            return Err(YahooError::Api {
                code: error.code,
                description: error.description,
            });
        }

        response
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(|result| result.to_series())
            .ok_or_else(|| YahooError::NoData(symbol.to_string()))
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteProvider for YahooClient {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn monthly_history(&self, symbol: &str, years: u32) -> findex_traits::Result<PriceSeries> {
        self.monthly_closes(symbol, years)
            .await
            .map_err(|e| FindexError::provider(symbol, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const PAYLOAD: &str = r#"{
        "chart": {
            "result": [{
                "timestamp": [1704067200, 1706745600],
                "indicators": {"adjclose": [{"adjclose": [400.5, 410.25]}]}
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_provider_symbol() {
        assert_eq!(provider_symbol("BRK.B"), "BRK-B");
        assert_eq!(provider_symbol("AAPL"), "AAPL");
    }

    #[test]
    fn test_url_building() {
        let client = YahooClient::with_base_url("http://localhost:1234/");
        assert_eq!(
            client.chart_url("BF.B", 10),
            "http://localhost:1234/v8/finance/chart/BF-B?range=10y&interval=1mo"
        );
    }

    #[tokio::test]
    async fn test_monthly_closes_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v8/finance/chart/BRK-B")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("range".into(), "10y".into()),
                Matcher::UrlEncoded("interval".into(), "1mo".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PAYLOAD)
            .create_async()
            .await;

        let client = YahooClient::with_base_url(server.url());
        let series = client.monthly_closes("BRK.B", 10).await.unwrap();

        mock.assert_async().await;
        assert_eq!(series.len(), 2);
        assert_eq!(series.last().unwrap().close, 410.25);
    }

    #[tokio::test]
    async fn test_monthly_closes_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let client = YahooClient::with_base_url(server.url());
        let err = client.monthly_closes("AAPL", 10).await.unwrap_err();
        assert!(matches!(err, YahooError::Status(s) if s.as_u16() == 429));
    }

    #[tokio::test]
    async fn test_monthly_closes_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = YahooClient::with_base_url(server.url());
        let err = client.monthly_closes("AAPL", 10).await.unwrap_err();
        assert!(matches!(err, YahooError::Json(_)));
    }

    #[tokio::test]
    async fn test_provider_maps_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", Matcher::Any)
            .with_status(200)
            .with_body(r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "delisted"}}}"#)
            .create_async()
            .await;

        let client = YahooClient::with_base_url(server.url());
        let err = client.monthly_history("ZZZZ", 10).await.unwrap_err();
        assert!(matches!(err, FindexError::ProviderUnavailable { ref symbol, .. } if symbol == "ZZZZ"));
    }
}
