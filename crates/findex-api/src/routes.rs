//! HTTP routes for the screening service.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{Method, header},
    routing::get,
};
use findex_eval::{BacktestResult, QuoteSummary};
use findex_screen::ScreenCriteria;
use findex_traits::{LOOKBACK_YEARS, QuoteProvider, ScoredStock};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

/// Query parameters shared by the screening endpoints.
///
/// Values are kept as raw strings so malformed input falls back to defaults
/// instead of rejecting the request. Numbers are read from their leading
/// integer digits (`7.5` reads as 7) and clamp to the target range.
#[derive(Debug, Default, Deserialize)]
pub struct ScreenParams {
    /// Minimum network score; no leading integer means 0
    pub min_network: Option<String>,
    /// Founder-only flag; only the literal `true` enables it
    pub founder_only: Option<String>,
    /// Lookback in years; non-positive or no leading integer means 10
    pub years: Option<String>,
}

impl ScreenParams {
    /// The screen criteria these parameters describe.
    pub fn criteria(&self) -> ScreenCriteria {
        let min_network = self
            .min_network
            .as_deref()
            .and_then(parse_leading_int)
            .map(|v| i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX }))
            .unwrap_or(0);
        let founder_only = self.founder_only.as_deref() == Some("true");
        ScreenCriteria::new(min_network, founder_only)
    }

    /// The backtest lookback in years.
    pub fn years(&self) -> u32 {
        self.years
            .as_deref()
            .and_then(parse_leading_int)
            .filter(|y| *y > 0)
            .map(|y| u32::try_from(y).unwrap_or(u32::MAX))
            .unwrap_or(LOOKBACK_YEARS)
    }
}

/// Optional sign followed by decimal digits, ignoring whatever follows.
/// Saturates at the `i64` bounds.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].bytes().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Service status summary.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Always `ok` while the service answers
    pub status: String,
    /// Number of catalog stocks
    pub stocks_loaded: usize,
    /// Number of cached price series
    pub prices_cached: usize,
    /// Cached series still within the TTL
    pub prices_fresh: usize,
    /// Cached series past the TTL, kept as fallbacks
    pub prices_stale: usize,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Backtest the screened portfolio against the benchmark.
async fn backtest<P: QuoteProvider>(
    State(state): State<Arc<AppState<P>>>,
    Query(params): Query<ScreenParams>,
) -> Result<Json<BacktestResult>, ApiError> {
    let result = state.backtest(&params.criteria(), params.years()).await?;
    Ok(Json(result))
}

/// Latest prices and trailing returns of the screened stocks.
async fn quotes<P: QuoteProvider>(
    State(state): State<Arc<AppState<P>>>,
    Query(params): Query<ScreenParams>,
) -> Json<Vec<QuoteSummary>> {
    Json(state.quotes(&params.criteria()).await)
}

/// The full catalog.
async fn scores<P: QuoteProvider>(
    State(state): State<Arc<AppState<P>>>,
) -> Json<Vec<ScoredStock>> {
    Json(state.catalog().stocks().to_vec())
}

/// Catalog and cache sizes.
async fn status<P: QuoteProvider>(State(state): State<Arc<AppState<P>>>) -> Json<StatusResponse> {
    let cache = state.fetcher().cache().stats();
    Json(StatusResponse {
        status: "ok".to_string(),
        stocks_loaded: state.catalog().len(),
        prices_cached: cache.total_entries,
        prices_fresh: cache.fresh_entries,
        prices_stale: cache.stale_entries,
    })
}

/// Liveness probe.
async fn healthz() -> &'static str {
    "ok"
}

// ============================================================================
// Router
// ============================================================================

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the service router over `state`.
pub fn build_router<P: QuoteProvider + 'static>(state: Arc<AppState<P>>) -> Router {
    Router::new()
        .route("/api/backtest", get(backtest::<P>))
        .route("/api/quotes", get(quotes::<P>))
        .route("/api/scores", get(scores::<P>))
        .route("/api/status", get(status::<P>))
        .route("/healthz", get(healthz))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use crate::warmup::warm_cache;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use findex_data::{FetcherConfig, MemoryProvider, PriceCache, PriceFetcher};
    use findex_screen::Catalog;
    use findex_traits::{MonthKey, MonthlyPrice, PriceSeries};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn stock(symbol: &str, score: u8, founder_led: bool) -> ScoredStock {
        ScoredStock {
            symbol: symbol.to_string(),
            name: format!("{symbol} Inc."),
            founder_led,
            network_score: score,
            sector: "Technology".to_string(),
        }
    }

    fn linear(from: f64, to: f64, n: usize) -> PriceSeries {
        let mut date = MonthKey::new(2024, 1).unwrap();
        let mut points = Vec::with_capacity(n);
        for i in 0..n {
            points.push(MonthlyPrice::new(date, from + i as f64 * (to - from) / (n - 1) as f64));
            date = date.next();
        }
        PriceSeries::from_points(points)
    }

    fn provider() -> MemoryProvider {
        MemoryProvider::new()
            .with_series("SPY", linear(100.0, 150.0, 12))
            .with_series("AAA", linear(50.0, 80.0, 12))
            .with_series("BBB", linear(20.0, 10.0, 12))
            .with_series("CCC", linear(10.0, 30.0, 13))
    }

    fn state_with(provider: MemoryProvider) -> Arc<AppState<MemoryProvider>> {
        let catalog = Catalog::from_stocks(vec![
            stock("AAA", 8, true),
            stock("BBB", 3, false),
            stock("CCC", 8, false),
            stock("SPY", 1, false),
        ])
        .unwrap();
        let fetcher = PriceFetcher::new(provider, PriceCache::new(), FetcherConfig::default());
        Arc::new(AppState::new(fetcher, catalog, ServiceConfig::default()))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[test]
    fn test_params_defaults_and_leniency() {
        let params = ScreenParams::default();
        assert_eq!(params.criteria(), ScreenCriteria::new(0, false));
        assert_eq!(params.years(), 10);

        let params = ScreenParams {
            min_network: Some("abc".into()),
            founder_only: Some("yes".into()),
            years: Some("-3".into()),
        };
        assert_eq!(params.criteria(), ScreenCriteria::new(0, false));
        assert_eq!(params.years(), 10);

        let params = ScreenParams {
            min_network: Some("7".into()),
            founder_only: Some("true".into()),
            years: Some("5".into()),
        };
        assert_eq!(params.criteria(), ScreenCriteria::new(7, true));
        assert_eq!(params.years(), 5);
    }

    #[test]
    fn test_params_read_leading_integer() {
        assert_eq!(parse_leading_int("7.5"), Some(7));
        assert_eq!(parse_leading_int(" 12abc"), Some(12));
        assert_eq!(parse_leading_int("-4"), Some(-4));
        assert_eq!(parse_leading_int("+3"), Some(3));
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("x7"), None);
        assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));

        let params = ScreenParams {
            min_network: Some("7.5".into()),
            founder_only: None,
            years: Some("2.9".into()),
        };
        assert_eq!(params.criteria(), ScreenCriteria::new(7, false));
        assert_eq!(params.years(), 2);
    }

    #[test]
    fn test_params_clamp_out_of_range() {
        let params = ScreenParams {
            min_network: Some("3000000000".into()),
            founder_only: None,
            years: Some("5000000000".into()),
        };
        assert_eq!(params.criteria(), ScreenCriteria::new(i32::MAX, false));
        assert_eq!(params.years(), u32::MAX);

        let params = ScreenParams {
            min_network: Some("-3000000000".into()),
            ..ScreenParams::default()
        };
        assert_eq!(params.criteria(), ScreenCriteria::new(i32::MIN, false));
    }

    #[tokio::test]
    async fn test_backtest_scenario() {
        let app = build_router(state_with(provider()));
        let (status, json) =
            get_json(app, "/api/backtest?min_network=5&founder_only=true").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["points"][0]["portfolio_value"], 100.0);
        assert_eq!(json["points"][0]["benchmark_value"], 100.0);
        assert_eq!(json["points"][11]["portfolio_value"], 160.0);
        assert_eq!(json["points"][11]["benchmark_value"], 150.0);
        assert_eq!(json["portfolio_return"], 60.0);
        assert_eq!(json["benchmark_return"], 50.0);
        assert_eq!(json["stock_count"], 1);
        assert_eq!(json["symbols"], serde_json::json!(["AAA"]));
    }

    #[tokio::test]
    async fn test_backtest_never_includes_benchmark() {
        let app = build_router(state_with(provider()));
        let (status, json) = get_json(app, "/api/backtest?min_network=0").await;

        assert_eq!(status, StatusCode::OK);
        let symbols = json["symbols"].as_array().unwrap();
        assert!(!symbols.contains(&Value::from("SPY")));
        assert_eq!(json["stock_count"], 3);
    }

    #[tokio::test]
    async fn test_backtest_lenient_params() {
        let app = build_router(state_with(provider()));
        let (status, json) =
            get_json(app, "/api/backtest?min_network=abc&founder_only=yes&years=-3").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["stock_count"], 3);
    }

    #[tokio::test]
    async fn test_backtest_nothing_qualifies() {
        let app = build_router(state_with(provider()));
        let (status, json) = get_json(app, "/api/backtest?min_network=11").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["points"], serde_json::json!([]));
        assert_eq!(json["portfolio_return"], 0.0);
        assert_eq!(json["benchmark_cagr"], 0.0);
        assert_eq!(json["stock_count"], 0);
    }

    #[tokio::test]
    async fn test_backtest_huge_min_network_selects_nothing() {
        let app = build_router(state_with(provider()));
        let (status, json) = get_json(app, "/api/backtest?min_network=3000000000").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["stock_count"], 0);
        assert_eq!(json["points"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_backtest_huge_years_uses_full_history() {
        let app = build_router(state_with(provider()));
        let (status, json) = get_json(app, "/api/backtest?years=5000000000").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["points"].as_array().unwrap().len(), 12);
        assert_eq!(json["stock_count"], 3);
    }

    #[tokio::test]
    async fn test_backtest_without_benchmark_is_unavailable() {
        let provider = provider();
        provider.fail("SPY");
        let app = build_router(state_with(provider));
        let (status, json) = get_json(app, "/api/backtest").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(json["error"].as_str().unwrap().contains("SPY"));
    }

    #[tokio::test]
    async fn test_quotes_ordering_and_returns() {
        let app = build_router(state_with(provider()));
        let (status, json) = get_json(app, "/api/quotes?min_network=5").await;

        assert_eq!(status, StatusCode::OK);
        let quotes = json.as_array().unwrap();
        let symbols: Vec<&str> = quotes.iter().map(|q| q["symbol"].as_str().unwrap()).collect();
        // equal scores, CCC has a 1-year return and AAA does not
        assert_eq!(symbols, vec!["CCC", "AAA"]);
        assert_eq!(quotes[0]["return_1y"], 200.0);
        assert_eq!(quotes[1]["return_1y"], 0.0);
        assert_eq!(quotes[1]["price"], 80.0);
    }

    #[tokio::test]
    async fn test_scores_returns_catalog() {
        let app = build_router(state_with(provider()));
        let (status, json) = get_json(app, "/api/scores").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 4);
        assert_eq!(json[0]["symbol"], "AAA");
        assert_eq!(json[0]["founder_led"], true);
    }

    #[tokio::test]
    async fn test_status_counts_cache() {
        let state = state_with(provider());
        assert_eq!(warm_cache(&state).await, 4);

        let (status, json) = get_json(build_router(state), "/api/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["stocks_loaded"], 4);
        assert_eq!(json["prices_cached"], 4);
        assert_eq!(json["prices_fresh"], 4);
        assert_eq!(json["prices_stale"], 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_reports_stale_entries() {
        let state = state_with(provider());
        warm_cache(&state).await;
        tokio::time::advance(findex_data::DEFAULT_TTL).await;

        let (status, json) = get_json(build_router(state), "/api/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["prices_cached"], 4);
        assert_eq!(json["prices_fresh"], 0);
        assert_eq!(json["prices_stale"], 4);
    }

    #[tokio::test]
    async fn test_requests_reuse_cache() {
        let state = state_with(provider());
        let app = build_router(Arc::clone(&state));

        get_json(app.clone(), "/api/backtest").await;
        get_json(app, "/api/backtest").await;

        assert_eq!(state.fetcher().provider().calls_for("SPY"), 1);
        assert_eq!(state.fetcher().provider().calls_for("AAA"), 1);
    }

    #[tokio::test]
    async fn test_healthz_and_cors() {
        let app = build_router(state_with(provider()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ok");
    }
}
