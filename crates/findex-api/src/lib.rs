//! HTTP service for findex.
//!
//! Exposes the screen, quote summaries and backtest as JSON endpoints:
//!
//! | Route | Returns |
//! |-------|---------|
//! | `GET /api/backtest?min_network=&founder_only=&years=` | [`findex_eval::BacktestResult`] |
//! | `GET /api/quotes?min_network=&founder_only=` | list of [`findex_eval::QuoteSummary`] |
//! | `GET /api/scores` | the full catalog |
//! | `GET /api/status` | [`StatusResponse`] |
//! | `GET /healthz` | `ok` |
//!
//! The only hard failure is a missing benchmark series, answered with 503 and
//! `{"error": ...}`. Every other input degrades to an empty or zeroed result.

mod config;
mod error;
mod routes;
mod server;
mod state;
mod warmup;

pub use config::{DEFAULT_PORT, ServiceConfig};
pub use error::ApiError;
pub use routes::{ScreenParams, StatusResponse, build_router};
pub use server::serve;
pub use state::AppState;
pub use warmup::{spawn_warmup, warm_cache};
