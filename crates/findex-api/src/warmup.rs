//! Startup cache warm-up.

use std::sync::Arc;

use findex_traits::QuoteProvider;
use tokio::task::JoinHandle;
use tracing::info;

use crate::state::AppState;

/// Fetch every catalog symbol plus the benchmark into the price cache.
///
/// Returns the number of symbols that ended up with a series.
pub async fn warm_cache<P: QuoteProvider>(state: &AppState<P>) -> usize {
    let mut symbols = state.catalog().symbols();
    if !symbols.iter().any(|s| s == state.benchmark()) {
        symbols.push(state.benchmark().to_string());
    }

    info!(symbols = symbols.len(), "warming price cache");
    let prices = state.fetcher().fetch_all(&symbols).await;
    info!(
        cached = prices.len(),
        requested = symbols.len(),
        "price cache warm"
    );
    prices.len()
}

/// Run [`warm_cache`] in a background task.
pub fn spawn_warmup<P: QuoteProvider + 'static>(state: Arc<AppState<P>>) -> JoinHandle<usize> {
    tokio::spawn(async move { warm_cache(&state).await })
}
