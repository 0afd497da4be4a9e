//! Server lifecycle.

use std::sync::Arc;

use findex_traits::QuoteProvider;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::routes::build_router;
use crate::state::AppState;
use crate::warmup::spawn_warmup;

/// Bind the configured address and serve until Ctrl+C or SIGTERM.
///
/// When prefetch is enabled the cache warm-up runs in the background; the
/// server accepts requests immediately.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or serving fails.
pub async fn serve<P: QuoteProvider + 'static>(state: Arc<AppState<P>>) -> std::io::Result<()> {
    let addr = state.config().bind;
    if state.config().prefetch {
        spawn_warmup(Arc::clone(&state));
    }

    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        stocks = state.catalog().len(),
        benchmark = state.benchmark(),
        "findex listening"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
