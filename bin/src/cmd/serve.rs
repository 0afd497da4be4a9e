//! Serve command implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use findex_api::ServiceConfig;

use crate::settings::Settings;

/// Run the HTTP service until shutdown.
pub(crate) async fn run_serve(settings: &Settings, bind: SocketAddr, prefetch: bool) -> Result<()> {
    let config = ServiceConfig {
        bind,
        benchmark: settings.benchmark.clone(),
        prefetch,
    };
    let state = Arc::new(settings.app_state(config)?);
    findex_api::serve(state).await?;
    Ok(())
}
