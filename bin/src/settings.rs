//! Runtime settings shared by every subcommand.
//!
//! Each option can also be set through the environment (or a `.env` file).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use findex_api::{AppState, ServiceConfig};
use findex_data::{FetcherConfig, PriceCache, PriceFetcher};
use findex_screen::{Catalog, DEFAULT_BENCHMARK};
use findex_traits::LOOKBACK_YEARS;
use findex_yahoo::{YAHOO_BASE_URL, YahooClient};

#[derive(Debug, Args)]
pub(crate) struct Settings {
    /// Benchmark symbol
    #[arg(long, global = true, env = "FINDEX_BENCHMARK", default_value = DEFAULT_BENCHMARK)]
    pub(crate) benchmark: String,

    /// Catalog JSON file replacing the bundled catalog
    #[arg(long, global = true, env = "FINDEX_CATALOG")]
    catalog: Option<PathBuf>,

    /// Seconds a cached price series stays fresh
    #[arg(long, global = true, env = "FINDEX_CACHE_TTL_SECS", default_value_t = 3600)]
    cache_ttl_secs: u64,

    /// Seconds allowed for one upstream request
    #[arg(long, global = true, env = "FINDEX_FETCH_TIMEOUT_SECS", default_value_t = 60)]
    fetch_timeout_secs: u64,

    /// Symbols fetched concurrently
    #[arg(
        long,
        global = true,
        env = "FINDEX_BATCH_SIZE",
        default_value_t = 5,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    batch_size: u32,

    /// Quote provider base URL
    #[arg(long, global = true, env = "FINDEX_YAHOO_URL", default_value = YAHOO_BASE_URL)]
    yahoo_url: String,
}

impl Settings {
    /// Load the configured catalog, or the bundled one.
    pub(crate) fn catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => Catalog::from_path(path)
                .with_context(|| format!("loading catalog from {}", path.display())),
            None => Catalog::embedded().context("loading bundled catalog"),
        }
    }

    fn fetcher(&self) -> PriceFetcher<YahooClient> {
        let config = FetcherConfig {
            lookback_years: LOOKBACK_YEARS,
            request_timeout: Duration::from_secs(self.fetch_timeout_secs),
            batch_size: self.batch_size as usize,
        };
        PriceFetcher::new(
            YahooClient::with_base_url(self.yahoo_url.as_str()),
            PriceCache::with_ttl(Duration::from_secs(self.cache_ttl_secs)),
            config,
        )
    }

    /// Build the application state over the Yahoo provider.
    pub(crate) fn app_state(&self, config: ServiceConfig) -> Result<AppState<YahooClient>> {
        Ok(AppState::new(self.fetcher(), self.catalog()?, config))
    }

    /// Service configuration for in-process reports.
    pub(crate) fn report_config(&self) -> ServiceConfig {
        ServiceConfig {
            benchmark: self.benchmark.clone(),
            prefetch: false,
            ..ServiceConfig::default()
        }
    }
}
