//! Service configuration.

use std::net::{Ipv4Addr, SocketAddr};

use findex_screen::DEFAULT_BENCHMARK;
use findex_traits::Symbol;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8457;

/// Settings of the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Address to listen on
    pub bind: SocketAddr,
    /// Benchmark symbol compared against and excluded from screens
    pub benchmark: Symbol,
    /// Warm the price cache in the background at startup
    pub prefetch: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            benchmark: DEFAULT_BENCHMARK.to_string(),
            prefetch: true,
        }
    }
}
