//! In-memory quote provider.
//!
//! Serves fixed series from memory and records how it was called. Used as a
//! stand-in for the network provider in tests. Other crates enable it with
//! the `test-util` feature.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use findex_traits::{FindexError, PriceSeries, QuoteProvider, Result, Symbol};
use tokio::time::Instant;

/// A [`QuoteProvider`] backed by a symbol → series map.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    series: Mutex<HashMap<Symbol, PriceSeries>>,
    failing: Mutex<HashSet<Symbol>>,
    calls: Mutex<HashMap<Symbol, usize>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    started: Mutex<HashMap<Symbol, Instant>>,
    finished: Mutex<HashMap<Symbol, Instant>>,
    latency: Duration,
    symbol_latency: HashMap<Symbol, Duration>,
}

impl MemoryProvider {
    /// Create an empty provider; every symbol is unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `series` for `symbol`.
    #[must_use]
    pub fn with_series(self, symbol: &str, series: PriceSeries) -> Self {
        self.set_series(symbol, series);
        self
    }

    /// Delay every response by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Delay responses for `symbol` by `latency`, overriding [`Self::with_latency`].
    #[must_use]
    pub fn with_symbol_latency(mut self, symbol: &str, latency: Duration) -> Self {
        self.symbol_latency.insert(symbol.to_string(), latency);
        self
    }

    /// Replace the series served for `symbol`.
    pub fn set_series(&self, symbol: &str, series: PriceSeries) {
        self.series
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(symbol.to_string(), series);
    }

    /// Make every request for `symbol` fail until [`Self::recover`].
    pub fn fail(&self, symbol: &str) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(symbol.to_string());
    }

    /// Undo [`Self::fail`].
    pub fn recover(&self, symbol: &str) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(symbol);
    }

    /// Total number of requests served, failed or not.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .sum()
    }

    /// Number of requests made for `symbol`.
    #[must_use]
    pub fn calls_for(&self, symbol: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(symbol)
            .copied()
            .unwrap_or(0)
    }

    /// Highest number of requests that were in flight at once.
    #[must_use]
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// When the latest request for `symbol` started.
    #[must_use]
    pub fn started_at(&self, symbol: &str) -> Option<Instant> {
        self.started
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(symbol)
            .copied()
    }

    /// When the latest request for `symbol` finished.
    #[must_use]
    pub fn finished_at(&self, symbol: &str) -> Option<Instant> {
        self.finished
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(symbol)
            .copied()
    }

    fn latency_for(&self, symbol: &str) -> Duration {
        self.symbol_latency
            .get(symbol)
            .copied()
            .unwrap_or(self.latency)
    }

    fn respond(&self, symbol: &str) -> Result<PriceSeries> {
        if self
            .failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(symbol)
        {
            return Err(FindexError::provider(symbol, "simulated outage"));
        }
        self.series
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(symbol)
            .cloned()
            .ok_or_else(|| FindexError::provider(symbol, "unknown symbol"))
    }
}

impl QuoteProvider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    async fn monthly_history(&self, symbol: &str, _years: u32) -> Result<PriceSeries> {
        *self
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(symbol.to_string())
            .or_default() += 1;

        self.started
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(symbol.to_string(), Instant::now());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        let latency = self.latency_for(symbol);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.finished
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(symbol.to_string(), Instant::now());

        self.respond(symbol)
    }
}
