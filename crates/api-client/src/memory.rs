// In crates/api-client/src/memory.rs

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use core_types::{Interval, Period, Series, Symbol};

use crate::error::{Error, Result};
use crate::PriceHistoryProvider;

#[derive(Debug, Clone)]
enum Entry {
    Series { series: Series, delay: Duration },
    Failure(String),
}

/// A provider backed by series held in memory.
///
/// Used for offline runs and tests. Symbols that were never added are
/// reported as unavailable, like a delisted ticker would be.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    entries: HashMap<Symbol, Entry>,
    fetch_counts: Mutex<HashMap<Symbol, usize>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: &str, series: Series) -> Self {
        self.insert(symbol, Entry::Series { series, delay: Duration::ZERO });
        self
    }

    /// Like `with_series`, but the fetch completes only after `delay`.
    pub fn with_delayed_series(mut self, symbol: &str, series: Series, delay: Duration) -> Self {
        self.insert(symbol, Entry::Series { series, delay });
        self
    }

    /// Makes every fetch of `symbol` fail with `reason`.
    pub fn with_failure(mut self, symbol: &str, reason: &str) -> Self {
        self.insert(symbol, Entry::Failure(reason.to_string()));
        self
    }

    /// How many times `symbol` has been fetched so far.
    pub fn fetch_count(&self, symbol: &str) -> usize {
        let counts = self.fetch_counts.lock().unwrap_or_else(|e| e.into_inner());
        counts.get(&Symbol(symbol.to_string())).copied().unwrap_or(0)
    }

    /// The most fetches that were ever running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn insert(&mut self, symbol: &str, entry: Entry) {
        self.entries.insert(Symbol(symbol.to_string()), entry);
    }
}

/// Counts a running fetch until dropped, including when a timeout cancels it.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(provider: &'a InMemoryProvider) -> Self {
        let now = provider.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        provider.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        Self(&provider.in_flight)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PriceHistoryProvider for InMemoryProvider {
    fn name(&self) -> &'static str {
        "InMemory"
    }

    async fn fetch(&self, symbol: &Symbol, _interval: Interval, _period: Period) -> Result<Series> {
        {
            let mut counts = self.fetch_counts.lock().unwrap_or_else(|e| e.into_inner());
            *counts.entry(symbol.clone()).or_default() += 1;
        }
        let _guard = InFlight::enter(self);

        match self.entries.get(symbol) {
            Some(Entry::Series { series, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                Ok(series.clone())
            }
            Some(Entry::Failure(reason)) => Err(Error::Unavailable {
                symbol: symbol.0.clone(),
                reason: reason.clone(),
            }),
            None => Err(Error::Unavailable {
                symbol: symbol.0.clone(),
                reason: "unknown symbol".to_string(),
            }),
        }
    }
}
