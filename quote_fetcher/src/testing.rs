//! In-memory doubles for the client and source seams.
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use quote_common::{FetchError, FetchOutcome, LoadError, Quote, Symbol, SymbolBatch};
use rust_decimal::Decimal;
use tokio::sync::{Barrier, Notify};

use crate::client::QuoteClient;
use crate::source::SymbolSource;

pub fn symbols(names: &[&str]) -> SymbolBatch {
    names.iter().map(|n| Symbol::new(*n)).collect()
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Answers from a fixed price table and records every symbol it was asked for.
/// Symbols missing from the table fail with a transport error.
#[derive(Default)]
pub struct FakeClient {
    prices: HashMap<String, Decimal>,
    invalid: Vec<String>,
    calls: Mutex<Vec<Symbol>>,
    barrier: Option<Barrier>,
    gate: Option<(String, Notify)>,
    delay: Option<Duration>,
}

impl FakeClient {
    pub fn with_prices(prices: &[(&str, &str)]) -> Self {
        Self {
            prices: prices
                .iter()
                .map(|(s, p)| (s.to_string(), dec(p)))
                .collect(),
            ..Self::default()
        }
    }

    /// Every fetch waits until `n` fetches are in flight at once.
    pub fn with_barrier(mut self, n: usize) -> Self {
        self.barrier = Some(Barrier::new(n));
        self
    }

    /// Fetches of `symbol` block until `release` is called.
    pub fn with_gate(mut self, symbol: &str) -> Self {
        self.gate = Some((symbol.to_string(), Notify::new()));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Symbols that fail as if no request could be built.
    pub fn with_invalid(mut self, names: &[&str]) -> Self {
        self.invalid = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn release(&self) {
        if let Some((_, notify)) = &self.gate {
            notify.notify_one();
        }
    }

    pub fn calls(&self) -> Vec<Symbol> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteClient for FakeClient {
    async fn fetch(&self, symbol: &Symbol) -> FetchOutcome {
        self.calls.lock().unwrap().push(symbol.clone());

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if let Some((gated, notify)) = &self.gate {
            if gated == symbol.as_str() {
                notify.notified().await;
            }
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.invalid.iter().any(|s| s == symbol.as_str()) {
            return Err(FetchError::InvalidRequest(format!("rejected {}", symbol)));
        }
        match self.prices.get(symbol.as_str()) {
            Some(price) => Quote::new(symbol.clone(), *price),
            None => Err(FetchError::Transport(format!("no quote for {}", symbol))),
        }
    }
}

/// Returns queued load results in order, then empty batches.
#[derive(Default)]
pub struct FakeSource {
    results: Mutex<Vec<Result<SymbolBatch, LoadError>>>,
}

impl FakeSource {
    pub fn new(results: Vec<Result<SymbolBatch, LoadError>>) -> Self {
        let mut results = results;
        results.reverse();
        Self {
            results: Mutex::new(results),
        }
    }
}

#[async_trait]
impl SymbolSource for FakeSource {
    async fn load(&self) -> Result<SymbolBatch, LoadError> {
        self.results.lock().unwrap().pop().unwrap_or_else(|| Ok(Vec::new()))
    }
}
