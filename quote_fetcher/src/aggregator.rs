//! Fan-out/fan-in of quote lookups.
//!
//! One run takes at most `MAX_SYMBOLS_PER_RUN` symbols, issues one fetch per symbol,
//! waits for every fetch to reach a terminal outcome and keeps only the successes.
//! Failures never leave this module as errors: they are logged at debug level and
//! counted in the `RunReport`, which callers may inspect or ignore.
//!
//! All fetches of a run are polled concurrently on the calling task, so a slow symbol
//! never delays the start of another. Nothing is shared between runs; two overlapping
//! runs on the same aggregator are fully independent.
use std::collections::BTreeMap;
use std::fmt;

use futures::future::join_all;
use log::{debug, info};
use quote_common::{FailureKind, QuoteBatch, Symbol};

use crate::client::QuoteClient;

/// Hard cap on the number of symbols fetched in one run.
pub const MAX_SYMBOLS_PER_RUN: usize = 25;

/// What happened to the fetches of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Fetches issued (input length after the cap).
    pub launched: usize,
    /// Symbols left out by the cap.
    pub skipped: usize,
    /// Quotes that made it into the batch.
    pub delivered: usize,
    /// Dropped fetches, per failure kind.
    pub dropped: BTreeMap<FailureKind, usize>,
}

impl RunReport {
    /// Number of fetches dropped across all failure kinds.
    pub fn dropped_total(&self) -> usize {
        self.dropped.values().sum()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} fetches dropped",
            self.dropped_total(),
            self.launched
        )?;
        for (kind, count) in &self.dropped {
            write!(f, ", {}={}", kind, count)?;
        }
        if self.skipped > 0 {
            write!(f, " ({} symbols over the cap skipped)", self.skipped)?;
        }
        Ok(())
    }
}

/// Runs one concurrent lookup per symbol through `C`.
#[derive(Debug, Clone)]
pub struct Aggregator<C> {
    client: C,
}

impl<C: QuoteClient> Aggregator<C> {
    /// Wraps the client every lookup goes through.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Fetches the first `MAX_SYMBOLS_PER_RUN` symbols and returns the successes.
    pub async fn run(&self, symbols: &[Symbol]) -> QuoteBatch {
        self.run_with_report(symbols).await.0
    }

    /// Same as [`Self::run`], also reporting how many fetches were dropped and why.
    pub async fn run_with_report(&self, symbols: &[Symbol]) -> (QuoteBatch, RunReport) {
        let retained = &symbols[..symbols.len().min(MAX_SYMBOLS_PER_RUN)];
        let mut report = RunReport {
            launched: retained.len(),
            skipped: symbols.len() - retained.len(),
            ..RunReport::default()
        };
        if retained.is_empty() {
            info!("No tickers to fetch");
            return (QuoteBatch::new(), report);
        }
        if report.skipped > 0 {
            info!(
                "Fetching the first {} of {} tickers",
                retained.len(),
                symbols.len()
            );
        }

        let fetches = retained.iter().map(|symbol| async move {
            debug!("Requesting stock data for {}", symbol);
            (symbol, self.client.fetch(symbol).await)
        });
        let outcomes = join_all(fetches).await;

        let mut batch = QuoteBatch::with_capacity(outcomes.len());
        for (symbol, outcome) in outcomes {
            match outcome {
                Ok(quote) => batch.push(quote),
                Err(e) => {
                    debug!("Dropping {}: {}", symbol, e);
                    *report.dropped.entry(e.kind()).or_default() += 1;
                }
            }
        }
        report.delivered = batch.len();
        info!("Received {} quotes for {} tickers", batch.len(), retained.len());
        (batch, report)
    }
}
