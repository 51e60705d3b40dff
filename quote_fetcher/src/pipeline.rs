//! Load → aggregate → publish.
//!
//! `QuotePipeline` is the only writer of its `ResultSink`. A load failure is published
//! as the sink's error and the run stops there; a successful load clears any previous
//! error and always ends with exactly one batch delivery, possibly empty.
use std::sync::Arc;

use log::{error, info};

use crate::aggregator::Aggregator;
use crate::client::QuoteClient;
use crate::sink::ResultSink;
use crate::source::SymbolSource;

/// Feeds symbols from `S` through `C` and publishes the outcome to one sink.
pub struct QuotePipeline<S, C> {
    source: S,
    aggregator: Aggregator<C>,
    sink: Arc<ResultSink>,
    diagnostics: bool,
}

impl<S: SymbolSource, C: QuoteClient> QuotePipeline<S, C> {
    pub fn new(source: S, client: C, sink: Arc<ResultSink>) -> Self {
        Self {
            source,
            aggregator: Aggregator::new(client),
            sink,
            diagnostics: false,
        }
    }

    /// Logs a summary of dropped fetches after each run. Off by default.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Runs one full load and fetch cycle.
    ///
    /// Outcomes are only reported through the sink. Concurrent calls are not
    /// coordinated: each one delivers its own batch and the last to finish wins.
    pub async fn refresh(&self) {
        let symbols = match self.source.load().await {
            Ok(symbols) => symbols,
            Err(e) => {
                error!("Failed to load tickers: {}", e);
                self.sink.publish_error(e.to_string());
                return;
            }
        };
        self.sink.clear_error();

        let batch = if self.diagnostics {
            let (batch, report) = self.aggregator.run_with_report(&symbols).await;
            info!("Run diagnostics: {}", report);
            batch
        } else {
            self.aggregator.run(&symbols).await
        };
        self.sink.publish_batch(batch);
    }
}
