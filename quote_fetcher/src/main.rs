//! Quote Fetcher — loads a list of tickers from a JSON file, fetches the latest quote
//! for each one from the quote service concurrently, and prints the batch of quotes
//! that came back.
//!
//! Usage example (CLI):
//! ```bash
//! QUOTE_API_KEY=... quote_fetcher --path ./tickers.json --watch 60
//! ```
//!
//! The ticker file is a JSON array such as `[{"ticker": "AAPL"}, {"ticker": "MSFT"}]`.
//! At most 25 tickers are fetched per run; tickers whose lookup fails are left out of
//! the printed batch. See `pipeline` for the run semantics.
#![warn(missing_docs)]
mod aggregator;
mod args;
mod client;
mod display;
mod envelope;
mod pipeline;
mod sink;
mod source;
#[cfg(test)]
mod testing;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::{debug, info};
use quote_common::{QuoteError, Result};
use tokio::sync::Notify;

use crate::args::{Args, FetcherConfig};
use crate::client::{AlphaVantageClient, QuoteClient};
use crate::pipeline::QuotePipeline;
use crate::sink::ResultSink;
use crate::source::{JsonFileSource, SymbolSource};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let dotenv = dotenvy::dotenv();
    init_logger();
    if let Err(e) = dotenv {
        debug!(".env not loaded: {}", e);
    }
    let config = FetcherConfig::try_from(Args::parse())?;
    info!(
        "Fetching quotes from {} for tickers in {}",
        config.base_url,
        config.tickers_path.display()
    );

    let sink = Arc::new(ResultSink::new());
    let printer = display::spawn_printer(sink.subscribe(), config.format);

    let client = AlphaVantageClient::new(&config.base_url, &config.api_key)?;
    let source = JsonFileSource::new(&config.tickers_path);
    let pipeline = QuotePipeline::new(source, client, Arc::clone(&sink))
        .with_diagnostics(config.diagnostics);

    let exit = match config.watch_interval {
        None => {
            pipeline.refresh().await;
            if sink.snapshot().error.is_some() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Some(interval) => {
            watch(&pipeline, interval).await?;
            ExitCode::SUCCESS
        }
    };

    // Dropping the last sink handle disconnects the printer.
    drop(pipeline);
    drop(sink);
    printer
        .join()
        .map_err(|_| QuoteError::Runtime("output thread panicked".into()))?;
    Ok(exit)
}

/// Refreshes every `interval` until Ctrl+C. A run in progress is always completed.
async fn watch<S, C>(pipeline: &QuotePipeline<S, C>, interval: Duration) -> Result<()>
where
    S: SymbolSource,
    C: QuoteClient,
{
    let shutdown = Arc::new(Notify::new());
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down...");
            shutdown.notify_one();
        })
        .map_err(|e| QuoteError::Runtime(format!("failed to set Ctrl+C handler: {}", e)))?;
    }

    info!(
        "Refreshing every {}s. Press Ctrl+C to exit.",
        interval.as_secs()
    );
    loop {
        pipeline.refresh().await;
        tokio::select! {
            _ = shutdown.notified() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
