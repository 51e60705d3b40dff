//! Console output of sink events.
//!
//! The printer runs on its own thread and drains a sink subscription until every
//! sender is gone, i.e. until the sink is dropped.
use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use log::error;
use quote_common::Quote;
use rust_decimal::RoundingStrategy;

use crate::args::OutputFormat;
use crate::sink::{SinkEvent, SinkSnapshot};

/// Sorts quotes by symbol. Batches carry no order of their own.
fn display_order(quotes: &[Quote]) -> Vec<&Quote> {
    let mut sorted: Vec<&Quote> = quotes.iter().collect();
    sorted.sort_by(|a, b| a.symbol().cmp(b.symbol()));
    sorted
}

/// Renders one snapshot as `SYMBOL  $PRICE` rows.
pub fn render_table(snapshot: &SinkSnapshot) -> String {
    let mut out = String::new();
    if let Some(updated_at) = snapshot.updated_at {
        out.push_str(&format!("Stock Market (updated {})\n", updated_at.format("%Y-%m-%d %H:%M:%S UTC")));
    }
    if snapshot.quotes.is_empty() {
        out.push_str("No quotes received\n");
        return out;
    }
    for quote in display_order(&snapshot.quotes) {
        let price = quote
            .price()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        out.push_str(&format!("{:<10} ${:.2}\n", quote.symbol().as_str(), price));
    }
    out
}

/// Renders one snapshot as pretty JSON with quotes in display order.
pub fn render_json(snapshot: &SinkSnapshot) -> serde_json::Result<String> {
    let ordered = SinkSnapshot {
        quotes: display_order(&snapshot.quotes).into_iter().cloned().collect(),
        error: snapshot.error.clone(),
        updated_at: snapshot.updated_at,
    };
    serde_json::to_string_pretty(&ordered)
}

/// Spawns the thread printing batches to stdout and errors to stderr.
pub fn spawn_printer(events: Receiver<SinkEvent>, format: OutputFormat) -> JoinHandle<()> {
    thread::spawn(move || {
        for event in events.iter() {
            match event {
                SinkEvent::BatchDelivered(snapshot) => match format {
                    OutputFormat::Table => print!("{}", render_table(&snapshot)),
                    OutputFormat::Json => match render_json(&snapshot) {
                        Ok(json) => println!("{}", json),
                        Err(e) => error!("Failed to serialize snapshot: {}", e),
                    },
                },
                SinkEvent::ErrorChanged(Some(message)) => eprintln!("{}", message),
                SinkEvent::ErrorChanged(None) => {}
            }
        }
    })
}
