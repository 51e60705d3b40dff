//! Command-line arguments and startup configuration.
//!
//! Every option can also come from the environment (or a `.env` file loaded in `main`).
//! The API key has no default and must be supplied one way or the other.
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use quote_common::net::DEFAULT_BASE_URL;
use quote_common::{QuoteError, Result};
use strum_macros::Display;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Fetch latest stock quotes for a list of tickers", long_about = None)]
pub struct Args {
    /// Path to a JSON file with an array of `{"ticker": "..."}` objects.
    #[arg(long, env = "QUOTE_TICKERS_PATH", default_value = "tickers.json")]
    pub path: String,

    /// Access credential for the quote service.
    #[arg(long, env = "QUOTE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the quote service.
    #[arg(long, env = "QUOTE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Output format for each delivered batch.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Refresh every SECS seconds until Ctrl+C instead of running once.
    #[arg(long, value_name = "SECS")]
    pub watch: Option<u64>,

    /// Log how many fetches were dropped per failure kind after each run.
    #[arg(long)]
    pub diagnostics: bool,
}

/// How batches are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[value(rename_all = "lower")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned `SYMBOL  $PRICE` rows.
    Table,
    /// Pretty-printed JSON snapshot.
    Json,
}

/// Validated startup configuration.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub tickers_path: PathBuf,
    pub api_key: String,
    pub base_url: String,
    pub format: OutputFormat,
    pub watch_interval: Option<Duration>,
    pub diagnostics: bool,
}

impl TryFrom<Args> for FetcherConfig {
    type Error = QuoteError;

    fn try_from(args: Args) -> Result<Self> {
        let api_key = args.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(QuoteError::Config("API key must not be empty".into()));
        }
        let watch_interval = match args.watch {
            Some(0) => {
                return Err(QuoteError::Config(
                    "--watch interval must be at least 1 second".into(),
                ));
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        Ok(FetcherConfig {
            tickers_path: normalize_path(&args.path),
            api_key,
            base_url: args.base_url.trim().to_string(),
            format: args.format,
            watch_interval,
            diagnostics: args.diagnostics,
        })
    }
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}
