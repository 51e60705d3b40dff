//! Error types shared by every stage of the quote pipeline.
//!
//! Two families matter to the pipeline:
//! - `LoadError` — the symbol source could not produce a batch. It is surfaced to the
//!   user verbatim and stops the run before any network activity.
//! - `FetchError` — a single symbol's lookup failed. The aggregator swallows these, so
//!   they only ever reach the debug log and the optional run diagnostics.
//!
//! `QuoteError` wraps load failures together with the binary's own failure cases so
//! `main` can propagate a single error type.
use std::io;
use std::path::PathBuf;

use strum_macros::{AsRefStr, Display, EnumIter};
use thiserror::Error;

/// Failure to load the list of symbols to fetch.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The ticker resource does not exist.
    #[error("Ticker file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The ticker resource exists but could not be read.
    #[error("Failed to read ticker file: {0}")]
    Io(#[from] io::Error),

    /// The ticker resource is not a JSON array of `{ "ticker": ... }` objects.
    #[error("Malformed ticker file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Coarse classification of a per-symbol fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    /// No request could be built for the symbol.
    InvalidRequest,
    /// The request did not complete with a 2xx response.
    TransportFailure,
    /// The response body did not contain a usable quote.
    DecodeFailure,
}

/// Terminal failure of one symbol's quote lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// A request could not be constructed (empty symbol, malformed endpoint).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Network error or non-success HTTP status.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Response body did not match the expected envelope.
    #[error("Decode failure: {0}")]
    Decode(String),
}

impl FetchError {
    /// Returns the failure classification used for run diagnostics.
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::InvalidRequest(_) => FailureKind::InvalidRequest,
            FetchError::Transport(_) => FailureKind::TransportFailure,
            FetchError::Decode(_) => FailureKind::DecodeFailure,
        }
    }
}

/// Unified error type for the workspace.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Symbol source failure.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Invalid startup configuration with a human-readable message.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Process plumbing failed (signal handler, output thread); contains a short context string.
    #[error("Runtime error: {0}")]
    Runtime(String),
}
