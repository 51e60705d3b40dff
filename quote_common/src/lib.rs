//!
//! Common types shared by every stage of the quote fetcher.
//!
//! This crate aggregates:
//! - `error` — `LoadError`, `FetchError` and the unified `QuoteError`.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `symbol` — ticker symbols and the ticker file parser.
//! - `quote` — the validated `Quote` record and batch aliases.
//! - `net` — remote endpoint constants.
#![warn(missing_docs)]
pub mod error;
pub mod net;
pub mod quote;
pub mod result;
pub mod symbol;

pub use error::{FailureKind, FetchError, LoadError, QuoteError};
pub use quote::{FetchOutcome, Quote, QuoteBatch};
pub use result::Result;
pub use symbol::{Symbol, SymbolBatch, SymbolParser};
