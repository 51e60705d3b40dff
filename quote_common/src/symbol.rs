//! Ticker symbols and parsing of the ticker file.
//!
//! A `Symbol` is an opaque, case-sensitive identifier. Nothing here validates its
//! format; an empty symbol is representable and is rejected later, when a request
//! has to be built for it.
use std::fmt;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Identifier of a tradable instrument (e.g., `AAPL`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Wraps the given identifier as-is.
    pub fn new(value: impl Into<String>) -> Self {
        Symbol(value.into())
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when the identifier is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol::new(value)
    }
}

/// Ordered sequence of symbols produced by one load.
pub type SymbolBatch = Vec<Symbol>;

/// One record of the ticker file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerEntry {
    /// Ticker symbol.
    pub ticker: String,
}

impl From<TickerEntry> for Symbol {
    fn from(entry: TickerEntry) -> Self {
        Symbol(entry.ticker)
    }
}

/// Trait providing ticker file parsing.
pub trait SymbolParser {
    /// Parses a JSON array of `{ "ticker": "..." }` objects.
    ///
    /// Order and duplicates are preserved. An empty array is a valid, empty batch;
    /// anything that is not such an array is a `LoadError::Malformed`.
    fn parse_from_reader<R: Read>(reader: R) -> Result<SymbolBatch, LoadError>;
}

impl SymbolParser for Symbol {
    fn parse_from_reader<R: Read>(reader: R) -> Result<SymbolBatch, LoadError> {
        let entries: Vec<TickerEntry> = serde_json::from_reader(reader)?;
        Ok(entries.into_iter().map(Symbol::from).collect())
    }
}
