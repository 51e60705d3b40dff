//! Where the symbols to fetch come from.
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use log::info;
use quote_common::{LoadError, Symbol, SymbolBatch, SymbolParser};

/// Produces a fresh batch of symbols on every call.
#[async_trait]
pub trait SymbolSource: Send + Sync {
    /// An intentionally empty list is `Ok(vec![])`, never an error.
    async fn load(&self) -> Result<SymbolBatch, LoadError>;
}

/// Reads the ticker JSON file from disk on each load.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SymbolSource for JsonFileSource {
    async fn load(&self) -> Result<SymbolBatch, LoadError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                LoadError::NotFound(self.path.clone())
            } else {
                LoadError::Io(e)
            }
        })?;
        let symbols = Symbol::parse_from_reader(bytes.as_slice())?;
        info!("Loaded {} tickers from {}", symbols.len(), self.path.display());
        Ok(symbols)
    }
}
