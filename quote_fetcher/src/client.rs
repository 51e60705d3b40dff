//! Single-symbol quote lookup.
//!
//! `QuoteClient` is the seam the aggregator fans out over. `AlphaVantageClient` is the
//! HTTP implementation: one GET per call, no retries, transport default timeouts.
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use quote_common::net::{PARAM_API_KEY, PARAM_FUNCTION, PARAM_SYMBOL, QUOTE_FUNCTION};
use quote_common::{FetchError, FetchOutcome, QuoteError, Result, Symbol};
use reqwest::{Client, Url};

use crate::envelope::decode_quote;

/// Fetches the latest quote for one symbol.
#[async_trait]
pub trait QuoteClient: Send + Sync {
    /// Every failure is terminal for this symbol; there is no partial outcome.
    async fn fetch(&self, symbol: &Symbol) -> FetchOutcome;
}

#[async_trait]
impl<T: QuoteClient + ?Sized> QuoteClient for Arc<T> {
    async fn fetch(&self, symbol: &Symbol) -> FetchOutcome {
        (**self).fetch(symbol).await
    }
}

/// HTTP client for the `GLOBAL_QUOTE` endpoint.
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageClient {
    /// Creates a client for `base_url`, authenticating every request with `api_key`.
    ///
    /// The base URL is not validated here; a malformed one makes each fetch fail
    /// with `FetchError::InvalidRequest`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| QuoteError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    fn request_url(&self, symbol: &Symbol) -> Result<Url, FetchError> {
        if symbol.is_empty() {
            return Err(FetchError::InvalidRequest("empty symbol".to_string()));
        }
        Url::parse_with_params(
            &self.base_url,
            &[
                (PARAM_FUNCTION, QUOTE_FUNCTION),
                (PARAM_SYMBOL, symbol.as_str()),
                (PARAM_API_KEY, self.api_key.as_str()),
            ],
        )
        .map_err(|e| {
            FetchError::InvalidRequest(format!("cannot build request for {}: {}", symbol, e))
        })
    }
}

#[async_trait]
impl QuoteClient for AlphaVantageClient {
    async fn fetch(&self, symbol: &Symbol) -> FetchOutcome {
        let url = self.request_url(symbol)?;
        debug!("Requesting quote for {}", symbol);

        // Errors are stripped of their URL so the API key never reaches the logs.
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!("HTTP {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;
        decode_quote(&body)
    }
}
