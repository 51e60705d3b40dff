//! Decoding of the quote service's `GLOBAL_QUOTE` response.
//!
//! The quote lives in a nested object whose fields are all strings:
//! ```json
//! { "Global Quote": { "01. symbol": "AAPL", "05. price": "150.0000", ... } }
//! ```
//! When throttled or given a bad key, the service still answers 200 but replaces the
//! object with a `Note`, `Information` or `Error Message` field. All of these, and any
//! missing or non-numeric field, are reported as `FetchError::Decode`.
use std::collections::HashMap;
use std::str::FromStr;

use quote_common::net::{FIELD_PRICE, FIELD_SYMBOL};
use quote_common::{FetchError, FetchOutcome, Quote, Symbol};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<HashMap<String, String>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

impl GlobalQuoteResponse {
    fn service_message(&self) -> Option<&str> {
        self.error_message
            .as_deref()
            .or(self.note.as_deref())
            .or(self.information.as_deref())
    }

    fn into_quote(self) -> FetchOutcome {
        let Some(fields) = self.global_quote.as_ref() else {
            let reason = self
                .service_message()
                .unwrap_or("response has no \"Global Quote\" object");
            return Err(FetchError::Decode(reason.to_string()));
        };

        let symbol = fields
            .get(FIELD_SYMBOL)
            .ok_or_else(|| FetchError::Decode(format!("missing field \"{}\"", FIELD_SYMBOL)))?;
        let raw_price = fields
            .get(FIELD_PRICE)
            .ok_or_else(|| FetchError::Decode(format!("missing field \"{}\"", FIELD_PRICE)))?;
        let price = Decimal::from_str(raw_price)
            .map_err(|e| FetchError::Decode(format!("price {:?} is not a number: {}", raw_price, e)))?;

        Quote::new(Symbol::new(symbol.as_str()), price)
    }
}

/// Decodes a response body into a `Quote`.
pub fn decode_quote(body: &[u8]) -> FetchOutcome {
    let response: GlobalQuoteResponse = serde_json::from_slice(body)
        .map_err(|e| FetchError::Decode(format!("unexpected response body: {}", e)))?;
    response.into_quote()
}
