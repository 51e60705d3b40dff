//! Normalized quote record.
//!
//! A `Quote` pairs a symbol with its latest price. The price is a `Decimal`, so it is
//! always finite; the constructor additionally rejects negative values, which means a
//! `Quote` that exists is always displayable.
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::symbol::Symbol;

/// Latest price for a single symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Quote {
    symbol: Symbol,
    price: Decimal,
}

impl Quote {
    /// Builds a quote, failing with `FetchError::Decode` on a negative price.
    pub fn new(symbol: Symbol, price: Decimal) -> Result<Self, FetchError> {
        if price.is_sign_negative() && !price.is_zero() {
            return Err(FetchError::Decode(format!(
                "negative price {} for {}",
                price, symbol
            )));
        }
        Ok(Quote { symbol, price })
    }

    /// Symbol the quote is for.
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Latest price.
    pub fn price(&self) -> Decimal {
        self.price
    }
}

#[derive(Deserialize)]
struct RawQuote {
    symbol: Symbol,
    price: Decimal,
}

impl<'de> Deserialize<'de> for Quote {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawQuote::deserialize(deserializer)?;
        Quote::new(raw.symbol, raw.price).map_err(serde::de::Error::custom)
    }
}

/// Terminal result of one symbol's lookup.
pub type FetchOutcome = Result<Quote, FetchError>;

/// Successful quotes of one run. The order carries no meaning.
pub type QuoteBatch = Vec<Quote>;
