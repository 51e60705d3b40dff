//! Remote quote endpoint constants.

/// Default base URL of the quote service.
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
/// Value of the `function` query parameter selecting the latest-quote lookup.
pub const QUOTE_FUNCTION: &str = "GLOBAL_QUOTE";

/// Query parameter carrying the lookup function.
pub const PARAM_FUNCTION: &str = "function";
/// Query parameter carrying the symbol.
pub const PARAM_SYMBOL: &str = "symbol";
/// Query parameter carrying the access credential.
pub const PARAM_API_KEY: &str = "apikey";

/// Key of the symbol field inside the `"Global Quote"` object.
pub const FIELD_SYMBOL: &str = "01. symbol";
/// Key of the price field inside the `"Global Quote"` object.
pub const FIELD_PRICE: &str = "05. price";
