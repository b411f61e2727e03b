//! Yahoo Finance API response envelopes.
//!
//! Both the quote and the quoteSummary endpoints wrap their payload in
//! `{ "<name>": { "result": [...], "error": {...} } }`. Only the envelope is
//! typed; the entries themselves stay opaque.

use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{Quote, QuoteSummary};

use super::PROVIDER_ID;

/// Error code Yahoo uses for unknown symbols.
const NOT_FOUND_CODE: &str = "Not Found";

/// Response wrapper for the v7 quote API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteResponse {
    pub quote_response: YahooResultSet<Quote>,
}

/// Response wrapper for the v10 quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResponse {
    pub quote_summary: YahooResultSet<QuoteSummary>,
}

/// Result container shared by both APIs
#[derive(Debug, Deserialize)]
pub struct YahooResultSet<T> {
    #[serde(default = "Option::default")]
    pub result: Option<Vec<T>>,
    #[serde(default)]
    pub error: Option<YahooApiError>,
}

/// Error object embedded in a response body
#[derive(Debug, Deserialize)]
pub struct YahooApiError {
    pub code: Option<String>,
    pub description: Option<String>,
}

impl<T> YahooResultSet<T> {
    /// Takes the first entry, turning embedded errors and empty results
    /// into [`MarketDataError`]s.
    pub fn into_first(self, symbol: &str) -> Result<T, MarketDataError> {
        if let Some(error) = self.error {
            if error.code.as_deref() == Some(NOT_FOUND_CODE) {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            let message = error
                .description
                .or(error.code)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(MarketDataError::provider(PROVIDER_ID, message));
        }

        self.result
            .and_then(|entries| entries.into_iter().next())
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }
}
