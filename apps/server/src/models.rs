use quotedeck_market_data::QuoteSummary;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Body of `POST /api/quote`.
///
/// The ticker is kept loose so a wrong type is reported as a missing
/// ticker rather than a deserialization failure.
#[derive(Debug, Deserialize, ToSchema)]
pub struct QuoteRequest {
    #[schema(value_type = Option<String>)]
    pub ticker: Option<Value>,
}

/// Body of `POST /api/quotes`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct QuotesRequest {
    #[schema(value_type = Option<Vec<String>>)]
    pub tickers: Option<Value>,
}

/// Data handed to the stock detail page. Exactly one field is set.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StockPageData {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub quote: Option<QuoteSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StockPageData {
    pub fn loaded(quote: QuoteSummary) -> Self {
        Self {
            quote: Some(quote),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            quote: None,
            error: Some(message.into()),
        }
    }
}
