use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use futures::future::try_join_all;
use quotedeck_core::{check_ticker_length, ValidationError};
use quotedeck_market_data::{ErrorKind, MarketDataError, Quote};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{QuoteRequest, QuotesRequest},
};

const TICKER_REQUIRED: &str = "Ticker symbol is required";
const TICKERS_REQUIRED: &str = "Valid ticker symbols are required";
const TICKERS_LENGTH: &str = "Ticker symbols must be 1-10 characters";
const QUOTE_NOT_FOUND: &str = "Stock not found or invalid ticker";

/// Latest quote for one ticker, passed through untouched.
#[utoipa::path(
    post,
    path = "/api/quote",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Provider quote"),
        (status = 400, body = crate::error::ErrorBody),
        (status = 500, body = crate::error::ErrorBody)
    )
)]
pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<Quote>> {
    let request: QuoteRequest = parse_body(&body)?;
    let ticker = match request.ticker {
        Some(Value::String(ticker)) if !ticker.is_empty() => ticker,
        _ => return Err(ApiError::BadRequest(TICKER_REQUIRED.to_string())),
    };

    debug!("Single quote lookup for {}", ticker);
    let quote = state.provider.quote(&ticker).await?;
    Ok(Json(quote))
}

/// Latest quotes for several tickers, in request order.
#[utoipa::path(
    post,
    path = "/api/quotes",
    request_body = QuotesRequest,
    responses(
        (status = 200, description = "Provider quotes in request order"),
        (status = 400, body = crate::error::ErrorBody),
        (status = 404, body = crate::error::ErrorBody),
        (status = 429, body = crate::error::ErrorBody),
        (status = 500, body = crate::error::ErrorBody)
    )
)]
pub async fn get_quotes(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<Vec<Quote>>> {
    let request: QuotesRequest = parse_body(&body)?;
    let tickers = parse_tickers(request.tickers)?;

    let lookups = tickers.iter().map(|ticker| state.provider.quote(ticker));
    let quotes = try_join_all(lookups).await.map_err(|err| {
        error!("Quote lookup for {:?} failed: {}", tickers, err);
        classify(&err)
    })?;

    if quotes.iter().any(|quote| quote.symbol().is_none()) {
        error!("Provider returned a quote without a symbol for {:?}", tickers);
        return Err(ApiError::NotFound(QUOTE_NOT_FOUND.to_string()));
    }

    Ok(Json(quotes))
}

/// Decodes a JSON request body whatever its declared content type.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body)
        .map_err(|err| ApiError::BadRequest(format!("Invalid JSON body: {}", err)))
}

/// Sanitizes the `tickers` field into a non-empty list of symbols.
pub(crate) fn parse_tickers(tickers: Option<Value>) -> ApiResult<Vec<String>> {
    let raw = match tickers {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(ApiError::BadRequest(TICKERS_REQUIRED.to_string())),
    };

    raw.iter()
        .map(|item| {
            let ticker = item
                .as_str()
                .ok_or_else(|| ApiError::BadRequest(TICKERS_REQUIRED.to_string()))?;
            check_ticker_length(ticker).map_err(|err| match err {
                ValidationError::Empty | ValidationError::TooLong => {
                    ApiError::BadRequest(TICKERS_LENGTH.to_string())
                }
                other => ApiError::BadRequest(other.to_string()),
            })
        })
        .collect()
}

fn classify(err: &MarketDataError) -> ApiError {
    match err.kind() {
        ErrorKind::NotFound => ApiError::NotFound("Stock ticker not found".to_string()),
        ErrorKind::RateLimited => ApiError::RateLimited(
            "Rate limit exceeded. Please try again later.".to_string(),
        ),
        ErrorKind::Upstream => ApiError::Internal("Failed to fetch stock data".to_string()),
    }
}
