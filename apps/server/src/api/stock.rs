use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use quotedeck_core::check_ticker_length;
use quotedeck_market_data::{QuoteProvider, SummaryModule};
use tracing::error;

use crate::{main_lib::AppState, models::StockPageData};

const INVALID_TICKER: &str = "Ticker symbol must be 1-10 characters";
const LOAD_FAILED: &str = "Failed to fetch company breakdown data";

/// Loads the company breakdown shown on the stock detail page.
///
/// Never fails: problems are reported in-band through
/// [`StockPageData::error`].
pub async fn load_stock_page(provider: &dyn QuoteProvider, ticker: &str) -> StockPageData {
    let ticker = match check_ticker_length(ticker) {
        Ok(ticker) => ticker,
        Err(_) => return StockPageData::failed(INVALID_TICKER),
    };

    match provider
        .quote_summary(&ticker, &SummaryModule::COMPANY_BREAKDOWN)
        .await
    {
        Ok(summary) => StockPageData::loaded(summary),
        Err(err) => {
            error!("Company breakdown for {} failed: {}", ticker, err);
            StockPageData::failed(LOAD_FAILED)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/stock/{ticker}",
    params(("ticker" = String, Path, description = "Ticker symbol")),
    responses((status = 200, description = "Page data with either quote or error", body = StockPageData))
)]
pub async fn get_stock_page(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Json<StockPageData> {
    Json(load_stock_page(state.provider.as_ref(), &ticker).await)
}
