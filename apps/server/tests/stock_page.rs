mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{get, router, upstream, StubProvider};
use quotedeck_market_data::SummaryModule;
use quotedeck_server::api::load_stock_page;
use serde_json::json;

#[tokio::test]
async fn loads_company_breakdown_in_one_call() {
    let provider = StubProvider::default();

    let page = load_stock_page(&provider, " msft ").await;
    assert!(page.error.is_none());
    let summary = page.quote.unwrap();
    assert_eq!(
        summary.module(SummaryModule::FinancialData),
        Some(&json!({ "symbol": "MSFT" }))
    );

    assert_eq!(provider.calls(), vec!["MSFT".to_string()]);
    let requested = provider.summary_modules.lock().unwrap().clone();
    assert_eq!(requested, vec![SummaryModule::COMPANY_BREAKDOWN.to_vec()]);
}

#[tokio::test]
async fn invalid_ticker_is_reported_in_band() {
    let provider = StubProvider::default();

    for ticker in ["", "   ", "ABCDEFGHIJK"] {
        let page = load_stock_page(&provider, ticker).await;
        assert!(page.quote.is_none());
        assert_eq!(
            page.error.as_deref(),
            Some("Ticker symbol must be 1-10 characters")
        );
    }
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn provider_failure_is_reported_in_band() {
    let provider = StubProvider::default().failing("DOWN", upstream);

    let page = load_stock_page(&provider, "down").await;
    assert!(page.quote.is_none());
    assert_eq!(
        page.error.as_deref(),
        Some("Failed to fetch company breakdown data")
    );
}

#[tokio::test]
async fn stock_route_always_answers_ok() {
    let provider = Arc::new(StubProvider::default().failing("DOWN", upstream));
    let app = router(provider);

    let (status, body) = get(&app, "/api/stock/aapl").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["financialData"], json!({ "symbol": "AAPL" }));
    assert!(body.get("error").is_none());

    let (status, body) = get(&app, "/api/stock/DOWN").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "Failed to fetch company breakdown data" }));

    let (status, body) = get(&app, "/api/stock/ABCDEFGHIJK").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "Ticker symbol must be 1-10 characters" }));
}
