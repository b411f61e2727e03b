mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{not_found, post_json, rate_limited, router, send, upstream, StubProvider};
use serde_json::json;

#[tokio::test]
async fn single_quote_is_passed_through() {
    let provider = Arc::new(StubProvider::default().with_quote(
        "aapl",
        json!({ "symbol": "AAPL", "regularMarketPrice": 189.5, "currency": "USD" }),
    ));
    let app = router(provider.clone());

    let (status, body) = post_json(&app, "/api/quote", r#"{"ticker":"aapl"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "symbol": "AAPL", "regularMarketPrice": 189.5, "currency": "USD" })
    );
    // Forwarded as sent, without sanitizing.
    assert_eq!(provider.calls(), vec!["aapl".to_string()]);
}

#[tokio::test]
async fn single_quote_requires_ticker() {
    let provider = Arc::new(StubProvider::default());
    let app = router(provider.clone());

    for body in [r#"{}"#, r#"{"ticker":null}"#, r#"{"ticker":""}"#, r#"{"ticker":false}"#] {
        let (status, body) = post_json(&app, "/api/quote", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "code": 400, "message": "Ticker symbol is required" }));
    }
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn single_quote_failure_is_server_error() {
    let provider = Arc::new(StubProvider::default().failing("NOPE", not_found));
    let app = router(provider);

    let (status, body) = post_json(&app, "/api/quote", r#"{"ticker":"NOPE"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 500);
    assert_eq!(body["message"], "Not found: NOPE");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = router(Arc::new(StubProvider::default()));

    let (status, body) = post_json(&app, "/api/quotes", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn batch_returns_quotes_in_request_order() {
    let provider = Arc::new(StubProvider::default());
    let app = router(provider.clone());

    let (status, body) =
        post_json(&app, "/api/quotes", r#"{"tickers":[" msft","aapl ","GOOG"]}"#).await;
    assert_eq!(status, StatusCode::OK);
    let symbols: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["symbol"].as_str().unwrap())
        .collect();
    assert_eq!(symbols, vec!["MSFT", "AAPL", "GOOG"]);

    let mut calls = provider.calls();
    calls.sort();
    assert_eq!(calls, vec!["AAPL", "GOOG", "MSFT"]);
}

#[tokio::test]
async fn batch_rejects_bad_input_before_lookup() {
    let provider = Arc::new(StubProvider::default());
    let app = router(provider.clone());

    for body in [r#"{}"#, r#"{"tickers":[]}"#, r#"{"tickers":"AAPL"}"#, r#"{"tickers":[1]}"#] {
        let (status, body) = post_json(&app, "/api/quotes", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Valid ticker symbols are required");
    }

    for body in [r#"{"tickers":["AAPL","  "]}"#, r#"{"tickers":["ABCDEFGHIJK"]}"#] {
        let (status, body) = post_json(&app, "/api/quotes", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Ticker symbols must be 1-10 characters");
    }

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn batch_quote_without_symbol_is_not_found() {
    let provider = Arc::new(
        StubProvider::default().with_quote("ZZZZ", json!({ "regularMarketPrice": 1.0 })),
    );
    let app = router(provider);

    let (status, body) = post_json(&app, "/api/quotes", r#"{"tickers":["AAPL","zzzz"]}"#).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Stock not found or invalid ticker");
}

#[tokio::test]
async fn batch_provider_errors_are_classified() {
    let provider = Arc::new(
        StubProvider::default()
            .failing("NOPE", not_found)
            .failing("SLOW", rate_limited)
            .failing("DOWN", upstream),
    );
    let app = router(provider);

    let cases = [
        ("NOPE", StatusCode::NOT_FOUND, "Stock ticker not found"),
        (
            "SLOW",
            StatusCode::TOO_MANY_REQUESTS,
            "Rate limit exceeded. Please try again later.",
        ),
        ("DOWN", StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch stock data"),
    ];
    for (ticker, expected_status, expected_message) in cases {
        let body = json!({ "tickers": ["AAPL", ticker] }).to_string();
        let (status, body) = post_json(&app, "/api/quotes", &body).await;
        assert_eq!(status, expected_status, "ticker {ticker}");
        assert_eq!(body["code"], expected_status.as_u16());
        assert_eq!(body["message"], expected_message);
    }
}

#[tokio::test]
async fn bodies_are_parsed_without_json_content_type() {
    let app = router(Arc::new(StubProvider::default()));

    for content_type in [None, Some("text/plain;charset=UTF-8")] {
        for (uri, body) in [
            ("/api/quotes", r#"{"tickers":["AAPL"]}"#),
            ("/api/quote", r#"{"ticker":"AAPL"}"#),
        ] {
            let mut request = Request::builder().method(Method::POST).uri(uri);
            if let Some(content_type) = content_type {
                request = request.header(header::CONTENT_TYPE, content_type);
            }
            let request = request.body(Body::from(body)).unwrap();

            let (status, body) = send(&app, request).await;
            assert_eq!(status, StatusCode::OK, "{uri} with {content_type:?}");
            let quote = if body.is_array() { &body[0] } else { &body };
            assert_eq!(quote["symbol"], "AAPL");
        }
    }
}
