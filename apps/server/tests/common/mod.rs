#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use quotedeck_core::{RateLimitConfig, RateLimiter};
use quotedeck_market_data::{MarketDataError, Quote, QuoteProvider, QuoteSummary, SummaryModule};
use quotedeck_server::{api::app_router, config::Config, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

/// In-memory provider returning canned quotes.
///
/// Unknown symbols get a quote echoing the symbol back; entries in
/// `failures` are returned as errors instead.
#[derive(Default)]
pub struct StubProvider {
    pub quotes: HashMap<String, Value>,
    pub failures: HashMap<String, fn(&str) -> MarketDataError>,
    pub calls: Mutex<Vec<String>>,
    pub summary_modules: Mutex<Vec<Vec<SummaryModule>>>,
}

impl StubProvider {
    pub fn with_quote(mut self, symbol: &str, quote: Value) -> Self {
        self.quotes.insert(symbol.to_string(), quote);
        self
    }

    pub fn failing(mut self, symbol: &str, err: fn(&str) -> MarketDataError) -> Self {
        self.failures.insert(symbol.to_string(), err);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn lookup(&self, symbol: &str) -> Result<Value, MarketDataError> {
        self.calls.lock().unwrap().push(symbol.to_string());
        if let Some(err) = self.failures.get(symbol) {
            return Err(err(symbol));
        }
        Ok(self
            .quotes
            .get(symbol)
            .cloned()
            .unwrap_or_else(|| json!({ "symbol": symbol, "regularMarketPrice": 100.0 })))
    }
}

#[async_trait]
impl QuoteProvider for StubProvider {
    fn id(&self) -> &'static str {
        "STUB"
    }

    async fn quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let value = self.lookup(symbol)?;
        Ok(serde_json::from_value(value).unwrap())
    }

    async fn quote_summary(
        &self,
        symbol: &str,
        modules: &[SummaryModule],
    ) -> Result<QuoteSummary, MarketDataError> {
        self.summary_modules.lock().unwrap().push(modules.to_vec());
        self.lookup(symbol)?;
        let summary: serde_json::Map<String, Value> = modules
            .iter()
            .map(|m| (m.as_str().to_string(), json!({ "symbol": symbol })))
            .collect();
        Ok(QuoteSummary::from(summary))
    }
}

pub fn not_found(symbol: &str) -> MarketDataError {
    MarketDataError::SymbolNotFound(symbol.to_string())
}

pub fn rate_limited(_: &str) -> MarketDataError {
    MarketDataError::RateLimited {
        provider: "STUB".to_string(),
    }
}

pub fn upstream(_: &str) -> MarketDataError {
    MarketDataError::ProviderError {
        provider: "STUB".to_string(),
        message: "HTTP 502 Bad Gateway".to_string(),
    }
}

pub fn router_with(provider: Arc<StubProvider>, config: &Config) -> Router {
    let limiter = Arc::new(RateLimiter::new(config.rate_limit.limits.clone()));
    let state = Arc::new(AppState::new(provider, limiter));
    app_router(state, config)
}

pub fn router(provider: Arc<StubProvider>) -> Router {
    router_with(provider, &Config::default())
}

pub fn rate_limited_config(max_requests: u32) -> Config {
    let mut config = Config::default();
    config.rate_limit.enabled = true;
    config.rate_limit.trust_proxy_headers = true;
    config.rate_limit.limits = RateLimitConfig {
        max_requests,
        ..RateLimitConfig::default()
    };
    config
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}
