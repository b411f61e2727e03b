pub mod health;
pub mod quotes;
pub mod rate_limit;
pub mod stock;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    config::Config,
    error::ErrorBody,
    main_lib::AppState,
    models::{QuoteRequest, QuotesRequest, StockPageData},
};

pub use stock::load_stock_page;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        quotes::get_quote,
        quotes::get_quotes,
        stock::get_stock_page
    ),
    components(schemas(QuoteRequest, QuotesRequest, StockPageData, ErrorBody)),
    tags((name = "quotedeck"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {}", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let openapi = ApiDoc::openapi();

    let mut data = Router::new()
        .route("/quote", post(quotes::get_quote))
        .route("/quotes", post(quotes::get_quotes))
        .route("/stock/{ticker}", get(stock::get_stock_page));
    if config.rate_limit.enabled {
        let limit = rate_limit::ClientRateLimit {
            limiter: state.rate_limiter.clone(),
            trust_proxy_headers: config.rate_limit.trust_proxy_headers,
        };
        data = data.route_layer(middleware::from_fn_with_state(
            limit,
            rate_limit::enforce_rate_limit,
        ));
    }

    let api = data
        .route("/healthz", get(health::healthz))
        .route("/openapi.json", get(|| async { Json(openapi) }));

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
