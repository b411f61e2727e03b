use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use quotedeck_core::RateLimiter;
use tracing::warn;

use crate::error::ApiError;

const ANONYMOUS: &str = "anonymous";

/// State for [`enforce_rate_limit`].
#[derive(Clone)]
pub struct ClientRateLimit {
    pub limiter: Arc<RateLimiter>,
    pub trust_proxy_headers: bool,
}

/// Rejects the request with 429 once the client has used up its window.
pub async fn enforce_rate_limit(
    State(limit): State<ClientRateLimit>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = client_key(request.headers(), peer, limit.trust_proxy_headers);

    if !limit.limiter.check(&key) {
        warn!("Rate limit exceeded for {}", key);
        return ApiError::RateLimited("Too many requests. Please try again later.".to_string())
            .into_response();
    }

    next.run(request).await
}

/// Identifies the caller by socket peer.
///
/// With `trust_proxy_headers`, the first `x-forwarded-for` hop and then
/// `x-real-ip` take precedence over the peer.
pub fn client_key(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_proxy_headers: bool,
) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let forwarded = if trust_proxy_headers {
        header("x-forwarded-for").or_else(|| header("x-real-ip"))
    } else {
        None
    };

    forwarded
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| ANONYMOUS.to_string())
}
