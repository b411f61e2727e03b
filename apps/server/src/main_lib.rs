use std::sync::Arc;

use quotedeck_core::RateLimiter;
use quotedeck_market_data::{QuoteProvider, YahooProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub provider: Arc<dyn QuoteProvider>,
    /// Shared across requests; only consulted when rate limiting is enabled.
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(provider: Arc<dyn QuoteProvider>, rate_limiter: Arc<RateLimiter>) -> Self {
        Self {
            provider,
            rate_limiter,
        }
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("QD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = YahooProvider::with_config(config.yahoo.clone())?;
    tracing::info!(
        "Quote provider {} using {}",
        provider.id(),
        config.yahoo.query_url
    );

    let rate_limiter = RateLimiter::new(config.rate_limit.limits.clone());
    if config.rate_limit.enabled {
        tracing::info!(
            "Rate limiting enabled: {} requests per {:?}",
            config.rate_limit.limits.max_requests,
            config.rate_limit.limits.window
        );
    }

    Ok(Arc::new(AppState::new(
        Arc::new(provider),
        Arc::new(rate_limiter),
    )))
}
