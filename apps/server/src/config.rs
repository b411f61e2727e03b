use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use quotedeck_core::RateLimitConfig;
use quotedeck_market_data::YahooConfig;

/// Rate limiting applied to the data routes.
#[derive(Debug, Clone)]
pub struct RateLimitSettings {
    /// Off by default; the limiter is still built so it can be toggled by config.
    pub enabled: bool,
    pub limits: RateLimitConfig,
    /// Key clients by `x-forwarded-for`/`x-real-ip`. Only safe behind a
    /// proxy that overwrites those headers.
    pub trust_proxy_headers: bool,
    /// How often expired windows are swept from the store.
    pub sweep_interval: Duration,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            limits: RateLimitConfig::default(),
            trust_proxy_headers: false,
            sweep_interval: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    pub yahoo: YahooConfig,
    pub rate_limit: RateLimitSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30_000),
            static_dir: "build".to_string(),
            yahoo: YahooConfig::default(),
            rate_limit: RateLimitSettings::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Config::default();

        let listen_addr: SocketAddr = std::env::var("QD_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid QD_LISTEN_ADDR")?;
        let cors_allow = parse_list(
            &std::env::var("QD_CORS_ALLOW_ORIGINS").unwrap_or_else(|_| "*".into()),
        );
        let timeout_ms: u64 = env_or("QD_REQUEST_TIMEOUT_MS", 30_000);
        let static_dir = std::env::var("QD_STATIC_DIR").unwrap_or(defaults.static_dir);

        let yahoo = YahooConfig {
            query_url: std::env::var("QD_YAHOO_QUERY_URL").unwrap_or(defaults.yahoo.query_url),
            cookie_url: std::env::var("QD_YAHOO_COOKIE_URL")
                .unwrap_or(defaults.yahoo.cookie_url),
            timeout: defaults.yahoo.timeout,
        };

        let rate_limit = RateLimitSettings {
            enabled: std::env::var("QD_RATE_LIMIT_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            limits: RateLimitConfig {
                max_requests: env_or(
                    "QD_RATE_LIMIT_MAX_REQUESTS",
                    defaults.rate_limit.limits.max_requests,
                ),
                window: Duration::from_millis(env_or("QD_RATE_LIMIT_WINDOW_MS", 60_000)),
            },
            trust_proxy_headers: std::env::var("QD_TRUST_PROXY_HEADERS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            sweep_interval: Duration::from_secs(env_or("QD_RATE_LIMIT_SWEEP_SECS", 300)),
        };

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir,
            yahoo,
            rate_limit,
        })
    }
}

/// Reads `key`, falling back to `default` when unset or unparsable.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
