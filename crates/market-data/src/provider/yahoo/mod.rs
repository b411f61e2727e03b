//! Yahoo Finance quote provider.
//!
//! Talks to the same JSON endpoints the Yahoo web front end uses:
//! - `v7/finance/quote` for latest quotes
//! - `v10/finance/quoteSummary` for multi-module company data
//!
//! Both require a cookie plus a matching "crumb" token, which is fetched
//! once and cached until Yahoo rejects it.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::errors::MarketDataError;
use crate::models::{Quote, QuoteSummary, SummaryModule};
use crate::provider::QuoteProvider;

use models::{YahooQuoteResponse, YahooQuoteSummaryResponse};

pub(crate) const PROVIDER_ID: &str = "YAHOO";

/// Base URL for Yahoo's query API.
pub const DEFAULT_QUERY_URL: &str = "https://query1.finance.yahoo.com";

/// URL that hands out the session cookie.
pub const DEFAULT_COOKIE_URL: &str = "https://fc.yahoo.com";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

// ============================================================================
// Configuration
// ============================================================================

/// Endpoints and timeouts for [`YahooProvider`].
#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub query_url: String,
    pub cookie_url: String,
    pub timeout: Duration,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            query_url: DEFAULT_QUERY_URL.to_string(),
            cookie_url: DEFAULT_COOKIE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance quote provider.
pub struct YahooProvider {
    client: reqwest::Client,
    config: YahooConfig,
    crumb: RwLock<Option<CrumbData>>,
}

impl YahooProvider {
    /// Create a provider against the public Yahoo endpoints.
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_config(YahooConfig::default())
    }

    pub fn with_config(config: YahooConfig) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            config,
            crumb: RwLock::new(None),
        })
    }

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        if let Some(crumb) = self.crumb.read().await.as_ref() {
            return Ok(crumb.clone());
        }

        let crumb = self.fetch_crumb().await?;
        *self.crumb.write().await = Some(crumb.clone());
        Ok(crumb)
    }

    /// Fetch a new cookie and crumb pair.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        debug!("Fetching Yahoo crumb");

        // The cookie endpoint answers 404 but still sets the cookie.
        let response = self
            .client
            .get(&self.config.cookie_url)
            .send()
            .await
            .map_err(|e| {
                MarketDataError::provider(PROVIDER_ID, format!("Failed to get cookie: {}", e))
            })?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split(';').next())
            .map(str::to_string)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                MarketDataError::provider(PROVIDER_ID, "Failed to parse Yahoo cookie")
            })?;

        let response = self
            .client
            .get(format!("{}/v1/test/getcrumb", self.config.query_url))
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| {
                MarketDataError::provider(PROVIDER_ID, format!("Failed to get crumb: {}", e))
            })?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let crumb = response
            .text()
            .await
            .map_err(|e| {
                MarketDataError::provider(PROVIDER_ID, format!("Failed to read crumb: {}", e))
            })?;
        let crumb = crumb.trim().to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(MarketDataError::provider(
                PROVIDER_ID,
                "Yahoo returned an invalid crumb",
            ));
        }

        Ok(CrumbData { cookie, crumb })
    }

    /// Clear the cached crumb (used when authentication fails)
    async fn clear_crumb(&self) {
        *self.crumb.write().await = None;
    }

    /// GET `path` with crumb authentication and decode the JSON body.
    ///
    /// A rejected crumb is refreshed and the request retried once.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        symbol: &str,
    ) -> Result<T, MarketDataError> {
        let url = format!("{}{}", self.config.query_url, path);
        let mut retried = false;

        loop {
            let crumb = self.ensure_crumb().await?;
            let response = self
                .client
                .get(&url)
                .query(query)
                .query(&[("crumb", crumb.crumb.as_str())])
                .header(header::COOKIE, &crumb.cookie)
                .send()
                .await?;

            let status = response.status();
            match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN if !retried => {
                    warn!("Yahoo rejected the cached crumb, refreshing");
                    self.clear_crumb().await;
                    retried = true;
                }
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    self.clear_crumb().await;
                    return Err(MarketDataError::provider(
                        PROVIDER_ID,
                        "Yahoo authentication expired",
                    ));
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    return Err(MarketDataError::RateLimited {
                        provider: PROVIDER_ID.to_string(),
                    });
                }
                StatusCode::NOT_FOUND => {
                    return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
                }
                s if !s.is_success() => {
                    return Err(MarketDataError::provider(PROVIDER_ID, format!("HTTP {}", s)));
                }
                _ => {
                    return response.json::<T>().await.map_err(|e| {
                        MarketDataError::provider(
                            PROVIDER_ID,
                            format!("Failed to parse response: {}", e),
                        )
                    });
                }
            }
        }
    }
}

// ============================================================================
// QuoteProvider Implementation
// ============================================================================

#[async_trait]
impl QuoteProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        debug!("Fetching quote for {} from Yahoo", symbol);

        let response: YahooQuoteResponse = self
            .get_json("/v7/finance/quote", &[("symbols", symbol)], symbol)
            .await?;
        response.quote_response.into_first(symbol)
    }

    async fn quote_summary(
        &self,
        symbol: &str,
        modules: &[SummaryModule],
    ) -> Result<QuoteSummary, MarketDataError> {
        debug!("Fetching quoteSummary for {} from Yahoo", symbol);

        let path = format!("/v10/finance/quoteSummary/{}", encode(symbol));
        let modules = SummaryModule::join(modules);
        let response: YahooQuoteSummaryResponse = self
            .get_json(
                &path,
                &[("modules", modules.as_str()), ("formatted", "false")],
                symbol,
            )
            .await?;
        response.quote_summary.into_first(symbol)
    }
}

// ============================================================================
// Tests
// ============================================================================
