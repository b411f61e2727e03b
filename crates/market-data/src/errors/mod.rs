//! Error types for provider access.
//!
//! This module provides:
//! - [`MarketDataError`]: The error enum for all provider operations
//! - [`ErrorKind`]: The coarse category callers branch on

use thiserror::Error;

/// Errors that can occur while talking to a quote provider.
///
/// Callers should branch on [`kind`](Self::kind) rather than on the
/// message text, which is meant for logs.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider does not know the requested symbol.
    #[error("Not found: {0}")]
    SymbolNotFound(String),

    /// The provider throttled the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The provider answered, but not with anything usable.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// What went wrong
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Coarse classification of a [`MarketDataError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The symbol is unknown or the response had no usable entry.
    NotFound,
    /// The provider is throttling us.
    RateLimited,
    /// Anything else: transport failures, malformed payloads, 5xx.
    Upstream,
}

impl MarketDataError {
    /// Returns the category of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use quotedeck_market_data::errors::{ErrorKind, MarketDataError};
    ///
    /// let error = MarketDataError::RateLimited { provider: "YAHOO".to_string() };
    /// assert_eq!(error.kind(), ErrorKind::RateLimited);
    ///
    /// let error = MarketDataError::SymbolNotFound("INVALID".to_string());
    /// assert_eq!(error.kind(), ErrorKind::NotFound);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SymbolNotFound(_) => ErrorKind::NotFound,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::ProviderError { .. } | Self::Network(_) => ErrorKind::Upstream,
        }
    }

    pub(crate) fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::ProviderError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_not_found_kind() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_rate_limited_kind() {
        let error = MarketDataError::RateLimited {
            provider: "YAHOO".to_string(),
        };
        assert_eq!(error.kind(), ErrorKind::RateLimited);
    }

    #[test]
    fn test_provider_error_is_upstream() {
        let error = MarketDataError::provider("YAHOO", "Internal server error");
        assert_eq!(error.kind(), ErrorKind::Upstream);
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(format!("{}", error), "Not found: INVALID");

        let error = MarketDataError::RateLimited {
            provider: "YAHOO".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: YAHOO");

        let error = MarketDataError::provider("YAHOO", "HTTP 502");
        assert_eq!(format!("{}", error), "Provider error: YAHOO - HTTP 502");
    }
}
