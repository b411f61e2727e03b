//! Quote provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{Quote, QuoteSummary, SummaryModule};

/// Trait for quote providers.
///
/// Implementations are shared across request handlers behind an `Arc`, so
/// they must be `Send + Sync`. Calls may be slow and may fail; failures are
/// reported as [`MarketDataError`] so callers can branch on
/// [`MarketDataError::kind`].
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use quotedeck_market_data::{MarketDataError, Quote, QuoteProvider, QuoteSummary, SummaryModule};
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl QuoteProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
///         Err(MarketDataError::SymbolNotFound(symbol.to_string()))
///     }
///
///     async fn quote_summary(
///         &self,
///         symbol: &str,
///         _modules: &[SummaryModule],
///     ) -> Result<QuoteSummary, MarketDataError> {
///         Err(MarketDataError::SymbolNotFound(symbol.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "YAHOO".
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for `symbol`.
    ///
    /// The symbol is passed through as given; callers decide whether to
    /// sanitize it first.
    async fn quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;

    /// Fetch the requested summary modules for `symbol` in one call.
    async fn quote_summary(
        &self,
        symbol: &str,
        modules: &[SummaryModule],
    ) -> Result<QuoteSummary, MarketDataError>;
}
