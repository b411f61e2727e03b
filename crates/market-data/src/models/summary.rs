use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Multi-module company summary as returned by the provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteSummary(Map<String, Value>);

impl QuoteSummary {
    /// Data for one module, if the provider returned it.
    pub fn module(&self, module: SummaryModule) -> Option<&Value> {
        self.0.get(module.as_str())
    }
}

impl From<Map<String, Value>> for QuoteSummary {
    fn from(modules: Map<String, Value>) -> Self {
        Self(modules)
    }
}

/// Sections that can be requested from the quote summary endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SummaryModule {
    AssetProfile,
    CalendarEvents,
    DefaultKeyStatistics,
    Earnings,
    EarningsHistory,
    EarningsTrend,
    FinancialData,
    QuoteType,
}

impl SummaryModule {
    /// Modules shown on the stock detail page.
    pub const COMPANY_BREAKDOWN: [SummaryModule; 8] = [
        SummaryModule::QuoteType,
        SummaryModule::FinancialData,
        SummaryModule::DefaultKeyStatistics,
        SummaryModule::AssetProfile,
        SummaryModule::Earnings,
        SummaryModule::EarningsHistory,
        SummaryModule::EarningsTrend,
        SummaryModule::CalendarEvents,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryModule::AssetProfile => "assetProfile",
            SummaryModule::CalendarEvents => "calendarEvents",
            SummaryModule::DefaultKeyStatistics => "defaultKeyStatistics",
            SummaryModule::Earnings => "earnings",
            SummaryModule::EarningsHistory => "earningsHistory",
            SummaryModule::EarningsTrend => "earningsTrend",
            SummaryModule::FinancialData => "financialData",
            SummaryModule::QuoteType => "quoteType",
        }
    }

    /// Joins modules into the comma separated form the provider expects.
    pub fn join(modules: &[SummaryModule]) -> String {
        modules
            .iter()
            .map(SummaryModule::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for SummaryModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
