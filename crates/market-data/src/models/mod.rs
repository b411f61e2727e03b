//! Market data models
//!
//! Provider payloads are passed through to clients untouched, so the
//! models here are thin wrappers over JSON objects:
//! - `quote` - A single quote (Quote)
//! - `summary` - Multi-module company summary (QuoteSummary, SummaryModule)

mod quote;
mod summary;

pub use quote::Quote;
pub use summary::{QuoteSummary, SummaryModule};
