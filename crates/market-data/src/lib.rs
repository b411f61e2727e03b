//! Quotedeck Market Data Crate
//!
//! This crate provides access to the external quote provider for the
//! Quotedeck backend.
//!
//! # Overview
//!
//! ```text
//! +------------------+     +------------------+     +------------------+
//! |  HTTP handlers   | --> |  QuoteProvider   | --> |  YahooProvider   |
//! +------------------+     +------------------+     +------------------+
//!                                                           |
//!                                                           v
//!                                                   Quote / QuoteSummary
//! ```
//!
//! # Core Types
//!
//! - [`QuoteProvider`] - Async trait the HTTP layer depends on
//! - [`Quote`] - Opaque provider quote with a `symbol` accessor
//! - [`QuoteSummary`] - Opaque multi-module company summary
//! - [`SummaryModule`] - Modules that can be requested from the summary endpoint
//! - [`MarketDataError`] / [`ErrorKind`] - Structured provider failures

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{ErrorKind, MarketDataError};
pub use models::{Quote, QuoteSummary, SummaryModule};
pub use provider::yahoo::{YahooConfig, YahooProvider};
pub use provider::QuoteProvider;
