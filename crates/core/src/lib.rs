//! Quotedeck Core - ticker validation, display formatting and rate limiting.
//!
//! This crate holds the pure, provider-independent pieces of the quote
//! backend. It performs no I/O; the HTTP layer and the provider access
//! layer live in sibling crates.

pub mod errors;
pub mod formatters;
pub mod rate_limit;
pub mod validation;

// Re-export error types
pub use errors::{Result, ValidationError};

pub use rate_limit::{
    Clock, InMemoryRateLimitStore, ManualClock, RateLimitConfig, RateLimitRecord,
    RateLimitStore, RateLimiter, SystemClock,
};
pub use validation::{
    check_ticker_length, sanitize_ticker, validate_ticker, Ticker, TickerValidation,
    MAX_TICKER_LEN,
};
