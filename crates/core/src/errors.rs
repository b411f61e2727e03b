//! Core error types.
//!
//! Only user input can fail inside this crate, so the single error type
//! describes why a ticker symbol was rejected.

use thiserror::Error;

/// Type alias for Result using [`ValidationError`].
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Reasons a ticker symbol fails validation.
///
/// The display strings are user facing and are returned verbatim by
/// [`crate::validation::validate_ticker`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Ticker must be a string")]
    Missing,

    #[error("Ticker cannot be empty")]
    Empty,

    #[error("Ticker must be 10 characters or less")]
    TooLong,

    #[error("Ticker contains invalid characters")]
    InvalidCharacters,
}
