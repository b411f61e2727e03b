//! Ticker symbol validation and sanitizing.

use std::fmt;

use serde::Serialize;

use crate::errors::{Result, ValidationError};

/// Maximum length of a ticker symbol after sanitizing.
pub const MAX_TICKER_LEN: usize = 10;

/// Outcome of [`validate_ticker`], shaped for JSON responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerValidation {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TickerValidation {
    fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }
}

impl From<ValidationError> for TickerValidation {
    fn from(err: ValidationError) -> Self {
        Self {
            is_valid: false,
            message: Some(err.to_string()),
        }
    }
}

/// A ticker symbol that passed validation, held in normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    /// Parses `raw`, trimming and uppercasing it first.
    ///
    /// An empty input is reported as [`ValidationError::Missing`], an input
    /// that is only whitespace as [`ValidationError::Empty`].
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(ValidationError::Missing);
        }

        let cleaned = check_ticker_length(raw)?;
        if !cleaned.chars().all(is_ticker_char) {
            return Err(ValidationError::InvalidCharacters);
        }

        Ok(Self(cleaned))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Checks the syntax of a ticker symbol without rewriting the caller's value.
///
/// `None` stands for a missing or non-string input.
pub fn validate_ticker(ticker: Option<&str>) -> TickerValidation {
    match ticker.map(Ticker::parse) {
        None => ValidationError::Missing.into(),
        Some(Ok(_)) => TickerValidation::valid(),
        Some(Err(err)) => err.into(),
    }
}

/// Trims surrounding whitespace and uppercases.
pub fn sanitize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Sanitizes `raw` and checks only its length, returning the sanitized form.
pub fn check_ticker_length(raw: &str) -> Result<String> {
    let cleaned = sanitize_ticker(raw);
    match cleaned.chars().count() {
        0 => Err(ValidationError::Empty),
        n if n > MAX_TICKER_LEN => Err(ValidationError::TooLong),
        _ => Ok(cleaned),
    }
}

fn is_ticker_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '.' || c == '-'
}
