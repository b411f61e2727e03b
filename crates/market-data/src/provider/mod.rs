//! Quote provider abstraction and implementations.
//!
//! This module contains:
//! - The `QuoteProvider` trait that request handlers depend on
//! - The Yahoo Finance implementation
//!
//! Handlers only see the trait, so tests and alternative data sources plug
//! in without touching the HTTP layer.

mod traits;

pub mod yahoo;

// Re-exports
pub use traits::QuoteProvider;
