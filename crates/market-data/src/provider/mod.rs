//! Dividend data provider abstractions and implementations.
//!
//! This module contains:
//! - The `DividendProvider` trait the query layer depends on
//! - `ExDividendProvider`, the HTTP client for the TSX ex-dividend site
//!
//! Providers never surface errors to their callers. Every failure is logged
//! and reported as `None`, so callers only distinguish "data" from "nothing".

mod traits;

pub mod exdividend;

// Re-exports
pub use traits::DividendProvider;
