//! TSX Dividends Core - query service over the upstream dividend client.
//!
//! Owns the cached bulk listing, the ex-dividend window filter, display
//! shaping of records, and symbol search. Transport-agnostic: the HTTP layer
//! talks to [`DividendServiceTrait`].

pub mod constants;
pub mod dividends;
pub mod errors;
pub mod utils;

pub use dividends::{
    CacheSettings, CacheStatus, DividendService, DividendServiceTrait, SearchResults,
    ShapedRecord,
};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
