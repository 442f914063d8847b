//! Dividend query module.
//!
//! - [`model`] - Shaped records, cache status and cache settings
//! - [`cache`] - Single-slot, single-flight cache for the bulk listing
//! - [`shaping`] - Date window selection, display formatting, search item mapping
//! - [`service`] - `DividendService` and the `DividendServiceTrait` seam
//!
//! ```text
//! HTTP handlers → DividendServiceTrait → BatchCache → DividendProvider (market-data crate)
//! ```

pub mod cache;
pub mod model;
pub mod service;
pub mod shaping;


pub use cache::BatchCache;
pub use model::{CacheSettings, CacheStatus, SearchResults, ShapedRecord};
pub use service::{DividendService, DividendServiceTrait};
