//! TSX Dividends Market Data Crate
//!
//! Client for the third-party site that publishes dividend dates for
//! Toronto Stock Exchange listings.
//!
//! # Overview
//!
//! ```text
//! +------------------+      POST /t/        +------------------+
//! |   Query layer    | -------------------> |  token endpoint  |
//! | (DividendProvider|   {"data": token}    +------------------+
//! |     consumer)    |
//! |                  |  POST /stocks/ csrf  +------------------+
//! |                  | -------------------> |  data endpoints  |
//! +------------------+    {"data": [...]}   +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`DividendRecord`] - One equity's dividend disclosure
//! - [`SearchPayload`] - The bare-array / wrapped-object union returned by search
//! - [`DividendProvider`] - Provider trait with an infallible, `Option`-valued contract
//! - [`ExDividendProvider`] - The HTTP implementation

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;

pub use models::{
    parse_upstream_date, value_as_text, DividendRecord, RawItem, SearchPayload, DEFAULT_CURRENCY,
};

pub use provider::exdividend::{
    ExDividendProvider, ProviderConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT,
};
pub use provider::DividendProvider;
