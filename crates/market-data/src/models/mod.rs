//! Dividend data models
//!
//! This module contains the data types exchanged with the upstream source:
//! - `dividend` - One equity's dividend disclosure (DividendRecord)
//! - `search` - Raw search items and the array/wrapped payload union (SearchPayload)
//! - `de` - Lenient field decoding shared by both

mod de;
mod dividend;
mod search;

pub use de::value_as_text;
pub use dividend::{parse_upstream_date, DividendRecord, DEFAULT_CURRENCY};
pub use search::{RawItem, SearchPayload};
