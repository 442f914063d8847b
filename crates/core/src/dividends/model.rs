//! Domain models for the dividend query service.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tsx_dividends_market_data::DividendRecord;

use crate::constants::{DEFAULT_CACHE_TTL_SECS, DEFAULT_FETCH_WINDOW_DAYS};

/// A dividend record plus the display fields derived at request time.
///
/// Derived fields that can't be computed (missing or unparsable date) are
/// omitted from the JSON rather than written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapedRecord {
    #[serde(flatten)]
    pub record: DividendRecord,

    /// Calendar days from today to the ex-dividend date (negative if past)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until: Option<i64>,

    /// Ex-dividend date, e.g. "Mar 01, 2024"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upcoming_date: Option<String>,

    /// Payable date, e.g. "Mar 15, 2024"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_pay_date: Option<String>,
}

/// Result of a symbol search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    /// The symbol as dispatched upstream (trimmed, uppercase)
    pub symbol: String,
    pub records: Vec<ShapedRecord>,
}

/// Snapshot of the bulk listing cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStatus {
    pub populated: bool,
    pub records: usize,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Cache policy for the bulk listing.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Lookahead requested from the upstream when populating
    pub fetch_window_days: u32,
    /// Age after which a populated cache is refetched; `None` keeps it for the
    /// life of the process
    pub ttl: Option<Duration>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            fetch_window_days: DEFAULT_FETCH_WINDOW_DAYS,
            ttl: Some(Duration::seconds(DEFAULT_CACHE_TTL_SECS)),
        }
    }
}
