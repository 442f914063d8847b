//! Dividend provider trait definition.

use async_trait::async_trait;

use crate::models::{DividendRecord, RawItem};

/// Trait for upstream dividend data sources.
///
/// Each data call performs its own token handshake; tokens are short-lived and
/// single-use, so implementations must not cache them.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use tsx_dividends_market_data::provider::DividendProvider;
///
/// struct FixtureProvider;
///
/// #[async_trait]
/// impl DividendProvider for FixtureProvider {
///     fn id(&self) -> &'static str {
///         "FIXTURE"
///     }
///
///     // ... implement the fetch methods
/// }
/// ```
#[async_trait]
pub trait DividendProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs.
    fn id(&self) -> &'static str;

    /// Obtain a fresh anti-forgery token.
    ///
    /// Returns `None` when the upstream declines to issue one or the request
    /// fails for any reason.
    async fn fetch_anti_forgery_token(&self) -> Option<String>;

    /// Fetch every dividend disclosure within `window_days` of today.
    ///
    /// Returns `None` when no token could be obtained, the upstream answered
    /// with a non-200 status, or the payload could not be decoded.
    async fn fetch_bulk_dividends(&self, window_days: u32) -> Option<Vec<DividendRecord>>;

    /// Search the upstream by ticker.
    ///
    /// An empty vector means "no matches"; `None` means the search could not
    /// be performed.
    async fn search_by_symbol(&self, term: &str) -> Option<Vec<RawItem>>;
}
