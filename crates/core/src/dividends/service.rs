//! Dividend query service.
//!
//! Serves the upcoming-dividend listing out of a cached bulk fetch, and symbol
//! search straight from the upstream.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info, warn};
use tsx_dividends_market_data::{DividendProvider, DividendRecord};

use crate::errors::{Error, Result};
use crate::utils::time_utils::market_date_today;

use super::cache::BatchCache;
use super::model::{CacheSettings, CacheStatus, SearchResults, ShapedRecord};
use super::shaping::{map_search_item, normalize_symbol, select_upcoming, shape_record};

/// Operations the HTTP layer needs from the query service.
#[async_trait]
pub trait DividendServiceTrait: Send + Sync {
    /// Upcoming dividends with ex-dividend dates within `window_days` of today.
    ///
    /// `None` returns every record with a parsable ex-dividend date, past ones
    /// included. If the upstream is down and nothing is cached, returns an
    /// empty list.
    async fn list_upcoming(&self, window_days: Option<i64>) -> Result<Vec<ShapedRecord>>;

    /// Search the upstream by ticker.
    ///
    /// Empty input is `Error::Validation`; an unreachable upstream is
    /// `Error::SearchUnavailable`; no matches is `Ok` with no records.
    async fn search_symbol(&self, symbol: &str) -> Result<SearchResults>;

    /// Drop the cached listing and fetch a new one. Returns the record count.
    async fn refresh(&self) -> Result<usize>;

    /// Drop the cached listing.
    async fn invalidate(&self);

    async fn cache_status(&self) -> CacheStatus;
}

pub struct DividendService {
    provider: Arc<dyn DividendProvider>,
    cache: BatchCache<DividendRecord>,
    settings: CacheSettings,
}

impl DividendService {
    pub fn new(provider: Arc<dyn DividendProvider>, settings: CacheSettings) -> Self {
        Self {
            provider,
            cache: BatchCache::new(settings.ttl),
            settings,
        }
    }

    async fn cached_batch(&self) -> Option<Arc<Vec<DividendRecord>>> {
        let window = self.settings.fetch_window_days;
        self.cache
            .get_or_populate(|| async move {
                info!(
                    "Fetching bulk dividend listing from {} ({} day window)",
                    self.provider.id(),
                    window
                );
                self.provider.fetch_bulk_dividends(window).await
            })
            .await
    }

    /// [`list_upcoming`](DividendServiceTrait::list_upcoming) against a fixed date.
    pub async fn list_upcoming_as_of(
        &self,
        window_days: Option<i64>,
        today: NaiveDate,
    ) -> Result<Vec<ShapedRecord>> {
        let Some(batch) = self.cached_batch().await else {
            warn!("No dividend listing available; serving an empty result");
            return Ok(Vec::new());
        };

        let selected = select_upcoming(&batch, window_days, today);
        debug!(
            "Selected {} of {} cached records (window: {:?})",
            selected.len(),
            batch.len(),
            window_days
        );
        Ok(selected)
    }

    /// [`search_symbol`](DividendServiceTrait::search_symbol) against a fixed date.
    pub async fn search_symbol_as_of(
        &self,
        symbol: &str,
        today: NaiveDate,
    ) -> Result<SearchResults> {
        let symbol = normalize_symbol(symbol)?;

        let items = self
            .provider
            .search_by_symbol(&symbol)
            .await
            .ok_or_else(|| {
                Error::SearchUnavailable(format!("upstream search for {} failed", symbol))
            })?;

        let records: Vec<ShapedRecord> = items
            .iter()
            .filter_map(|item| match map_search_item(item) {
                Ok(record) => Some(shape_record(record, today)),
                Err(e) => {
                    debug!("Skipping search item for {}: {}", symbol, e);
                    None
                }
            })
            .collect();

        debug!(
            "Search for {} returned {} of {} items",
            symbol,
            records.len(),
            items.len()
        );
        Ok(SearchResults { symbol, records })
    }
}

#[async_trait]
impl DividendServiceTrait for DividendService {
    async fn list_upcoming(&self, window_days: Option<i64>) -> Result<Vec<ShapedRecord>> {
        self.list_upcoming_as_of(window_days, market_date_today())
            .await
    }

    async fn search_symbol(&self, symbol: &str) -> Result<SearchResults> {
        self.search_symbol_as_of(symbol, market_date_today()).await
    }

    async fn refresh(&self) -> Result<usize> {
        self.cache.invalidate().await;
        let batch = self.cached_batch().await.ok_or_else(|| {
            Error::UpstreamUnavailable("bulk dividend listing could not be fetched".to_string())
        })?;
        info!("Dividend listing refreshed with {} records", batch.len());
        Ok(batch.len())
    }

    async fn invalidate(&self) {
        self.cache.invalidate().await;
        info!("Dividend listing cache invalidated");
    }

    async fn cache_status(&self) -> CacheStatus {
        self.cache.status().await
    }
}
