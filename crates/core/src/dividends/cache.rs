//! Single-slot cache for the bulk dividend listing.
//!
//! State machine: `Empty -> Populated` on the first successful fetch; a failed
//! fetch leaves it `Empty` so the next reader retries. A populated slot goes
//! back to `Empty` only through [`BatchCache::invalidate`] or, when a TTL is
//! configured, by ageing out.
//!
//! Population is single-flight: concurrent readers that find the slot empty
//! queue on one mutex, and whoever gets it after a successful fetch reuses the
//! stored batch instead of fetching again.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::debug;
use tokio::sync::{Mutex, RwLock};

use super::model::CacheStatus;

struct CachedBatch<T> {
    items: Arc<Vec<T>>,
    fetched_at: DateTime<Utc>,
}

impl<T> CachedBatch<T> {
    fn is_stale(&self, ttl: Option<Duration>, now: DateTime<Utc>) -> bool {
        match ttl {
            Some(ttl) => now - self.fetched_at >= ttl,
            None => false,
        }
    }
}

pub struct BatchCache<T> {
    slot: RwLock<Option<CachedBatch<T>>>,
    populate: Mutex<()>,
    ttl: Option<Duration>,
}

impl<T: Send + Sync> BatchCache<T> {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            slot: RwLock::new(None),
            populate: Mutex::new(()),
            ttl,
        }
    }

    async fn current(&self) -> Option<Arc<Vec<T>>> {
        let guard = self.slot.read().await;
        guard
            .as_ref()
            .filter(|batch| !batch.is_stale(self.ttl, Utc::now()))
            .map(|batch| batch.items.clone())
    }

    /// Return the cached batch, fetching it first if the slot is empty or stale.
    ///
    /// `fetch` runs at most once per call and only while holding the
    /// population lock. Returns `None` if the slot was empty and `fetch` failed.
    pub async fn get_or_populate<F, Fut>(&self, fetch: F) -> Option<Arc<Vec<T>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<Vec<T>>>,
    {
        if let Some(items) = self.current().await {
            return Some(items);
        }

        let _populating = self.populate.lock().await;

        // Another caller may have filled the slot while we waited.
        if let Some(items) = self.current().await {
            debug!("Bulk listing populated by a concurrent caller");
            return Some(items);
        }

        let items = Arc::new(fetch().await?);
        let fetched_at = Utc::now();
        *self.slot.write().await = Some(CachedBatch {
            items: items.clone(),
            fetched_at,
        });
        debug!("Cached {} records at {}", items.len(), fetched_at);

        Some(items)
    }

    /// Drop the cached batch; the next reader fetches a new one.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }

    pub async fn status(&self) -> CacheStatus {
        let guard = self.slot.read().await;
        match guard
            .as_ref()
            .filter(|batch| !batch.is_stale(self.ttl, Utc::now()))
        {
            Some(batch) => CacheStatus {
                populated: true,
                records: batch.items.len(),
                fetched_at: Some(batch.fetched_at),
            },
            None => CacheStatus {
                populated: false,
                records: 0,
                fetched_at: None,
            },
        }
    }
}
