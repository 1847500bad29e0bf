//! Periodic deletion of expired links.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Sweeps expired links out of the store and invalidates their cache entries.
///
/// The delete is one statement, so a sweep is atomic with respect to
/// concurrent resolutions. Cache invalidation afterwards is best-effort and
/// parallel; a failed invalidation leaves a stale entry that serves the dead
/// link until its own TTL runs out. That staleness window is accepted and
/// bounded by the cache TTL, which never exceeds the entry's remaining
/// lifetime at write time.
pub struct ExpiryReaper {
    links: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
}

impl ExpiryReaper {
    pub fn new(links: Arc<dyn LinkRepository>, cache: Arc<dyn CacheService>) -> Self {
        Self { links, cache }
    }

    /// Runs one sweep and returns how many links were deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the delete itself fails. Cache
    /// invalidation errors are swallowed by the cache layer.
    pub async fn run_once(&self) -> Result<usize, AppError> {
        let codes = self.links.delete_expired(Utc::now()).await?;
        let deleted = codes.len();

        let mut invalidations = JoinSet::new();
        for code in codes {
            let cache = Arc::clone(&self.cache);
            invalidations.spawn(async move {
                let _ = cache.invalidate(&code).await;
            });
        }
        while invalidations.join_next().await.is_some() {}

        if deleted > 0 {
            info!(deleted, "expired links reaped");
        } else {
            debug!("expiry sweep found nothing to delete");
        }

        Ok(deleted)
    }
}

/// Timer loop invoking the reaper on a fixed period.
///
/// The first tick fires immediately, so stale rows left over from downtime
/// are cleared at startup. Sweep failures are logged; the loop never exits.
pub async fn run_reaper(reaper: Arc<ExpiryReaper>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        if let Err(e) = reaper.run_once().await {
            error!("expiry sweep failed: {e:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::infrastructure::cache::MockCacheService;
    use serde_json::json;

    #[tokio::test]
    async fn test_run_once_deletes_and_invalidates() {
        let mut links = MockLinkRepository::new();
        links
            .expect_delete_expired()
            .times(1)
            .returning(|_| Ok(vec!["a1".to_string(), "b2".to_string()]));

        let mut cache = MockCacheService::new();
        cache
            .expect_invalidate()
            .withf(|code| code == "a1" || code == "b2")
            .times(2)
            .returning(|_| Ok(()));

        let reaper = ExpiryReaper::new(Arc::new(links), Arc::new(cache));
        assert_eq!(reaper.run_once().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_run_once_with_nothing_expired() {
        let mut links = MockLinkRepository::new();
        links.expect_delete_expired().returning(|_| Ok(vec![]));

        let mut cache = MockCacheService::new();
        cache.expect_invalidate().times(0);

        let reaper = ExpiryReaper::new(Arc::new(links), Arc::new(cache));
        assert_eq!(reaper.run_once().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_run_once_propagates_store_failure() {
        let mut links = MockLinkRepository::new();
        links
            .expect_delete_expired()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let reaper = ExpiryReaper::new(Arc::new(links), Arc::new(MockCacheService::new()));
        assert!(reaper.run_once().await.is_err());
    }
}
