//! Cache service trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// These never cross the service boundary: every cache failure degrades the
/// resolution path to the relational store.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache-aside store for resolved short links.
///
/// Implementations must be thread-safe and fail open: a backend fault is a
/// miss on read and a no-op on write, logged but never propagated. Every
/// operation goes through the backend client's own timeout and must not
/// block indefinitely.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the long URL for a short code.
    ///
    /// Returns `Ok(Some(url))` on a hit, `Ok(None)` on a miss or backend
    /// error (fail-open).
    async fn get_url(&self, code: &str) -> CacheResult<Option<String>>;

    /// Stores a code-to-URL mapping with a TTL in seconds.
    ///
    /// `ttl_seconds = None` uses the implementation's default. Backend
    /// errors are logged and swallowed.
    async fn set_url(
        &self,
        code: &str,
        long_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes a cached mapping. Used when the authoritative row is deleted.
    async fn invalidate(&self, code: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
