//! Rate limiter trait, quota and decision types.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors from the rate limit store.
///
/// Callers treat any of these as "allow": availability wins over strict
/// enforcement, so a broken limiter backend never denies service.
#[derive(Debug, Error)]
pub enum RateLimitError {
    #[error("Rate limit store error: {0}")]
    Store(String),
}

/// Fixed-window-with-block quota applied to one limiter key.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitQuota {
    /// Hits allowed inside one window before the key is blocked.
    pub limit: u64,
    /// Length of the counting window.
    pub window: Duration,
    /// How long a key stays blocked once the limit is exceeded.
    pub block_duration: Duration,
}

/// Outcome of one rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub blocked: bool,
    pub total_hits: u64,
    /// Time until the current counting window resets.
    pub time_to_expire: Duration,
    /// Time until an active block lifts. Zero when not blocked.
    pub time_to_block_expire: Duration,
}

impl RateLimitDecision {
    /// `Retry-After` value for a blocked caller, rounded up to whole seconds.
    pub fn retry_after_secs(&self) -> u64 {
        let ms = self.time_to_block_expire.as_millis() as u64;
        ms.div_ceil(1000)
    }
}

/// Per-key request throttle.
///
/// One call accounts one hit and returns the decision. The whole
/// check-and-count step must be atomic with respect to concurrent callers
/// on the same key; an active block must suppress hit accounting entirely.
///
/// # Implementations
///
/// - [`crate::infrastructure::rate_limit::RedisRateLimiter`] - atomic Lua
///   script against Redis
/// - [`crate::infrastructure::rate_limit::NullRateLimiter`] - always allows
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Records a hit for `key` and decides whether the request may proceed.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::Store`] when the backing store is
    /// unreachable. The middleware fails open on that.
    async fn hit(
        &self,
        key: &str,
        quota: &RateLimitQuota,
    ) -> Result<RateLimitDecision, RateLimitError>;
}
