//! No-op rate limiter for disabled throttling.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::service::{RateLimitDecision, RateLimitError, RateLimitQuota, RateLimiter};

/// A rate limiter that allows everything.
///
/// Used when no Redis is configured or the limiter backend is unreachable
/// at startup. This is the startup-time form of the fail-open policy.
pub struct NullRateLimiter;

impl NullRateLimiter {
    pub fn new() -> Self {
        debug!("Using NullRateLimiter (throttling disabled)");
        Self
    }
}

impl Default for NullRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimiter for NullRateLimiter {
    async fn hit(
        &self,
        _key: &str,
        quota: &RateLimitQuota,
    ) -> Result<RateLimitDecision, RateLimitError> {
        Ok(RateLimitDecision {
            blocked: false,
            total_hits: 1,
            time_to_expire: quota.window,
            time_to_block_expire: Duration::ZERO,
        })
    }
}
