//! Distributed request throttling.
//!
//! Provides a [`RateLimiter`] trait with two implementations:
//! - [`RedisRateLimiter`] - atomic fixed-window-with-block over Redis
//! - [`NullRateLimiter`] - always allows (throttling disabled)

mod null_limiter;
mod redis_limiter;
mod service;

pub use null_limiter::NullRateLimiter;
pub use redis_limiter::RedisRateLimiter;
pub use service::{RateLimitDecision, RateLimitError, RateLimitQuota, RateLimiter};

#[cfg(test)]
pub use service::MockRateLimiter;
