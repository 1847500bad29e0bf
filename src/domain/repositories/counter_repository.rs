//! Repository trait for the sharded id counters.

use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the per-shard monotonic counters.
///
/// Each shard is one row; correctness of the whole id scheme rests on the
/// increment being a single atomic read-modify-write on that row. No
/// cross-shard coordination exists or is needed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterRepository: Send + Sync {
    /// Atomically increments the counter for `shard_index` and returns the
    /// new value. Two concurrent callers on the same shard can never observe
    /// the same value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ShardNotFound`] if the shard row does not exist.
    /// This is a fatal misconfiguration and must not be retried.
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment(&self, shard_index: i32) -> Result<i64, AppError>;
}
