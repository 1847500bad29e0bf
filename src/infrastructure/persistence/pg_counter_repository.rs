//! PostgreSQL implementation of the shard counter repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::CounterRepository;
use crate::error::AppError;

/// PostgreSQL shard counters.
///
/// The single-statement `UPDATE .. RETURNING` relies on row-level locking:
/// concurrent increments on the same shard serialize on the row, so returned
/// values are strictly increasing and never repeat. Shards are independent
/// rows and never contend with each other.
pub struct PgCounterRepository {
    pool: Arc<PgPool>,
}

impl PgCounterRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CounterRepository for PgCounterRepository {
    async fn increment(&self, shard_index: i32) -> Result<i64, AppError> {
        let value = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE shard_counters
            SET value = value + 1
            WHERE shard_index = $1
            RETURNING value
            "#,
        )
        .bind(shard_index)
        .fetch_optional(self.pool.as_ref())
        .await?;

        value.ok_or(AppError::ShardNotFound { shard_index })
    }
}
