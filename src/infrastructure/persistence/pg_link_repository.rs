//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
///
/// Uses SQLx prepared statements for SQL injection protection. The unique
/// constraint on `code` is the authority for duplicate detection: inserts
/// racing on the same code lose at the database, not in application logic.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (id, code, long_url, created_at, expiry_time)
            VALUES ($1, $2, $3, now(), $4)
            RETURNING id, code, long_url, created_at, expiry_time
            "#,
        )
        .bind(new_link.id)
        .bind(&new_link.code)
        .bind(&new_link.long_url)
        .bind(new_link.expiry_time)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, code, long_url, created_at, expiry_time
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError> {
        let codes = sqlx::query_scalar::<_, String>(
            r#"
            DELETE FROM links
            WHERE expiry_time < $1
            RETURNING code
            "#,
        )
        .bind(now)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(codes)
    }
}
