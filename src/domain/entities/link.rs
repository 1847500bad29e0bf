//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A shortened URL mapping.
///
/// Immutable after creation. The `id` is assigned by the code generator
/// (shard range + counter value), not by the database, and the short code
/// is its base-62 encoding.
#[derive(Debug, Clone, FromRow)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expiry_time: DateTime<Utc>,
}

impl Link {
    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expiry_time
    }

    /// Seconds of lifetime remaining, saturating at zero.
    ///
    /// Used as the cache TTL so a cached entry can never outlive the
    /// authoritative row by more than the cache-side cap.
    pub fn remaining_lifetime_secs(&self) -> u64 {
        (self.expiry_time - Utc::now()).num_seconds().max(0) as u64
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub id: i64,
    pub code: String,
    pub long_url: String,
    pub expiry_time: DateTime<Utc>,
}
