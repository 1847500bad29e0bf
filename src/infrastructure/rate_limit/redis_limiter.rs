//! Redis-backed fixed-window-with-block rate limiter.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, Script, aio::ConnectionManager};
use std::time::Duration;
use tracing::info;

use super::service::{RateLimitDecision, RateLimitError, RateLimitQuota, RateLimiter};

/// The whole decision runs as one Lua script so that check-block,
/// increment-counter and set-block are a single indivisible unit. Redis
/// serializes script execution per server, which gives the required
/// per-key ordering without any client-side locking.
///
/// Reply: `{ total_hits, window_pttl_ms, blocked (0/1), block_pttl_ms }`.
const LIMIT_SCRIPT: &str = r#"
local hit_key = KEYS[1]
local block_key = KEYS[2]
local window_ms = tonumber(ARGV[1])
local limit = tonumber(ARGV[2])
local block_ms = tonumber(ARGV[3])

local block_ttl = redis.call('PTTL', block_key)
if block_ttl > 0 then
    local hits = tonumber(redis.call('GET', hit_key) or '0')
    return { hits, redis.call('PTTL', hit_key), 1, block_ttl }
end
if block_ttl == -1 then
    -- Block flag left without expiry: clear it and restart the window.
    redis.call('DEL', block_key)
    redis.call('DEL', hit_key)
end

local hits = redis.call('INCR', hit_key)
local ttl = redis.call('PTTL', hit_key)
if ttl < 0 then
    redis.call('PEXPIRE', hit_key, window_ms)
    ttl = window_ms
end

if hits > limit then
    redis.call('SET', block_key, 1, 'PX', block_ms)
    -- Tie the counter's life to the block: both expire together, so the
    -- first request after the block starts a fresh window at hits = 1.
    redis.call('PEXPIRE', hit_key, block_ms)
    return { hits, block_ms, 1, block_ms }
end

return { hits, ttl, 0, 0 }
"#;

/// Distributed rate limiter executing the window logic atomically in Redis.
pub struct RedisRateLimiter {
    client: ConnectionManager,
    script: Script,
    key_prefix: String,
}

impl RedisRateLimiter {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::Store`] if the connection cannot be
    /// established. Callers typically fall back to [`super::NullRateLimiter`].
    pub async fn connect(redis_url: &str) -> Result<Self, RateLimitError> {
        let client = Client::open(redis_url)
            .map_err(|e| RateLimitError::Store(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| RateLimitError::Store(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| RateLimitError::Store(format!("Redis PING failed: {}", e)))?;

        info!("✓ Rate limiter connected to Redis");

        Ok(Self {
            client: manager,
            script: Script::new(LIMIT_SCRIPT),
            key_prefix: "throttle:".to_string(),
        })
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn hit(
        &self,
        key: &str,
        quota: &RateLimitQuota,
    ) -> Result<RateLimitDecision, RateLimitError> {
        let hit_key = format!("{}{}:hits", self.key_prefix, key);
        let block_key = format!("{}{}:blocked", self.key_prefix, key);
        let mut conn = self.client.clone();

        let reply: Vec<i64> = self
            .script
            .key(&hit_key)
            .key(&block_key)
            .arg(quota.window.as_millis() as u64)
            .arg(quota.limit)
            .arg(quota.block_duration.as_millis() as u64)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| RateLimitError::Store(e.to_string()))?;

        decision_from_reply(&reply)
    }
}

/// Parses the script reply into a decision. PTTL can report `-1`/`-2` for
/// keys without expiry or already gone; those clamp to zero.
fn decision_from_reply(reply: &[i64]) -> Result<RateLimitDecision, RateLimitError> {
    let [hits, window_ttl_ms, blocked, block_ttl_ms] = reply else {
        return Err(RateLimitError::Store(format!(
            "unexpected script reply: {:?}",
            reply
        )));
    };

    Ok(RateLimitDecision {
        blocked: *blocked != 0,
        total_hits: (*hits).max(0) as u64,
        time_to_expire: Duration::from_millis((*window_ttl_ms).max(0) as u64),
        time_to_block_expire: Duration::from_millis((*block_ttl_ms).max(0) as u64),
    })
}
