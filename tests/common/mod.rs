#![allow(dead_code)]

//! In-memory fakes for driving the service without Postgres or Redis.
//!
//! The fakes honor the same contracts as the production implementations:
//! the link repository rejects duplicate codes, the cache honors TTLs, and
//! the rate limiter reproduces the fixed-window-with-block semantics of the
//! Redis script against a local clock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde_json::json;
use shortlink::application::services::{CodeGenerator, ExpiryReaper, LinkService};
use shortlink::domain::entities::{Link, NewLink};
use shortlink::domain::repositories::{CounterRepository, LinkRepository};
use shortlink::domain::resolve_event::{AnalyticsPublisher, ResolveEvent};
use shortlink::error::AppError;
use shortlink::infrastructure::cache::{CacheResult, CacheService};
use shortlink::infrastructure::rate_limit::{
    RateLimitDecision, RateLimitError, RateLimitQuota, RateLimiter,
};
use shortlink::state::AppState;

// ── Link repository ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<HashMap<String, Link>>,
    /// Number of find_by_code calls, for cache-aside assertions.
    pub find_calls: AtomicUsize,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row directly, bypassing the service create path.
    pub fn insert(&self, link: Link) {
        self.links.lock().unwrap().insert(link.code.clone(), link);
    }

    /// Rewrites the expiry of an existing row, simulating time passing.
    pub fn set_expiry(&self, code: &str, expiry_time: DateTime<Utc>) {
        if let Some(link) = self.links.lock().unwrap().get_mut(code) {
            link.expiry_time = expiry_time;
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.links.lock().unwrap().contains_key(code)
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();
        if links.contains_key(&new_link.code) {
            return Err(AppError::conflict("Short code already exists", json!({})));
        }

        let link = Link {
            id: new_link.id,
            code: new_link.code.clone(),
            long_url: new_link.long_url,
            created_at: Utc::now(),
            expiry_time: new_link.expiry_time,
        };
        links.insert(new_link.code, link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.links.lock().unwrap().get(code).cloned())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError> {
        let mut links = self.links.lock().unwrap();
        let expired: Vec<String> = links
            .values()
            .filter(|l| l.expiry_time < now)
            .map(|l| l.code.clone())
            .collect();
        for code in &expired {
            links.remove(code);
        }
        Ok(expired)
    }
}

// ── Counter repository ──────────────────────────────────────────────────────

pub struct InMemoryCounterRepository {
    values: Mutex<HashMap<i32, i64>>,
}

impl InMemoryCounterRepository {
    /// Seeds `shard_count` shards at value 1, like the migration does.
    pub fn new(shard_count: u32) -> Self {
        let values = (0..shard_count as i32).map(|s| (s, 1)).collect();
        Self {
            values: Mutex::new(values),
        }
    }
}

#[async_trait]
impl CounterRepository for InMemoryCounterRepository {
    async fn increment(&self, shard_index: i32) -> Result<i64, AppError> {
        let mut values = self.values.lock().unwrap();
        match values.get_mut(&shard_index) {
            Some(v) => {
                *v += 1;
                Ok(*v)
            }
            None => Err(AppError::ShardNotFound { shard_index }),
        }
    }
}

// ── Cache ───────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .get(code)
            .is_some_and(|(_, deadline)| *deadline > Instant::now())
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get_url(&self, code: &str) -> CacheResult<Option<String>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .get(code)
            .filter(|(_, deadline)| *deadline > Instant::now())
            .map(|(url, _)| url.clone()))
    }

    async fn set_url(&self, code: &str, long_url: &str, ttl: Option<u64>) -> CacheResult<()> {
        let deadline = Instant::now() + Duration::from_secs(ttl.unwrap_or(3600));
        self.entries
            .lock()
            .unwrap()
            .insert(code.to_string(), (long_url.to_string(), deadline));
        Ok(())
    }

    async fn invalidate(&self, code: &str) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(code);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

// ── Analytics ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<ResolveEvent>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ResolveEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AnalyticsPublisher for RecordingPublisher {
    fn publish(&self, event: ResolveEvent) {
        self.events.lock().unwrap().push(event);
    }
}

// ── Rate limiter ────────────────────────────────────────────────────────────

struct WindowState {
    hits: u64,
    window_deadline: Instant,
    block_deadline: Option<Instant>,
}

/// Local-clock twin of the Redis fixed-window-with-block script.
#[derive(Default)]
pub struct InMemoryRateLimiter {
    keys: Mutex<HashMap<String, WindowState>>,
}

impl InMemoryRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hits_for(&self, key: &str) -> u64 {
        self.keys.lock().unwrap().get(key).map_or(0, |s| s.hits)
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn hit(
        &self,
        key: &str,
        quota: &RateLimitQuota,
    ) -> Result<RateLimitDecision, RateLimitError> {
        let now = Instant::now();
        let mut keys = self.keys.lock().unwrap();

        if let Some(state) = keys.get(key) {
            // An active block suppresses hit accounting entirely.
            if let Some(block_deadline) = state.block_deadline {
                if block_deadline > now {
                    return Ok(RateLimitDecision {
                        blocked: true,
                        total_hits: state.hits,
                        time_to_expire: state.window_deadline.saturating_duration_since(now),
                        time_to_block_expire: block_deadline - now,
                    });
                }
            }
            // Expired block or window: restart fresh below.
            if state.block_deadline.is_some() || state.window_deadline <= now {
                keys.remove(key);
            }
        }

        let state = keys.entry(key.to_string()).or_insert(WindowState {
            hits: 0,
            window_deadline: now + quota.window,
            block_deadline: None,
        });
        state.hits += 1;

        if state.hits > quota.limit {
            let block_deadline = now + quota.block_duration;
            state.block_deadline = Some(block_deadline);
            state.window_deadline = block_deadline;
            return Ok(RateLimitDecision {
                blocked: true,
                total_hits: state.hits,
                time_to_expire: quota.block_duration,
                time_to_block_expire: quota.block_duration,
            });
        }

        Ok(RateLimitDecision {
            blocked: false,
            total_hits: state.hits,
            time_to_expire: state.window_deadline - now,
            time_to_block_expire: Duration::ZERO,
        })
    }
}

/// A limiter whose store is down, for fail-open assertions.
pub struct FailingRateLimiter;

#[async_trait]
impl RateLimiter for FailingRateLimiter {
    async fn hit(
        &self,
        _key: &str,
        _quota: &RateLimitQuota,
    ) -> Result<RateLimitDecision, RateLimitError> {
        Err(RateLimitError::Store("connection refused".to_string()))
    }
}

/// A limiter that always blocks with a fixed remaining block time.
pub struct BlockingRateLimiter {
    pub time_to_block_expire: Duration,
}

#[async_trait]
impl RateLimiter for BlockingRateLimiter {
    async fn hit(
        &self,
        _key: &str,
        _quota: &RateLimitQuota,
    ) -> Result<RateLimitDecision, RateLimitError> {
        Ok(RateLimitDecision {
            blocked: true,
            total_hits: 11,
            time_to_expire: self.time_to_block_expire,
            time_to_block_expire: self.time_to_block_expire,
        })
    }
}

// ── Wiring ──────────────────────────────────────────────────────────────────

pub struct TestEnv {
    pub state: AppState,
    pub links: Arc<InMemoryLinkRepository>,
    pub cache: Arc<InMemoryCache>,
    pub events: Arc<RecordingPublisher>,
    pub reaper: ExpiryReaper,
}

pub fn default_quota() -> RateLimitQuota {
    RateLimitQuota {
        limit: 100,
        window: Duration::from_secs(60),
        block_duration: Duration::from_secs(60),
    }
}

/// Assembles an [`AppState`] over in-memory fakes, returning handles to the
/// fakes for assertions.
pub fn test_env_with(limiter: Arc<dyn RateLimiter>, quota: RateLimitQuota) -> TestEnv {
    let links = Arc::new(InMemoryLinkRepository::new());
    let cache = Arc::new(InMemoryCache::new());
    let events = Arc::new(RecordingPublisher::new());

    let generator = CodeGenerator::new(Arc::new(InMemoryCounterRepository::new(4)), 4);
    let link_service = Arc::new(LinkService::new(
        links.clone(),
        cache.clone(),
        generator,
        events.clone(),
        chrono::Duration::days(30),
    ));

    let reaper = ExpiryReaper::new(links.clone(), cache.clone());

    let state = AppState::new(
        link_service,
        cache.clone(),
        limiter,
        quota,
        "http://s.test".to_string(),
        false,
    );

    TestEnv {
        state,
        links,
        cache,
        events,
        reaper,
    }
}

pub fn test_env() -> TestEnv {
    test_env_with(Arc::new(InMemoryRateLimiter::new()), default_quota())
}

// ── ConnectInfo injection for router tests ──────────────────────────────────

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> tower::Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut()
            .insert(axum::extract::ConnectInfo(addr));
        self.inner.call(req)
    }
}
