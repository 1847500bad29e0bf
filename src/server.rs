//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache and limiter setup, worker spawning,
//! and the Axum server lifecycle. The component graph is assembled here with
//! plain constructor injection; nothing registers itself globally.

use crate::application::services::{CodeGenerator, ExpiryReaper, LinkService, run_reaper};
use crate::config::Config;
use crate::domain::analytics_worker::run_analytics_worker;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::events::ChannelPublisher;
use crate::infrastructure::persistence::{PgCounterRepository, PgLinkRepository};
use crate::infrastructure::rate_limit::{
    NullRateLimiter, RateLimitQuota, RateLimiter, RedisRateLimiter,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Redis cache and rate limiter (or their null fallbacks)
/// - Background analytics worker and expiry reaper
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migrations, or server bind
/// fail. A missing or unreachable Redis is not an error: caching and
/// throttling degrade to their null implementations.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let rate_limiter: Arc<dyn RateLimiter> = if let Some(redis_url) = &config.redis_url {
        match RedisRateLimiter::connect(redis_url).await {
            Ok(limiter) => Arc::new(limiter),
            Err(e) => {
                tracing::warn!("Rate limiter store unavailable: {}. Throttling disabled.", e);
                Arc::new(NullRateLimiter::new())
            }
        }
    } else {
        Arc::new(NullRateLimiter::new())
    };

    let (event_tx, event_rx) = mpsc::channel(config.analytics_queue_capacity);
    tokio::spawn(run_analytics_worker(event_rx));
    tracing::info!("Analytics worker started");

    let pool = Arc::new(pool);
    let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
    let counter_repository = Arc::new(PgCounterRepository::new(pool.clone()));

    let generator = CodeGenerator::new(counter_repository, config.shard_count);
    let link_service = Arc::new(LinkService::new(
        link_repository.clone(),
        cache.clone(),
        generator,
        Arc::new(ChannelPublisher::new(event_tx)),
        chrono::Duration::seconds(config.link_ttl_seconds as i64),
    ));

    let reaper = Arc::new(ExpiryReaper::new(link_repository, cache.clone()));
    tokio::spawn(run_reaper(
        reaper,
        Duration::from_secs(config.reaper_interval_seconds),
    ));
    tracing::info!("Expiry reaper started");

    let quota = RateLimitQuota {
        limit: config.rate_limit_max_hits,
        window: Duration::from_secs(config.rate_limit_window_seconds),
        block_duration: Duration::from_secs(config.rate_limit_block_seconds),
    };

    let state = AppState::new(
        link_service,
        cache,
        rate_limiter,
        quota,
        config.base_url.clone(),
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
