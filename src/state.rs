//! Shared application state for HTTP handlers.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::rate_limit::{RateLimitQuota, RateLimiter};

/// The component graph handed to the router.
///
/// Assembled once at startup in [`crate::server::run`]; everything here is
/// cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub cache: Arc<dyn CacheService>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub rate_limit_quota: RateLimitQuota,
    /// Prefix for short URLs returned from the shorten endpoint.
    pub base_url: String,
    /// When true, the client IP is read from X-Forwarded-For / X-Real-IP.
    /// Enable only behind a trusted reverse proxy.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        cache: Arc<dyn CacheService>,
        rate_limiter: Arc<dyn RateLimiter>,
        rate_limit_quota: RateLimitQuota,
        base_url: String,
        behind_proxy: bool,
    ) -> Self {
        Self {
            link_service,
            cache,
            rate_limiter,
            rate_limit_quota,
            base_url,
            behind_proxy,
        }
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}
