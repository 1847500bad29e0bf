//! Link creation and resolution service.

use std::sync::Arc;
use std::time::Instant;

use chrono::{Duration, Utc};
use serde_json::json;
use tracing::{debug, error};
use url::Url;

use crate::application::services::code_generator::CodeGenerator;
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::domain::resolve_event::{AnalyticsPublisher, ResolveEvent};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Per-request client metadata, passed explicitly down the call chain and
/// attached to the analytics event.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// Service for creating short links and resolving them back to URLs.
///
/// Resolution is cache-aside: cache first, relational store on a miss, then
/// repopulate. The store is the single source of truth; the cache is always
/// rebuildable from it.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
    generator: CodeGenerator,
    analytics: Arc<dyn AnalyticsPublisher>,
    link_lifetime: Duration,
}

impl LinkService {
    pub fn new(
        links: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        generator: CodeGenerator,
        analytics: Arc<dyn AnalyticsPublisher>,
        link_lifetime: Duration,
    ) -> Self {
        Self {
            links,
            cache,
            generator,
            analytics,
            link_lifetime,
        }
    }

    /// Creates a short link.
    ///
    /// Without a custom code, a globally unique code is minted by the
    /// sharded generator. A custom code still gets a generated id (ids and
    /// codes are independent namespaces; only the code is caller-chosen).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an unusable URL and
    /// [`AppError::Conflict`] when the code already exists. The insert races
    /// on the unique constraint, so a concurrent duplicate loses cleanly.
    pub async fn create_short_link(
        &self,
        long_url: String,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        let long_url = validate_url(&long_url)?;

        let generated = self.generator.generate().await?;
        let code = custom_code.unwrap_or(generated.code);
        let expiry_time = Utc::now() + self.link_lifetime;

        debug!(%code, "creating short link");
        self.links
            .create(NewLink {
                id: generated.id,
                code,
                long_url,
                expiry_time,
            })
            .await
    }

    /// Resolves a short code to its long URL.
    ///
    /// Terminal states are resolved (URL returned) or not-found. Exactly one
    /// analytics event is published per call, carrying the end-to-end
    /// latency and, on the not-found path, an error string. Publishing is
    /// fire-and-forget and can never fail the resolution.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown code and
    /// [`AppError::Internal`] when the relational store fails. Cache faults
    /// are absorbed by the cache layer and degrade to a store read.
    pub async fn resolve(&self, code: &str, client: ClientInfo) -> Result<String, AppError> {
        let start = Instant::now();

        match self.cache.get_url(code).await {
            Ok(Some(url)) => {
                self.publish(code, start, None, &client);
                return Ok(url);
            }
            Ok(None) => {}
            Err(e) => {
                // Fail open: treat as a miss and fall through to the store.
                error!("cache error for {code}: {e}");
            }
        }

        let link = match self.links.find_by_code(code).await {
            Ok(Some(link)) => link,
            Ok(None) => {
                let err = AppError::not_found("Short link not found", json!({ "code": code }));
                self.publish(code, start, Some(err.summary()), &client);
                return Err(err);
            }
            Err(e) => {
                self.publish(code, start, Some(e.summary()), &client);
                return Err(e);
            }
        };

        // Cache TTL follows the remaining entity lifetime (capped by the
        // cache-side default), so an entry can outlive its deleted row only
        // within that bound. An already expired row is not worth caching.
        let remaining = link.remaining_lifetime_secs();
        if remaining > 0 {
            if let Err(e) = self
                .cache
                .set_url(code, &link.long_url, Some(remaining))
                .await
            {
                error!("failed to cache {code}: {e}");
            }
        }

        self.publish(code, start, None, &client);
        Ok(link.long_url)
    }

    fn publish(&self, code: &str, start: Instant, error: Option<String>, client: &ClientInfo) {
        self.analytics.publish(ResolveEvent {
            code: code.to_string(),
            latency_ms: start.elapsed().as_millis() as u64,
            error,
            client_ip: client.ip.clone(),
            user_agent: client.user_agent.clone(),
            referrer: client.referrer.clone(),
        });
    }
}

/// Accepts absolute http(s) URLs only, returned in normalized form.
fn validate_url(raw: &str) -> Result<String, AppError> {
    let parsed = Url::parse(raw.trim())
        .map_err(|e| AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() })))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed.to_string()),
        other => Err(AppError::bad_request(
            "Unsupported URL scheme",
            json!({ "scheme": other }),
        )),
    }
}
