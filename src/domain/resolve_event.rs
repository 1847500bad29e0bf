//! Resolution analytics event and publisher interface.

use serde::Serialize;

/// Topic the resolution events are shipped on.
pub const RESOLVE_TOPIC: &str = "link.resolved";

/// One analytics event per resolution attempt, success or failure.
///
/// Latency covers the whole resolution (cache lookup through outcome).
/// Client metadata is optional to handle missing headers gracefully.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveEvent {
    pub code: String,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

/// Fire-and-forget publisher for [`ResolveEvent`]s.
///
/// `publish` must not block and must not fail the caller: at-most-once
/// delivery, a dropped event is logged and forgotten.
///
/// # Implementations
///
/// - [`crate::infrastructure::events::ChannelPublisher`] - bounded channel
///   drained by [`crate::domain::analytics_worker::run_analytics_worker`]
#[cfg_attr(test, mockall::automock)]
pub trait AnalyticsPublisher: Send + Sync {
    fn publish(&self, event: ResolveEvent);
}
