//! Background worker draining the analytics channel.

use tokio::sync::mpsc;

use crate::domain::resolve_event::{RESOLVE_TOPIC, ResolveEvent};

/// Drains resolution events and hands them to the message bus boundary.
///
/// The bus itself is an external collaborator; this worker serializes each
/// event for the `link.resolved` topic and emits it at the process edge.
/// Serialization failures are logged and the event is dropped, never retried.
pub async fn run_analytics_worker(mut rx: mpsc::Receiver<ResolveEvent>) {
    while let Some(event) = rx.recv().await {
        match serde_json::to_string(&event) {
            Ok(payload) => {
                tracing::debug!(topic = RESOLVE_TOPIC, %payload, "analytics event shipped");
            }
            Err(e) => {
                tracing::warn!(code = %event.code, "failed to serialize analytics event: {e}");
            }
        }
    }

    tracing::debug!("analytics channel closed, worker exiting");
}
