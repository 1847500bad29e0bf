//! Channel-backed analytics publisher.

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::resolve_event::{AnalyticsPublisher, ResolveEvent};

/// Publishes resolution events onto a bounded channel.
///
/// `try_send` keeps the resolution path non-blocking: when the queue is
/// full the event is dropped with a warning (at-most-once delivery).
/// The receiving end is drained by
/// [`crate::domain::analytics_worker::run_analytics_worker`].
pub struct ChannelPublisher {
    tx: mpsc::Sender<ResolveEvent>,
}

impl ChannelPublisher {
    pub fn new(tx: mpsc::Sender<ResolveEvent>) -> Self {
        Self { tx }
    }
}

impl AnalyticsPublisher for ChannelPublisher {
    fn publish(&self, event: ResolveEvent) {
        if let Err(e) = self.tx.try_send(event) {
            warn!("analytics event dropped: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: &str) -> ResolveEvent {
        ResolveEvent {
            code: code.to_string(),
            latency_ms: 5,
            error: None,
            client_ip: None,
            user_agent: None,
            referrer: None,
        }
    }

    #[tokio::test]
    async fn test_publish_delivers_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let publisher = ChannelPublisher::new(tx);

        publisher.publish(event("abc"));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.code, "abc");
    }

    #[tokio::test]
    async fn test_publish_drops_when_queue_full() {
        let (tx, mut rx) = mpsc::channel(1);
        let publisher = ChannelPublisher::new(tx);

        publisher.publish(event("first"));
        publisher.publish(event("second")); // dropped, must not panic or block

        assert_eq!(rx.recv().await.unwrap().code, "first");
        assert!(rx.try_recv().is_err());
    }
}
