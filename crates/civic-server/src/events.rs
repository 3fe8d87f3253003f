// Rust guideline compliant 2026-02-09

//! Broadcast hub feeding the server-sent event streams.

use axum::response::sse::{Event, KeepAlive, Sse};
use civic_app::{EventSink, IssueEvent};
use futures::Stream;
use tokio::sync::broadcast::{self, error::RecvError};

/// Fan-out of committed issue events to any number of subscribers.
///
/// Slow subscribers lose the oldest events instead of blocking writers.
#[derive(Debug, Clone)]
pub struct EventHub {
    sender: broadcast::Sender<IssueEvent>,
}

impl EventHub {
    /// Creates a hub buffering up to `capacity` events per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribes to events committed from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<IssueEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscribers(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventSink for EventHub {
    fn publish(&self, event: IssueEvent) {
        // No subscribers is not an error.
        let _ = self.sender.send(event);
    }
}

/// Turns a subscription into an SSE response, optionally for one issue.
pub fn sse_stream(
    receiver: broadcast::Receiver<IssueEvent>,
    issue_id: Option<u64>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream = futures::stream::unfold(receiver, move |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if issue_id.is_some_and(|id| id != event.issue_id) {
                        continue;
                    }
                    let mut sse = Event::default().event(event.kind.as_str());
                    if let Some(id) = event_id(&event) {
                        sse = sse.id(id);
                    }
                    return Some((sse.json_data(&event), receiver));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event subscriber lagged, dropping events");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// SSE id of an event: the newest audit entry it carries.
///
/// Audit ids grow with every commit, so a reconnecting client can hand the
/// last one back as `Last-Event-ID`.
fn event_id(event: &IssueEvent) -> Option<String> {
    event.updates.last().map(|update| update.id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use civic_app::EventKind;
    use civic_core::{NewUpdate, Status};

    fn event(issue_id: u64) -> IssueEvent {
        IssueEvent {
            kind: EventKind::Created,
            issue_id,
            status: Status::Reported,
            updates: Vec::new(),
            at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_publish_reaches_subscribers() {
        let hub = EventHub::new(8);
        let mut first = hub.subscribe();
        let mut second = hub.subscribe();
        assert_eq!(hub.subscribers(), 2);

        hub.publish(event(3));
        assert_eq!(first.recv().await.unwrap().issue_id, 3);
        assert_eq!(second.recv().await.unwrap().issue_id, 3);
    }

    #[test]
    fn test_event_id_is_newest_audit_entry() {
        let now = Utc::now();
        let mut patched = event(4);
        patched.kind = EventKind::Updated;
        patched.updates = vec![
            NewUpdate::comment("staff", "Updated title").into_update(17, 4, now),
            NewUpdate::assignment("staff", "Assigned to crew-7").into_update(18, 4, now),
        ];
        assert_eq!(event_id(&patched).as_deref(), Some("18"));

        let mut commented = event(4);
        commented.kind = EventKind::Commented;
        commented.updates = vec![NewUpdate::comment("citizen", "Thanks").into_update(19, 4, now)];
        assert_ne!(event_id(&commented), event_id(&patched));

        assert_eq!(event_id(&event(4)), None);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let hub = EventHub::new(1);
        hub.publish(event(1));
        assert_eq!(hub.subscribers(), 0);
    }

    #[tokio::test]
    async fn test_lagging_subscriber_skips_oldest() {
        let hub = EventHub::new(2);
        let mut receiver = hub.subscribe();
        for id in 1..=4 {
            hub.publish(event(id));
        }
        assert!(matches!(receiver.recv().await, Err(RecvError::Lagged(2))));
        assert_eq!(receiver.recv().await.unwrap().issue_id, 3);
    }
}
