//! Ordered in-memory log of emitted events with a live broadcast feed.

use std::sync::{PoisonError, RwLock};

use tokio::sync::broadcast;

use crate::sse::SseEvent;
use crate::tap::ConnectionId;
use crate::traits::EventSink;

/// Append-only record of every event the tap emitted, in emission order.
///
/// Subscribers get each event appended after they subscribe. A slow
/// subscriber that falls more than the feed capacity behind sees
/// `RecvError::Lagged` and skips ahead; the log itself keeps everything.
#[derive(Debug)]
pub struct EventLog {
    events: RwLock<Vec<SseEvent>>,
    feed: broadcast::Sender<SseEvent>,
}

impl EventLog {
    /// Create an empty log whose feed buffers up to `capacity` events.
    pub fn new(capacity: usize) -> Self {
        let (feed, _) = broadcast::channel(capacity.max(1));
        Self {
            events: RwLock::new(Vec::new()),
            feed,
        }
    }

    pub fn append(&self, event: SseEvent) {
        // No receivers is the normal case
        let _ = self.feed.send(event.clone());
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    /// Subscribe to events appended from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SseEvent> {
        self.feed.subscribe()
    }

    /// Copy of the whole log.
    pub fn snapshot(&self) -> Vec<SseEvent> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Events of one connection, in the order they were framed.
    pub fn events_for(&self, connection_id: &ConnectionId) -> Vec<SseEvent> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|event| &event.connection_id == connection_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: &SseEvent) {
        self.append(event.clone());
    }

    fn clear(&self) {
        EventLog::clear(self);
    }
}
