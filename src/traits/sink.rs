//! Event sink trait abstraction.
//!
//! The tap hands every completed event to one or more sinks. Sinks are
//! called while the emitting connection's lock is held, so each sink sees
//! a connection's events in the order they were framed. Sinks must return
//! promptly and must not call back into the tap for the same connection.

use std::sync::{Mutex, PoisonError};

use crate::sse::SseEvent;

/// Receiver of completed events.
///
/// # Example
///
/// ```ignore
/// use ssetap::traits::EventSink;
///
/// struct Printer;
///
/// impl EventSink for Printer {
///     fn emit(&self, event: &SseEvent) {
///         println!("{}", event.summary());
///     }
/// }
/// ```
pub trait EventSink: Send + Sync {
    /// Receive one completed event.
    fn emit(&self, event: &SseEvent);

    /// Drop everything received so far. Sinks without storage ignore this.
    fn clear(&self) {}
}

/// Sink that records events in memory, for tests and small hosts.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<SseEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything received, in order.
    pub fn events(&self) -> Vec<SseEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: &SseEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }

    fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
