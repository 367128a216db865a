//! Per-connection buffering state.
//!
//! Each SSE connection owns its pending partial line and its framing
//! accumulator behind its own mutex, so chunks for one connection are
//! applied one at a time while other connections proceed in parallel.
//! Entries are created lazily and only dropped by [`ConnectionTable::remove`]
//! or [`ConnectionTable::clear`]; memory grows with the number of distinct
//! connections seen, not with payload size.

use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;

use crate::sse::{LineBuffer, SseParser};
use crate::tap::ConnectionId;

/// Buffered state for one connection.
#[derive(Debug)]
pub struct ConnectionState {
    pub lines: LineBuffer,
    pub parser: SseParser,
}

impl ConnectionState {
    fn new(connection_id: ConnectionId, session: &str) -> Self {
        Self {
            lines: LineBuffer::new(),
            parser: SseParser::new(connection_id, session),
        }
    }
}

/// Map from connection to its buffered state.
#[derive(Debug)]
pub struct ConnectionTable {
    entries: DashMap<ConnectionId, Arc<Mutex<ConnectionState>>>,
    session: String,
}

impl ConnectionTable {
    /// Create an empty table whose parsers stamp events with `session`.
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            entries: DashMap::new(),
            session: session.into(),
        }
    }

    fn entry(&self, connection_id: &ConnectionId) -> Arc<Mutex<ConnectionState>> {
        if let Some(state) = self.entries.get(connection_id) {
            return Arc::clone(state.value());
        }
        let state = self
            .entries
            .entry(connection_id.clone())
            .or_insert_with(|| {
                Arc::new(Mutex::new(ConnectionState::new(
                    connection_id.clone(),
                    &self.session,
                )))
            });
        Arc::clone(state.value())
    }

    /// Run `f` with exclusive access to a connection's state, creating it if needed.
    ///
    /// The map shard is not held while `f` runs; only the connection's own
    /// lock is.
    pub fn with_connection<R>(
        &self,
        connection_id: &ConnectionId,
        f: impl FnOnce(&mut ConnectionState) -> R,
    ) -> R {
        let state = self.entry(connection_id);
        let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// The pending partial line, creating an empty entry if absent.
    pub fn get_or_create(&self, connection_id: &ConnectionId) -> String {
        self.with_connection(connection_id, |state| state.lines.pending().to_string())
    }

    /// The pending partial line, or `None` when the connection has no state.
    pub fn pending(&self, connection_id: &ConnectionId) -> Option<String> {
        let state = self
            .entries
            .get(connection_id)
            .map(|entry| Arc::clone(entry.value()))?;
        let guard = state.lock().unwrap_or_else(PoisonError::into_inner);
        Some(guard.lines.pending().to_string())
    }

    /// Replace the pending partial line.
    pub fn set(&self, connection_id: &ConnectionId, pending: String) {
        self.with_connection(connection_id, |state| state.lines.set_pending(pending));
    }

    /// Drop a connection's state. Returns whether it existed.
    pub fn remove(&self, connection_id: &ConnectionId) -> bool {
        self.entries.remove(connection_id).is_some()
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.entries.contains_key(connection_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
