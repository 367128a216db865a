//! Multi-connection SSE tap.
//!
//! Consumes intercepted response chunks from many concurrent connections
//! and produces parsed events per connection:
//!
//! 1. The first delivery with headers classifies the connection (sticky).
//! 2. Non-SSE connections pass through untouched.
//! 3. SSE chunks are reassembled into lines and framed into events, which
//!    are appended to the [`EventLog`] and any extra sinks.
//!
//! All work for one connection happens under that connection's lock, so
//! chunks and emitted events keep their per-connection order. Different
//! connections never wait on each other beyond brief map access.
//!
//! # Module structure
//! - `connection` - ConnectionId, Delivery, ChunkOutcome
//! - `classification` - write-once classification cache
//! - `table` - per-connection buffering state
//! - `log` - ordered event log with live feed

mod classification;
mod connection;
mod log;
mod table;

pub use classification::{Classification, ClassificationCache};
pub use connection::{ChunkOutcome, ConnectionId, Delivery};
pub use log::EventLog;
pub use table::{ConnectionState, ConnectionTable};

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::TapConfig;
use crate::sse::{is_event_stream, SseEvent};
use crate::traits::EventSink;

/// Entry point for intercepted traffic.
pub struct SseTap {
    config: TapConfig,
    classifications: ClassificationCache,
    table: ConnectionTable,
    log: Arc<EventLog>,
    /// The log first, then sinks added with [`SseTap::with_sink`]
    sinks: Vec<Arc<dyn EventSink>>,
}

impl SseTap {
    pub fn new(config: TapConfig) -> Self {
        let log = Arc::new(EventLog::new(config.feed_capacity));
        Self {
            classifications: ClassificationCache::new(),
            table: ConnectionTable::new(config.session_label.clone()),
            sinks: vec![Arc::clone(&log) as Arc<dyn EventSink>],
            log,
            config,
        }
    }

    /// Also deliver every emitted event to `sink`, after the log.
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Process one delivery.
    ///
    /// Headers are only inspected while the connection is unclassified; once
    /// a decision is stored it is never revisited.
    pub fn process(&self, delivery: Delivery) -> ChunkOutcome {
        let Delivery {
            connection_id,
            headers,
            body,
        } = delivery;

        let is_sse = match self.classifications.get(&connection_id) {
            Some(decided) => decided,
            None => match headers {
                Some(headers) => self.classify(&connection_id, &headers),
                None => {
                    debug!(connection = %connection_id, bytes = body.len(), "no headers yet, chunk not processed");
                    return ChunkOutcome::Unclassified;
                }
            },
        };

        if !is_sse {
            return ChunkOutcome::Passthrough;
        }
        if body.is_empty() {
            return ChunkOutcome::Parsed(Vec::new());
        }

        let events = self.table.with_connection(&connection_id, |state| {
            let lines = state.lines.push_bytes(&body);
            debug!(
                connection = %connection_id,
                bytes = body.len(),
                lines = lines.len(),
                "reassembled chunk"
            );

            let events = state.parser.feed_lines(&lines);
            for event in &events {
                self.emit(event);
            }

            if let Some(max) = self.config.max_pending_bytes {
                let retained = state.lines.retained_len();
                if retained > max {
                    warn!(
                        connection = %connection_id,
                        retained,
                        max,
                        "partial line exceeds limit, discarding it and its event"
                    );
                    // The event the dropped line belongs to can't complete intact
                    state.lines.discard();
                    state.parser.reset();
                }
            }

            events
        });

        ChunkOutcome::Parsed(events)
    }

    fn classify(&self, connection_id: &ConnectionId, headers: &[String]) -> bool {
        let decision = self
            .classifications
            .decide(connection_id, is_event_stream(headers));
        if decision.newly_decided {
            if decision.is_sse {
                info!(connection = %connection_id, "Detected SSE stream");
            } else {
                debug!(connection = %connection_id, "not an SSE stream, passing through");
            }
        }
        decision.is_sse
    }

    fn emit(&self, event: &SseEvent) {
        info!(connection = %event.connection_id, "[SSE Event] {}", event.summary());
        for sink in &self.sinks {
            sink.emit(event);
        }
    }

    /// Stored classification for a connection; `None` while unclassified.
    pub fn is_sse(&self, connection_id: &ConnectionId) -> Option<bool> {
        self.classifications.get(connection_id)
    }

    /// Unterminated partial line held for a connection, if it has state.
    ///
    /// Never creates state for an unknown connection.
    pub fn pending_line(&self, connection_id: &ConnectionId) -> Option<String> {
        self.table.pending(connection_id)
    }

    /// Forget a finished connection: its buffers, accumulator, and
    /// classification. Any unterminated event is dropped.
    ///
    /// Call this only once the transport has stopped delivering for the
    /// connection. A delivery racing `close` for the same id can recreate
    /// state that nothing removes again.
    pub fn close(&self, connection_id: &ConnectionId) {
        let had_state = self.table.remove(connection_id);
        self.classifications.remove(connection_id);
        debug!(connection = %connection_id, had_state, "connection closed");
    }

    /// Drop all buffered and accumulated state and all emitted events.
    ///
    /// Classifications survive, so streams still in flight keep being
    /// parsed; their next chunk starts from an empty partial line.
    pub fn clear_all(&self) {
        self.table.clear();
        for sink in &self.sinks {
            sink.clear();
        }
        info!("Cleared all event data.");
    }

    /// Events emitted so far, in emission order.
    pub fn log(&self) -> &Arc<EventLog> {
        &self.log
    }

    /// Number of connections with buffered state.
    pub fn buffered_connections(&self) -> usize {
        self.table.len()
    }

    pub fn config(&self) -> &TapConfig {
        &self.config
    }
}

impl Default for SseTap {
    fn default() -> Self {
        Self::new(TapConfig::default())
    }
}
