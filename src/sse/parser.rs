//! SSE framing logic
//!
//! Contains the stateful [`SseParser`] that accumulates fields line by line
//! and emits a complete event at each blank line.

use tracing::trace;

use crate::sse::events::{PendingEvent, SseEvent, SseLine};
use crate::tap::ConnectionId;

/// Parse a single reassembled SSE line into its component type
///
/// Prefixes are matched in order: comment, `event:`, `data:`, `id:`. Field
/// values are trimmed. A line that is empty after trimming is a boundary;
/// anything else is [`SseLine::Unknown`].
pub fn parse_sse_line(line: &str) -> SseLine {
    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("id:") {
        return SseLine::Id(rest.trim().to_string());
    }

    if line.trim().is_empty() {
        return SseLine::Empty;
    }

    SseLine::Unknown(line.to_string())
}

/// Stateful SSE framer for one connection
#[derive(Debug)]
pub struct SseParser {
    connection_id: ConnectionId,
    session: String,
    /// Fields seen since the last blank line
    pending: PendingEvent,
}

impl SseParser {
    /// Create a parser that stamps events with `connection_id` and `session`.
    pub fn new(connection_id: ConnectionId, session: impl Into<String>) -> Self {
        Self {
            connection_id,
            session: session.into(),
            pending: PendingEvent::default(),
        }
    }

    /// Feed a line to the parser, potentially returning a complete event
    ///
    /// Only a blank line can emit, and only when at least one field was set
    /// since the previous boundary. The accumulator is reset at every blank
    /// line either way.
    pub fn feed_line(&mut self, line: &str) -> Option<SseEvent> {
        match parse_sse_line(line) {
            SseLine::Comment(_) => None,
            SseLine::Event(name) => {
                self.pending.event = Some(name);
                None
            }
            SseLine::Data(piece) => {
                self.pending.push_data(&piece);
                None
            }
            SseLine::Id(id) => {
                self.pending.id = Some(id);
                None
            }
            SseLine::Empty => self.pending.finish(&self.connection_id, &self.session),
            SseLine::Unknown(line) => {
                trace!(connection = %self.connection_id, line = %line, "ignoring unrecognized SSE line");
                None
            }
        }
    }

    /// Feed several lines, collecting emitted events in order.
    pub fn feed_lines<I, S>(&mut self, lines: I) -> Vec<SseEvent>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| self.feed_line(line.as_ref()))
            .collect()
    }

    /// Fields collected for the event not yet terminated.
    pub fn pending(&self) -> &PendingEvent {
        &self.pending
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.pending = PendingEvent::default();
    }
}
