//! SSE event types and definitions
//!
//! Contains the immutable [`SseEvent`] record emitted at event boundaries,
//! the [`PendingEvent`] accumulator that collects fields between blank lines,
//! and the [`SseLine`] classification of a single reassembled line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tap::ConnectionId;

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Comment line (starts with `:`), ignored by the framer
    Comment(String),
    /// Event type declaration (e.g., "event: ping")
    Event(String),
    /// Data payload (e.g., "data: 1")
    Data(String),
    /// Event id (e.g., "id: 42")
    Id(String),
    /// Blank line - signals end of event
    Empty,
    /// Any other line, including unsupported fields such as `retry:`
    Unknown(String),
}

/// A complete event, finalized when a blank line closes a non-empty accumulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SseEvent {
    /// Connection the event was read from
    pub connection_id: ConnectionId,
    /// Passthrough session label
    pub session: String,
    /// Value of the last `event:` line, if any
    pub event: Option<String>,
    /// Value of the last `id:` line, if any
    pub id: Option<String>,
    /// All `data:` values joined with `\n`; empty when no data line was seen
    pub data: String,
    /// When the blank line closing this event was processed
    pub received_at: DateTime<Utc>,
}

impl SseEvent {
    /// Event name, or `""` when no `event:` line was seen.
    pub fn event_name(&self) -> &str {
        self.event.as_deref().unwrap_or("")
    }

    /// Event id, or `""` when no `id:` line was seen.
    pub fn event_id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    /// One-line summary used in log output.
    pub fn summary(&self) -> String {
        format!(
            "Session: {}, Event: {}, ID: {}, Data: {}",
            self.session,
            self.event.as_deref().unwrap_or("N/A"),
            self.id.as_deref().unwrap_or("N/A"),
            self.data
        )
    }
}

/// Fields collected for the event currently being framed.
///
/// `None` means the field was never set; `Some("")` means it was set to an
/// empty value, which still counts as a field for emission purposes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingEvent {
    pub event: Option<String>,
    pub id: Option<String>,
    pub data: Option<String>,
}

impl PendingEvent {
    /// True when no field has been set since the last boundary.
    pub fn is_empty(&self) -> bool {
        self.event.is_none() && self.id.is_none() && self.data.is_none()
    }

    /// Append one `data:` value, joining with `\n` after the first.
    pub fn push_data(&mut self, piece: &str) {
        match self.data.as_mut() {
            Some(data) => {
                data.push('\n');
                data.push_str(piece);
            }
            None => self.data = Some(piece.to_string()),
        }
    }

    /// Take the accumulated fields and stamp them into an immutable event.
    ///
    /// Returns `None` (and leaves the accumulator reset) when nothing was set.
    pub fn finish(&mut self, connection_id: &ConnectionId, session: &str) -> Option<SseEvent> {
        let pending = std::mem::take(self);
        if pending.is_empty() {
            return None;
        }
        Some(SseEvent {
            connection_id: connection_id.clone(),
            session: session.to_string(),
            event: pending.event,
            id: pending.id,
            data: pending.data.unwrap_or_default(),
            received_at: Utc::now(),
        })
    }
}
