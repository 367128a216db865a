//! Connection identity and the per-delivery input/output types.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sse::SseEvent;

/// Opaque identifier correlating every chunk of one request/response exchange.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id, for hosts that don't hand out their own references.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ConnectionId {
    fn from(reference: u64) -> Self {
        Self(reference.to_string())
    }
}

impl From<&str> for ConnectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ConnectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One intercepted body chunk handed over by the transport.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub connection_id: ConnectionId,
    /// Response header lines, present when the transport has analyzed the
    /// response metadata for this delivery (typically the first one)
    pub headers: Option<Vec<String>>,
    /// Body bytes for this delivery; may be empty
    pub body: Bytes,
}

impl Delivery {
    /// A delivery carrying the response headers.
    pub fn first(
        connection_id: impl Into<ConnectionId>,
        headers: Vec<String>,
        body: impl Into<Bytes>,
    ) -> Self {
        Self {
            connection_id: connection_id.into(),
            headers: Some(headers),
            body: body.into(),
        }
    }

    /// A follow-up delivery with body bytes only.
    pub fn continuation(connection_id: impl Into<ConnectionId>, body: impl Into<Bytes>) -> Self {
        Self {
            connection_id: connection_id.into(),
            headers: None,
            body: body.into(),
        }
    }
}

/// What the tap did with a delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkOutcome {
    /// No headers have been seen for this connection yet; chunk not processed
    Unclassified,
    /// Connection is not SSE; chunk passed through untouched
    Passthrough,
    /// Connection is SSE; events completed by this chunk, in order
    Parsed(Vec<SseEvent>),
}

impl ChunkOutcome {
    /// Events completed by this delivery (empty unless `Parsed`).
    pub fn events(&self) -> &[SseEvent] {
        match self {
            ChunkOutcome::Parsed(events) => events,
            ChunkOutcome::Unclassified | ChunkOutcome::Passthrough => &[],
        }
    }

    pub fn into_events(self) -> Vec<SseEvent> {
        match self {
            ChunkOutcome::Parsed(events) => events,
            ChunkOutcome::Unclassified | ChunkOutcome::Passthrough => Vec::new(),
        }
    }
}
