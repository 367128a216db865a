//! Common test utilities for integration tests.
//!
//! Fixtures and helpers for driving an `SseTap` the way an interception
//! layer would: headers with the first delivery, then body chunks.

#![allow(dead_code)]

use ssetap::sse::SseEvent;
use ssetap::tap::{ConnectionId, Delivery, SseTap};

/// Header lines announcing an SSE body.
pub fn sse_headers() -> Vec<String> {
    vec![
        "HTTP/1.1 200 OK".to_string(),
        "Content-Type: text/event-stream; charset=utf-8".to_string(),
        "Cache-Control: no-cache".to_string(),
    ]
}

/// Header lines for an ordinary JSON response.
pub fn json_headers() -> Vec<String> {
    vec![
        "HTTP/1.1 200 OK".to_string(),
        "Content-Type: application/json".to_string(),
    ]
}

/// Deliver `parts` in order for one connection, headers on the first part.
pub fn deliver(tap: &SseTap, id: &ConnectionId, headers: Vec<String>, parts: &[&[u8]]) -> Vec<SseEvent> {
    let mut parts = parts.iter();
    let first = parts.next().copied().unwrap_or_default();

    let mut events = tap
        .process(Delivery::first(id.clone(), headers, first.to_vec()))
        .into_events();
    for part in parts {
        events.extend(
            tap.process(Delivery::continuation(id.clone(), part.to_vec()))
                .into_events(),
        );
    }
    events
}

/// The fields that must not depend on chunking or timing.
pub fn shape(events: &[SseEvent]) -> Vec<(Option<String>, Option<String>, String)> {
    events
        .iter()
        .map(|e| (e.event.clone(), e.id.clone(), e.data.clone()))
        .collect()
}
