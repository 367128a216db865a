//! Lazy event stream over a body delivered as byte chunks.
//!
//! Same reassembly and framing as the tap, for callers that own the
//! byte stream of a single response themselves.

use std::collections::VecDeque;

use bytes::Bytes;
use futures_util::stream::{self, Stream};
use futures_util::StreamExt;

use crate::sse::parser::SseParser;
use crate::sse::reassembler::LineBuffer;
use crate::sse::SseEvent;
use crate::tap::ConnectionId;

/// Turn a stream of body chunks into a stream of events, in arrival order.
///
/// Events are produced as soon as their terminating blank line arrives.
/// When the chunk stream ends, an event without its blank line is dropped.
pub fn event_stream<S>(
    chunks: S,
    connection_id: ConnectionId,
    session: impl Into<String>,
) -> impl Stream<Item = SseEvent> + Send
where
    S: Stream<Item = Bytes> + Send + Unpin,
{
    let parser = SseParser::new(connection_id, session);
    stream::unfold(
        (chunks, LineBuffer::new(), parser, VecDeque::<String>::new()),
        |(mut chunks, mut buffer, mut parser, mut lines)| async move {
            loop {
                // First, drain complete lines already reassembled
                while let Some(line) = lines.pop_front() {
                    if let Some(event) = parser.feed_line(&line) {
                        return Some((event, (chunks, buffer, parser, lines)));
                    }
                }

                // Need more data from the stream
                let chunk = chunks.next().await?;
                lines.extend(buffer.push_bytes(&chunk));
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(parts: &[&'static str]) -> impl Stream<Item = Bytes> + Send + Unpin {
        let chunks: Vec<Bytes> = parts
            .iter()
            .copied()
            .map(|p: &'static str| Bytes::from_static(p.as_bytes()))
            .collect();
        stream::iter(chunks)
    }

    #[tokio::test]
    async fn test_stream_yields_events_in_order() {
        let events: Vec<SseEvent> = event_stream(
            chunks(&["event: ping\ndata: 1\n", "id: 42\n\nevent: pong\ndata: 2\n\n"]),
            ConnectionId::from(1u64),
            "SSE Session",
        )
        .collect()
        .await;

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_name(), "ping");
        assert_eq!(events[0].data, "1");
        assert_eq!(events[0].event_id(), "42");
        assert_eq!(events[1].event_name(), "pong");
        assert_eq!(events[1].event_id(), "");
    }

    #[tokio::test]
    async fn test_stream_drops_unterminated_tail() {
        let events: Vec<SseEvent> = event_stream(
            chunks(&["data: a\n\n", "data: b\n"]),
            ConnectionId::from(1u64),
            "s",
        )
        .collect()
        .await;

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "a");
    }

    #[tokio::test]
    async fn test_stream_is_lazy() {
        let mut events = Box::pin(event_stream(
            chunks(&["data: a\n\n", "data: b\n\n", ": idle\n"]),
            ConnectionId::from(1u64),
            "s",
        ));

        assert_eq!(events.next().await.map(|e| e.data), Some("a".to_string()));
        assert_eq!(events.next().await.map(|e| e.data), Some("b".to_string()));
        assert!(events.next().await.is_none());
    }
}
