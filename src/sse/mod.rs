//! SSE (Server-Sent Events) stream parser
//!
//! Turns intercepted response bodies into discrete events.
//! SSE format consists of:
//! - `event: <type>` - event type line
//! - `data: <payload>` - data payload line (repeatable, joined with `\n`)
//! - `id: <id>` - event id line
//! - Empty line - signals end of event
//! - Lines starting with `:` - comments (ignored)
//!
//! `retry:` and any other field names are ignored.
//!
//! # Module structure
//! - `classify` - content-type sniffing over header lines
//! - `reassembler` - line reassembly across chunk boundaries
//! - `events` - event record and in-progress accumulator
//! - `parser` - framing state machine (SseParser, parse_sse_line)
//! - `stream` - lazy event stream over body chunks

mod classify;
mod events;
mod parser;
mod reassembler;
mod stream;

// Re-export public types
pub use classify::is_event_stream;
pub use events::{PendingEvent, SseEvent, SseLine};
pub use parser::{parse_sse_line, SseParser};
pub use reassembler::{decode_utf8, reassemble, LineBuffer, Reassembled};
pub use stream::event_stream;
