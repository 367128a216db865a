//! Replay command: feed a captured response through the tap.
//!
//! The capture is a raw HTTP response as it appeared on the wire. Its
//! headers travel with the first delivery; the body is cut into fixed-size
//! chunks the way an interception layer would hand it over piecemeal.

use std::io::Write;

use tracing::{debug, info};

use crate::cli::args::ReplayArgs;
use crate::config::TapConfig;
use crate::error::{TapError, TapResult};
use crate::intercept::ResponseParts;
use crate::tap::{ChunkOutcome, ConnectionId, Delivery, SseTap};

/// What a replay did.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    pub is_sse: bool,
    pub deliveries: usize,
    pub events: usize,
}

/// Replay `args.capture`, writing each event as a JSON line to `out`.
pub fn run_replay<W: Write>(args: &ReplayArgs, config: TapConfig, out: &mut W) -> TapResult<ReplaySummary> {
    let raw = std::fs::read(&args.capture).map_err(|source| TapError::Capture {
        path: args.capture.clone(),
        source,
    })?;
    let parts = ResponseParts::parse(&raw).ok_or_else(|| TapError::MalformedCapture {
        path: args.capture.clone(),
    })?;

    let config = match &args.session {
        Some(label) => config.with_session_label(label.clone()),
        None => config,
    };
    let tap = SseTap::new(config);
    let connection_id = ConnectionId::generate();
    debug!(
        connection = %connection_id,
        status = %parts.status_line,
        body_bytes = parts.body.len(),
        chunk_size = args.chunk_size,
        "replaying capture"
    );

    let mut chunks = parts.body.chunks(args.chunk_size);
    let first = chunks.next().unwrap_or_default();
    let mut deliveries = vec![Delivery::first(
        connection_id.clone(),
        parts.header_lines(),
        parts.body.slice_ref(first),
    )];
    deliveries.extend(
        chunks.map(|chunk| Delivery::continuation(connection_id.clone(), parts.body.slice_ref(chunk))),
    );

    let mut summary = ReplaySummary {
        is_sse: false,
        deliveries: deliveries.len(),
        events: 0,
    };
    for delivery in deliveries {
        if let ChunkOutcome::Parsed(events) = tap.process(delivery) {
            for event in &events {
                serde_json::to_writer(&mut *out, event)?;
                writeln!(out)?;
            }
            summary.events += events.len();
        }
    }
    out.flush()?;

    summary.is_sse = tap.is_sse(&connection_id).unwrap_or(false);
    if !summary.is_sse {
        info!(capture = %args.capture.display(), "not an SSE response, passed through");
    }
    if let Some(pending) = tap.pending_line(&connection_id).filter(|p| !p.is_empty()) {
        debug!(connection = %connection_id, pending = %pending, "capture ended mid-line");
    }
    tap.close(&connection_id);

    Ok(summary)
}
