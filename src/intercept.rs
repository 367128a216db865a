//! Splitting a raw intercepted HTTP response into metadata and body.
//!
//! Interception layers usually hand over the response exactly as it was on
//! the wire. The tap needs header lines for classification and body bytes
//! for framing; this finds the boundary between them.

use bytes::Bytes;

/// Status line, header lines, and body of a raw HTTP/1.x response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseParts {
    /// First line, e.g. `HTTP/1.1 200 OK`
    pub status_line: String,
    /// Header lines without terminators, in wire order
    pub headers: Vec<String>,
    /// Offset of the first body byte in the raw response
    pub body_offset: usize,
    /// Body bytes (everything after the blank line)
    pub body: Bytes,
}

impl ResponseParts {
    /// Parse a raw response. Returns `None` until the header block is complete.
    ///
    /// The header block ends at the first `\r\n\r\n` or `\n\n`. Header bytes
    /// are decoded lossily.
    pub fn parse(raw: &[u8]) -> Option<Self> {
        let (head_end, body_offset) = find_header_end(raw)?;
        let head = String::from_utf8_lossy(&raw[..head_end]);

        let mut lines = head
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string());
        let status_line = lines.next().unwrap_or_default();
        let headers = lines.filter(|line| !line.is_empty()).collect();

        Some(Self {
            status_line,
            headers,
            body_offset,
            body: Bytes::copy_from_slice(&raw[body_offset..]),
        })
    }

    /// Status line followed by header lines, the shape the classifier takes.
    pub fn header_lines(&self) -> Vec<String> {
        std::iter::once(self.status_line.clone())
            .chain(self.headers.iter().cloned())
            .collect()
    }
}

/// Returns (end of header text, start of body).
fn find_header_end(raw: &[u8]) -> Option<(usize, usize)> {
    for (i, window) in raw.windows(2).enumerate() {
        if window == b"\n\n" {
            return Some((i, i + 2));
        }
        if window == b"\r\n" && raw[i + 2..].starts_with(b"\r\n") {
            return Some((i, i + 4));
        }
    }
    None
}
