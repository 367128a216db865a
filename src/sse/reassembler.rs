//! Line reassembly across chunk boundaries.
//!
//! Chunks arrive split at arbitrary byte offsets: inside a line, between a
//! `\r` and its `\n`, or inside a multi-byte UTF-8 character. The pieces
//! here keep just enough trailing state to put complete lines back together.

/// Complete lines drained from a buffer plus the unterminated tail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reassembled {
    /// Lines in arrival order, without `\n` and with one trailing `\r` removed
    pub lines: Vec<String>,
    /// Text after the last `\n`; empty when the input ended on a line boundary
    pub remainder: String,
}

/// Combine a previous remainder with new text and split off complete lines.
pub fn reassemble(previous: &str, chunk: &str) -> Reassembled {
    let mut text = String::with_capacity(previous.len() + chunk.len());
    text.push_str(previous);
    text.push_str(chunk);

    let mut segments: Vec<&str> = text.split('\n').collect();
    // split always yields at least one segment; the last one is unterminated
    let remainder = segments.pop().unwrap_or_default().to_string();
    let lines = segments
        .into_iter()
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect();

    Reassembled { lines, remainder }
}

/// Decode `bytes` as UTF-8, carrying an incomplete trailing sequence.
///
/// `carry` holds bytes of a character cut off by the previous chunk; on
/// return it holds the cut-off tail of this one (at most 3 bytes). Invalid
/// sequences become U+FFFD.
pub fn decode_utf8(carry: &mut Vec<u8>, bytes: &[u8]) -> String {
    let mut input = std::mem::take(carry);
    input.extend_from_slice(bytes);

    let mut out = String::with_capacity(input.len());
    let mut rest: &[u8] = &input;
    loop {
        match std::str::from_utf8(rest) {
            Ok(text) => {
                out.push_str(text);
                break;
            }
            Err(err) => {
                let (valid, after) = rest.split_at(err.valid_up_to());
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match err.error_len() {
                    Some(len) => {
                        out.push(char::REPLACEMENT_CHARACTER);
                        rest = &after[len..];
                    }
                    None => {
                        carry.extend_from_slice(after);
                        break;
                    }
                }
            }
        }
    }
    out
}

/// Per-connection line state: the pending partial line and any UTF-8 carry.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: String,
    carry: Vec<u8>,
    /// Set by [`LineBuffer::discard`]; input is dropped through the next `\n`
    skipping: bool,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw body bytes, returning every line they complete.
    pub fn push_bytes(&mut self, chunk: &[u8]) -> Vec<String> {
        if chunk.is_empty() {
            return Vec::new();
        }
        let text = decode_utf8(&mut self.carry, chunk);
        self.push_str(&text)
    }

    /// Feed already-decoded text, returning every line it completes.
    pub fn push_str(&mut self, chunk: &str) -> Vec<String> {
        let chunk = if self.skipping {
            match chunk.find('\n') {
                Some(end) => {
                    self.skipping = false;
                    &chunk[end + 1..]
                }
                None => return Vec::new(),
            }
        } else {
            chunk
        };
        let Reassembled { lines, remainder } = reassemble(&self.pending, chunk);
        self.pending = remainder;
        lines
    }

    /// The partial line waiting for its terminator.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Replace the partial line.
    pub fn set_pending(&mut self, pending: String) {
        self.pending = pending;
    }

    /// Bytes retained between deliveries.
    pub fn retained_len(&self) -> usize {
        self.pending.len() + self.carry.len()
    }

    /// Drop the partial line and any UTF-8 carry.
    ///
    /// The rest of the dropped line is skipped as it arrives, so its tail
    /// is never read as a line of its own.
    pub fn discard(&mut self) {
        self.pending.clear();
        self.carry.clear();
        self.skipping = true;
    }

    /// Whether input is being dropped up to the end of a discarded line.
    pub fn is_skipping(&self) -> bool {
        self.skipping
    }
}
