//! Content-type sniffing for intercepted responses.

const CONTENT_TYPE_PREFIX: &str = "content-type:";
const EVENT_STREAM_MIME: &str = "text/event-stream";

/// Decide whether a response's header lines announce an SSE body.
///
/// True iff some line, trimmed and lowercased, starts with `content-type:`
/// and its value contains `text/event-stream`. Lines that don't match
/// (including the status line and malformed headers) are skipped.
pub fn is_event_stream<S: AsRef<str>>(headers: &[S]) -> bool {
    headers.iter().any(|header| {
        let header = header.as_ref().trim().to_ascii_lowercase();
        header
            .strip_prefix(CONTENT_TYPE_PREFIX)
            .is_some_and(|value| value.contains(EVENT_STREAM_MIME))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_event_stream_with_charset() {
        let headers = [
            "HTTP/1.1 200 OK",
            "Content-Type: text/event-stream; charset=utf-8",
            "Cache-Control: no-cache",
        ];
        assert!(is_event_stream(&headers));
    }

    #[test]
    fn test_case_insensitive_and_trimmed() {
        assert!(is_event_stream(&["  CONTENT-TYPE: Text/Event-Stream  "]));
        assert!(is_event_stream(&["content-type:text/event-stream"]));
    }

    #[test]
    fn test_other_content_types_rejected() {
        assert!(!is_event_stream(&["Content-Type: application/json"]));
        assert!(!is_event_stream(&["Content-Type: text/plain"]));
    }

    #[test]
    fn test_mime_outside_content_type_ignored() {
        let headers = ["Accept: text/event-stream", "X-Note: content-type: text/event-stream"];
        assert!(!is_event_stream(&headers));
    }

    #[test]
    fn test_empty_and_malformed_headers() {
        let empty: [&str; 0] = [];
        assert!(!is_event_stream(&empty));
        assert!(!is_event_stream(&["", ":", "content-type", "\u{0}garbage"]));
    }

    #[test]
    fn test_accepts_owned_strings() {
        let headers = vec!["Content-Type: text/event-stream".to_string()];
        assert!(is_event_stream(&headers));
    }
}
