//! Unified error type for ssetap.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised outside the parsing core.
#[derive(Debug, Error)]
pub enum TapError {
    /// An environment variable held a value that could not be parsed.
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Config {
        key: String,
        value: String,
        reason: String,
    },

    /// Command-line arguments could not be understood.
    #[error("{0}")]
    Usage(String),

    /// A capture file could not be read.
    #[error("Failed to read capture {}: {source}", path.display())]
    Capture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A capture did not contain a complete HTTP header block.
    #[error("Capture {} has no header/body separator", path.display())]
    MalformedCapture { path: PathBuf },

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An event could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TapError {
    /// Check if this error was caused by how the tool was invoked.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            TapError::Config { .. } | TapError::Usage(_) | TapError::MalformedCapture { .. }
        )
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            TapError::Config { .. } => "E_TAP_CONFIG",
            TapError::Usage(_) => "E_TAP_USAGE",
            TapError::Capture { .. } => "E_TAP_CAPTURE",
            TapError::MalformedCapture { .. } => "E_TAP_MALFORMED",
            TapError::Io(_) => "E_TAP_IO",
            TapError::Json(_) => "E_TAP_JSON",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = TapError::Config {
            key: "SSETAP_FEED_CAPACITY".to_string(),
            value: "lots".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for SSETAP_FEED_CAPACITY: \"lots\" (invalid digit found in string)"
        );
        assert!(err.is_user_error());
        assert_eq!(err.error_code(), "E_TAP_CONFIG");
    }

    #[test]
    fn test_capture_error_keeps_source() {
        let err = TapError::Capture {
            path: PathBuf::from("/tmp/missing.http"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/tmp/missing.http"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_from_conversions() {
        let io: TapError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe").into();
        assert_eq!(io.error_code(), "E_TAP_IO");

        let json: TapError = serde_json::from_str::<u32>("x").unwrap_err().into();
        assert_eq!(json.error_code(), "E_TAP_JSON");
    }
}
