//! Tap configuration.
//!
//! Use the builder pattern to customize behavior, or read overrides from
//! the environment with [`TapConfig::from_env`].
//!
//! # Example
//!
//! ```
//! use ssetap::config::TapConfig;
//!
//! let config = TapConfig::default()
//!     .with_session_label("upstream")
//!     .with_max_pending_bytes(Some(64 * 1024));
//! assert_eq!(config.session_label, "upstream");
//! ```

use crate::error::{TapError, TapResult};

/// Label stamped on events when none is configured.
pub const DEFAULT_SESSION_LABEL: &str = "SSE Session";

/// Default capacity of the live event feed.
pub const DEFAULT_FEED_CAPACITY: usize = 1000;

pub const ENV_SESSION_LABEL: &str = "SSETAP_SESSION_LABEL";
pub const ENV_FEED_CAPACITY: &str = "SSETAP_FEED_CAPACITY";
pub const ENV_MAX_PENDING_BYTES: &str = "SSETAP_MAX_PENDING_BYTES";

/// Configuration for an [`SseTap`](crate::tap::SseTap).
#[derive(Debug, Clone, PartialEq)]
pub struct TapConfig {
    /// Passthrough label stamped on every event
    pub session_label: String,
    /// How many events the live feed buffers per subscriber
    pub feed_capacity: usize,
    /// Cap on a connection's unterminated partial line; `None` is unbounded.
    /// When exceeded the line is dropped through its terminator, along with
    /// the event it belongs to.
    pub max_pending_bytes: Option<usize>,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            session_label: DEFAULT_SESSION_LABEL.to_string(),
            feed_capacity: DEFAULT_FEED_CAPACITY,
            max_pending_bytes: None,
        }
    }
}

impl TapConfig {
    /// Create a new TapConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session label.
    pub fn with_session_label(mut self, label: impl Into<String>) -> Self {
        self.session_label = label.into();
        self
    }

    /// Set the live feed capacity.
    pub fn with_feed_capacity(mut self, capacity: usize) -> Self {
        self.feed_capacity = capacity;
        self
    }

    /// Set the per-connection partial line cap.
    pub fn with_max_pending_bytes(mut self, max: Option<usize>) -> Self {
        self.max_pending_bytes = max;
        self
    }

    /// Defaults overridden by `SSETAP_*` environment variables.
    pub fn from_env() -> TapResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `SSETAP_*` key.
    pub fn from_lookup<F>(lookup: F) -> TapResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(label) = lookup(ENV_SESSION_LABEL) {
            config.session_label = label;
        }
        if let Some(value) = lookup(ENV_FEED_CAPACITY) {
            config.feed_capacity = parse_usize(ENV_FEED_CAPACITY, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_PENDING_BYTES) {
            config.max_pending_bytes = Some(parse_usize(ENV_MAX_PENDING_BYTES, &value)?);
        }

        Ok(config)
    }
}

fn parse_usize(key: &str, value: &str) -> TapResult<usize> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| TapError::Config {
        key: key.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}
