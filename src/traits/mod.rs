//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`EventSink`] - receiver of completed SSE events

pub mod sink;

pub use sink::{CollectingSink, EventSink};
