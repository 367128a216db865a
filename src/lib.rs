//! ssetap - Server-Sent Events reassembly for intercepted HTTP traffic
//!
//! Classifies intercepted responses, reassembles SSE lines across arbitrary
//! chunk boundaries, and frames them into events per connection.
//!
//! This library exposes modules for use in integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod intercept;
pub mod sse;
pub mod tap;
pub mod traits;
