//! Error handling for the fallible outer surfaces of ssetap.
//!
//! The parsing core never fails on malformed input; unrecognized lines are
//! ignored and undecodable bytes are replaced. Errors here come from
//! configuration, capture files, command-line arguments, and output.

mod tap_error;

pub use tap_error::TapError;

/// Type alias for Results using TapError.
pub type TapResult<T> = Result<T, TapError>;
