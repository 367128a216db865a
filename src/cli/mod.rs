//! CLI module for ssetap.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - Replaying captured responses through the tap
//!
//! # Usage
//!
//! ```ignore
//! use ssetap::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! run_cli_command(command, TapConfig::from_env()?, &mut std::io::stdout())?;
//! ```

pub mod args;
pub mod replay;
pub mod version;

pub use args::{parse_args, CliCommand, ReplayArgs, USAGE};
pub use replay::{run_replay, ReplaySummary};
pub use version::{version_line, VERSION};

use std::io::Write;

use crate::config::TapConfig;
use crate::error::TapResult;

/// Run a parsed CLI command, writing user-facing output to `out`.
pub fn run_cli_command<W: Write>(command: CliCommand, config: TapConfig, out: &mut W) -> TapResult<()> {
    match command {
        CliCommand::Version => writeln!(out, "{}", version_line())?,
        CliCommand::Help => writeln!(out, "{}", USAGE)?,
        CliCommand::Replay(args) => {
            run_replay(&args, config, out)?;
        }
    }
    Ok(())
}
