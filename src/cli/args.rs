//! Command-line argument parsing for the ssetap CLI.

use std::path::PathBuf;

use crate::error::{TapError, TapResult};

/// Default number of body bytes per simulated delivery.
pub const DEFAULT_CHUNK_SIZE: usize = 64;

pub const USAGE: &str = "\
Usage: ssetap replay <capture-file> [--chunk-size N] [--session LABEL]
       ssetap --version
       ssetap --help

Replays a raw HTTP response capture through the SSE tap in chunks and
prints every parsed event as one JSON object per line.";

/// Options for the `replay` command.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayArgs {
    pub capture: PathBuf,
    pub chunk_size: usize,
    /// Overrides the configured session label
    pub session: Option<String>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Replay a capture file
    Replay(ReplayArgs),
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use ssetap::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["ssetap".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap(), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> TapResult<CliCommand>
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args = args.skip(1);

    match args.next().as_deref() {
        None | Some("--help") | Some("-h") => Ok(CliCommand::Help),
        Some("--version") | Some("-V") => Ok(CliCommand::Version),
        Some("replay") => parse_replay(args).map(CliCommand::Replay),
        Some(other) => Err(TapError::Usage(format!("unknown command '{}'\n\n{}", other, USAGE))),
    }
}

fn parse_replay<I>(mut args: I) -> TapResult<ReplayArgs>
where
    I: Iterator<Item = String>,
{
    let mut capture = None;
    let mut chunk_size = DEFAULT_CHUNK_SIZE;
    let mut session = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--chunk-size" => {
                let value = args.next().ok_or_else(|| missing_value("--chunk-size"))?;
                chunk_size = match value.parse::<usize>() {
                    Ok(size) if size > 0 => size,
                    _ => {
                        return Err(TapError::Usage(format!(
                            "--chunk-size must be a positive integer, got '{}'",
                            value
                        )))
                    }
                };
            }
            "--session" => {
                session = Some(args.next().ok_or_else(|| missing_value("--session"))?);
            }
            flag if flag.starts_with("--") => {
                return Err(TapError::Usage(format!("unknown flag '{}'\n\n{}", flag, USAGE)));
            }
            _ if capture.is_none() => capture = Some(PathBuf::from(&arg)),
            _ => {
                return Err(TapError::Usage(format!("unexpected argument '{}'", arg)));
            }
        }
    }

    let capture = capture.ok_or_else(|| TapError::Usage(format!("missing capture file\n\n{}", USAGE)))?;
    Ok(ReplayArgs {
        capture,
        chunk_size,
        session,
    })
}

fn missing_value(flag: &str) -> TapError {
    TapError::Usage(format!("{} requires a value", flag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> TapResult<CliCommand> {
        let args: Vec<String> = std::iter::once("ssetap")
            .chain(args.iter().copied())
            .map(String::from)
            .collect();
        parse_args(args.into_iter())
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]).unwrap(), CliCommand::Version);
        assert_eq!(parse(&["-V"]).unwrap(), CliCommand::Version);
    }

    #[test]
    fn test_parse_no_args_is_help() {
        assert_eq!(parse(&[]).unwrap(), CliCommand::Help);
        assert_eq!(parse(&["-h"]).unwrap(), CliCommand::Help);
    }

    #[test]
    fn test_parse_replay_defaults() {
        assert_eq!(
            parse(&["replay", "capture.http"]).unwrap(),
            CliCommand::Replay(ReplayArgs {
                capture: PathBuf::from("capture.http"),
                chunk_size: DEFAULT_CHUNK_SIZE,
                session: None,
            })
        );
    }

    #[test]
    fn test_parse_replay_options_in_any_order() {
        assert_eq!(
            parse(&["replay", "--chunk-size", "7", "c.http", "--session", "api"]).unwrap(),
            CliCommand::Replay(ReplayArgs {
                capture: PathBuf::from("c.http"),
                chunk_size: 7,
                session: Some("api".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_replay_errors() {
        assert!(matches!(parse(&["replay"]), Err(TapError::Usage(_))));
        assert!(matches!(parse(&["replay", "c", "--chunk-size", "0"]), Err(TapError::Usage(_))));
        assert!(matches!(parse(&["replay", "c", "--chunk-size"]), Err(TapError::Usage(_))));
        assert!(matches!(parse(&["replay", "c", "--bogus"]), Err(TapError::Usage(_))));
        assert!(matches!(parse(&["replay", "a", "b"]), Err(TapError::Usage(_))));
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = parse(&["serve"]).unwrap_err();
        assert!(err.to_string().contains("unknown command 'serve'"));
    }
}
