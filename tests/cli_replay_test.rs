// Integration tests for the replay command
// Captures are written to temp files and replayed through run_cli_command.

use ssetap::cli::{parse_args, run_cli_command};
use ssetap::config::TapConfig;

const CAPTURE: &[u8] = b"HTTP/1.1 200 OK\r\n\
Content-Type: text/event-stream\r\n\
\r\n\
event: ping\r\n\
data: 1\r\n\
\r\n\
: keep-alive\r\n\
data: multi\r\n\
data: line\r\n\
\r\n";

fn run(args: &[&str]) -> String {
    let argv = std::iter::once("ssetap").chain(args.iter().copied()).map(String::from);
    let command = parse_args(argv).expect("arguments should parse");
    let mut out = Vec::new();
    run_cli_command(command, TapConfig::default(), &mut out).expect("command should succeed");
    String::from_utf8(out).unwrap()
}

#[test]
fn test_replay_output_independent_of_chunk_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stream.http");
    std::fs::write(&path, CAPTURE).unwrap();
    let path = path.to_string_lossy().to_string();

    let mut outputs = Vec::new();
    for size in ["1", "3", "64", "4096"] {
        let output = run(&["replay", &path, "--chunk-size", size, "--session", "cap"]);
        let events: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(events.len(), 2, "chunk size {}", size);
        assert_eq!(events[0]["event"], "ping");
        assert_eq!(events[0]["data"], "1");
        assert_eq!(events[1]["event"], serde_json::Value::Null);
        assert_eq!(events[1]["data"], "multi\nline");
        assert_eq!(events[1]["session"], "cap");

        outputs.push(
            events
                .iter()
                .map(|e| (e["event"].clone(), e["id"].clone(), e["data"].clone()))
                .collect::<Vec<_>>(),
        );
    }
    assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_version_and_help() {
    assert!(run(&["--version"]).starts_with("ssetap "));
    assert!(run(&[]).contains("replay <capture-file>"));
}
