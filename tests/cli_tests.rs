//! CLI tests for the pretty-callback binary
//!
//! This test suite covers:
//! - Rendering JSON-lines events from stdin and from a file
//! - The `--no-emoji` flag
//! - Skipping and rejecting undecodable lines
//! - Config file loading and its errors

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const EVENTS: &str = r#"{"event": "play_start", "title": "Deploy"}
{"event": "task_start", "task_name": "Install package", "role_name": "web"}
{"event": "runner_result", "outcome": "changed", "host": "web1", "task": {"name": "Install package"}}

{"event": "stats", "per_host": {"web1": {"ok": 3, "changed": 1, "skipped": 2}}}
"#;

// Helper to get a command isolated from the caller's environment
fn pretty_cmd() -> Command {
    let mut cmd = Command::cargo_bin("pretty-callback").unwrap();
    for name in [
        "NO_COLOR",
        "ANSIBLE_NOCOLOR",
        "PRETTY_NO_COLOR",
        "ANSIBLE_NO_EMOJI",
        "PRETTY_NO_EMOJI",
        "PRETTY_CLOSING_MESSAGE",
        "PRETTY_CALLBACK_CONFIG",
        "RUST_LOG",
    ] {
        cmd.env_remove(name);
    }
    cmd
}

// Helper to create an empty config so user-level files are not consulted
fn empty_config() -> NamedTempFile {
    tempfile::Builder::new().suffix(".toml").tempfile().unwrap()
}

#[test]
fn test_help() {
    pretty_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-emoji"))
        .stdout(predicate::str::contains("--strict"));
}

#[test]
fn test_renders_events_from_stdin() {
    let config = empty_config();
    pretty_cmd()
        .arg("--config")
        .arg(config.path())
        .write_stdin(EVENTS)
        .assert()
        .success()
        .stdout(predicate::str::contains("Deploy"))
        .stdout(predicate::str::contains("▶️ web role"))
        .stdout(predicate::str::contains("[web1] 🔄️ Install package (Changed)"))
        .stdout(predicate::str::contains("  ⏭️ 2 Skipped"))
        .stdout(predicate::str::contains("Setup complete."))
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_renders_events_from_file_without_emoji() {
    let config = empty_config();
    let mut events = NamedTempFile::new().unwrap();
    events.write_all(EVENTS.as_bytes()).unwrap();

    pretty_cmd()
        .arg(events.path())
        .arg("--no-emoji")
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[web1] Install package (Changed)"))
        .stdout(predicate::str::contains("  3 Successful"))
        .stdout(predicate::str::contains("✅").not());
}

#[test]
fn test_closing_message_from_config() {
    let mut config = empty_config();
    writeln!(config, "closing_message = \"Fleet ready.\"").unwrap();

    pretty_cmd()
        .arg("--config")
        .arg(config.path())
        .write_stdin(EVENTS)
        .assert()
        .success()
        .stdout(predicate::str::contains("Fleet ready."))
        .stdout(predicate::str::contains("Setup complete.").not());
}

#[test]
fn test_bad_line_is_skipped() {
    let config = empty_config();
    let input = format!("not json\n{EVENTS}");

    pretty_cmd()
        .arg("--config")
        .arg(config.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Setup complete."))
        .stderr(predicate::str::contains("skipping undecodable event"));
}

#[test]
fn test_bad_line_fails_in_strict_mode() {
    let config = empty_config();
    let input = format!("{EVENTS}{{\"event\": \"no_such_event\"}}\n");

    pretty_cmd()
        .arg("--strict")
        .arg("--config")
        .arg(config.path())
        .write_stdin(input)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to decode event on line 6"));
}

#[test]
fn test_missing_config_fails() {
    pretty_cmd()
        .arg("--config")
        .arg("/nonexistent/pretty-callback.toml")
        .write_stdin(EVENTS)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_missing_event_file_fails() {
    let config = empty_config();
    pretty_cmd()
        .arg("/nonexistent/events.jsonl")
        .arg("--config")
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open event file"));
}

#[test]
fn test_invalid_utf8_line_is_skipped() {
    let config = empty_config();
    let mut input = b"{\"event\": \"play_start\", \"title\": \"Deploy\"}\n".to_vec();
    input.extend_from_slice(b"\xff\xfe x\n");
    input.extend_from_slice(b"{\"event\": \"stats\", \"per_host\": {\"web1\": {\"ok\": 1}}}\n");

    pretty_cmd()
        .arg("--config")
        .arg(config.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("  ✅ 1 Successful"))
        .stdout(predicate::str::contains("Setup complete."))
        .stderr(predicate::str::contains("skipping undecodable event"));
}

#[test]
fn test_invalid_utf8_line_fails_in_strict_mode() {
    let config = empty_config();
    let mut input = b"{\"event\": \"play_start\", \"title\": \"Deploy\"}\n".to_vec();
    input.extend_from_slice(b"\xff\xfe x\n");

    pretty_cmd()
        .arg("--strict")
        .arg("--config")
        .arg(config.path())
        .write_stdin(input)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to decode event on line 2"));
}
