//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary and verify outputs. Every run points
//! FOCUSWELL_CONFIG at a file that does not exist so defaults apply.

use std::io::Write;
use std::process::{Command, Stdio};

fn absent_config() -> std::path::PathBuf {
    std::env::temp_dir().join("focuswell-cli-tests-absent-config.toml")
}

/// Run a CLI command with `stdin` piped in and return (code, stdout, stderr).
fn run_cli_with_input(args: &[&str], stdin: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_focuswell"))
        .args(args)
        .env("FOCUSWELL_CONFIG", absent_config())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(stdin.as_bytes())
        .expect("write stdin");

    let output = child.wait_with_output().expect("wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_cli(args: &[&str]) -> (i32, String, String) {
    run_cli_with_input(args, "")
}

/// JSON snapshot lines (events carry a "type" tag, snapshots do not).
fn snapshots(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .filter(|value| value.get("type").is_none())
        .collect()
}

#[test]
fn test_config_list() {
    let output = run_cli(&["config", "list"]);
    assert!(output.0 == 0, "Config list failed: {}", output.2);
    let parsed: serde_json::Value = serde_json::from_str(&output.1).unwrap();
    assert_eq!(parsed["durations"]["focus"], 25);
    assert_eq!(parsed["durations"]["break"], 5);
}

#[test]
fn test_config_get() {
    let output = run_cli(&["config", "get", "alerts.locale"]);
    assert!(output.0 == 0, "Config get failed");
    assert_eq!(output.1.trim(), "en-US");
}

#[test]
fn test_config_get_unknown_key() {
    let output = run_cli(&["config", "get", "durations.nap"]);
    assert!(output.0 != 0, "unknown key should fail");
    assert!(output.2.contains("unknown key"));
}

#[test]
fn test_config_path_honours_override() {
    let output = run_cli(&["config", "path"]);
    assert!(output.0 == 0, "Config path failed");
    assert_eq!(output.1.trim(), absent_config().display().to_string());
}

#[test]
fn test_run_prints_initial_snapshot_and_quits() {
    let output = run_cli_with_input(&["run", "--json", "--no-speech"], "quit\n");
    assert!(output.0 == 0, "Run failed: {}", output.2);
    let snaps = snapshots(&output.1);
    assert!(!snaps.is_empty());
    assert_eq!(snaps[0]["focus"]["mode"], "focus");
    assert_eq!(snaps[0]["focus"]["remaining_secs"], 1500);
    assert_eq!(snaps[0]["health"]["is_running"], true);
    assert_eq!(snaps[0]["hydration_total"], 0);
}

#[test]
fn test_run_applies_duration_edit() {
    let output = run_cli_with_input(
        &["run", "--json", "--no-speech"],
        "set focus -3\nstatus\nquit\n",
    );
    assert!(output.0 == 0, "Run failed: {}", output.2);
    let last = snapshots(&output.1).pop().expect("snapshot");
    assert_eq!(last["focus_minutes"], 1);
    assert_eq!(last["focus"]["remaining_secs"], 60);
    assert_eq!(last["focus"]["display"], "01:00");
}

#[test]
fn test_run_flags_override_durations() {
    let output = run_cli_with_input(&["run", "--json", "--no-speech", "--break", "7"], "break\n");
    assert!(output.0 == 0, "Run failed: {}", output.2);
    let last = snapshots(&output.1).pop().expect("snapshot");
    assert_eq!(last["focus"]["mode"], "break");
    assert_eq!(last["focus"]["remaining_secs"], 420);
}

#[test]
fn test_run_reports_unknown_command() {
    let output = run_cli_with_input(&["run", "--no-speech"], "dance\nquit\n");
    assert!(output.0 == 0, "Run failed");
    assert!(output.2.contains("unknown command"));
}
