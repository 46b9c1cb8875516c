//! End-to-end tests of the `qff` binary.

use std::io::Write;
use std::process::{Command, Output};

use serde_json::Value;

fn qff_with_env(args: &[&str], vars: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_qff"));
    cmd.args(args);
    for key in [
        "QFF_CONFIG",
        "QFF_SHOTS",
        "QFF_ITERATIONS",
        "QFF_SEED",
        "QFF_BIND",
        "QFF_LOG_LEVEL",
        "QFF_LOG_FORMAT",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd.envs(vars.iter().copied());
    cmd.output().expect("run qff")
}

fn qff(args: &[&str]) -> Output {
    qff_with_env(args, &[])
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("json on stdout")
}

// ============================================================================
// search
// ============================================================================

#[test]
fn test_search_json_finds_target() {
    let output = qff(&["search", "Friend_5", "--seed", "1", "--json"]);
    let body = stdout_json(&output);

    assert_eq!(body["friend"], "Friend_5");
    assert_eq!(body["target_bin"], "0000000101");
    assert_eq!(body["found"], true);
    assert_eq!(body["total_shots"], 1024);
    assert!(body["top"].as_array().unwrap().len() <= 10);
    assert!(body.get("circuit_diagram").is_none());
}

#[test]
fn test_search_json_with_circuit() {
    let output = qff(&["search", "Friend_1023", "--seed", "2", "--json", "--show-circuit"]);
    let body = stdout_json(&output);

    assert_eq!(body["target_bin"], "1111111111");
    let diagram = body["circuit_diagram"].as_str().unwrap();
    assert!(diagram.lines().all(|l| l.chars().count() <= 150));
}

#[test]
fn test_search_same_seed_same_phone() {
    let a = stdout_json(&qff(&["search", "Friend_9", "--seed", "3", "--json"]));
    let b = stdout_json(&qff(&["search", "Friend_9", "--seed", "3", "--json"]));
    assert_eq!(a["phone"], b["phone"]);
    assert_eq!(a["top"], b["top"]);
}

#[test]
fn test_search_unknown_friend_fails() {
    let output = qff(&["search", "Nobody", "--seed", "1"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("Unknown friend: Nobody"));
}

#[test]
fn test_search_writes_histogram() {
    let dir = tempfile::tempdir().unwrap();
    let output = qff(&[
        "search",
        "Friend_12",
        "--seed",
        "4",
        "--histogram",
        dir.path().to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let png = std::fs::read(dir.path().join("top10_histogram.png")).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Phone Number:"));
    assert!(stdout.contains("Target Binary Index:"));
    assert!(stdout.contains("State `0000001100` → "));
}

#[test]
fn test_search_rejects_zero_shots() {
    let output = qff(&["search", "Friend_1", "--shots", "0"]);
    assert_eq!(output.status.code(), Some(1));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_file_sets_shots() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "search:\n  shots: 256\n  top_k: 3").unwrap();

    let output = qff(&[
        "--config",
        file.path().to_str().unwrap(),
        "search",
        "Friend_2",
        "--seed",
        "5",
        "--json",
    ]);
    let body = stdout_json(&output);
    assert_eq!(body["total_shots"], 256);
    assert!(body["top"].as_array().unwrap().len() <= 3);
}

#[test]
fn test_invalid_config_file_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "logging:\n  level: loud").unwrap();

    let output = qff(&["--config", file.path().to_str().unwrap(), "version"]);
    // version does not read configuration
    assert!(output.status.success());

    let output = qff(&["--config", file.path().to_str().unwrap(), "friends"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_env_overrides_shots() {
    let output = qff_with_env(
        &["search", "Friend_3", "--seed", "2", "--json"],
        &[("QFF_SHOTS", "300")],
    );
    let body = stdout_json(&output);
    assert_eq!(body["total_shots"], 300);
}

#[test]
fn test_unparseable_env_fails() {
    let output = qff_with_env(&["friends", "--limit", "1"], &[("QFF_SHOTS", "lots")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("QFF_SHOTS"));
}

// ============================================================================
// friends / version
// ============================================================================

#[test]
fn test_friends_limit() {
    let output = qff(&["friends", "--limit", "3", "--seed", "1"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Friend_0"));
    assert!(lines[2].contains("0000000010"));
}

#[test]
fn test_version() {
    let output = qff(&["version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}
