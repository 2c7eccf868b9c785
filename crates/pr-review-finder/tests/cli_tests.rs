//! End-to-end tests for the `pr-review-finder` binary: exit codes, stderr
//! messages and the JSON written to stdout.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pr_review_finder::{CONFIG_ENV_VAR, DEFAULT_REPO_PATTERN, SEARCH_ACTION};
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("channels.yaml");
    fs::write(&path, contents).unwrap();
    path
}

fn run(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pr-review-finder"))
        .env_remove(CONFIG_ENV_VAR)
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_search_prints_json_contract() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "channels:\n  CZ: zeta\n  CA: alpha\n");

    let output = run(&config, &["search", "--days", "7"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let obj = value.as_object().unwrap();
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "action",
            "channels",
            "cutoff_timestamp",
            "instructions",
            "lookback_days",
            "repo_pattern",
            "review_patterns",
        ]
    );
    assert_eq!(value["action"], SEARCH_ACTION);
    assert_eq!(value["lookback_days"], 7);
    assert_eq!(value["repo_pattern"], DEFAULT_REPO_PATTERN);

    // Channel lines follow config file order
    let instructions = value["instructions"].as_str().unwrap();
    assert!(instructions.ends_with("  - zeta (CZ)\n  - alpha (CA)\n"));
}

#[test]
fn test_search_empty_options_fall_back() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "channels: {}\n");

    let output = run(&config, &["search", "--channel", "", "--repo-pattern", ""]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["repo_pattern"], DEFAULT_REPO_PATTERN);
    assert!(value["channels"].as_object().unwrap().is_empty());
}

#[test]
fn test_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("channels.yaml");

    for args in [&["search"][..], &["list-channels"][..]] {
        let output = run(&config, args);
        assert!(!output.status.success());
        assert!(stdout(&output).is_empty());
        assert!(stderr(&output).contains("channels.yaml not found"));
    }
}

#[test]
fn test_unknown_channel_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "channels:\n  C1: eng-backend\n");

    let output = run(&config, &["search", "--channel", "nope"]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Channel 'nope' not found"));
}

#[test]
fn test_huge_lookback_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "channels:\n  C1: eng\n");

    let output = run(&config, &["search", "--days", &u32::MAX.to_string()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("out of range"));
    assert!(!stderr(&output).contains("panicked"));
}

#[test]
fn test_negative_days_rejected_by_parser() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "channels:\n  C1: eng\n");

    let output = run(&config, &["search", "--days", "-3"]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_list_channels_empty_registry() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "channels:\n");

    let output = run(&config, &["list-channels"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Total: 0 channels"));
    assert!(!text.lines().any(|l| l.starts_with("  ")));
}

#[test]
fn test_classify_json() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "channels: {}\n");

    let output = run(
        &config,
        &[
            "--format",
            "json",
            "classify",
            "PTAL https://github.com/org1/api/pull/3 https://github.com/org2/api/pull/4",
            "--repo-pattern",
            "org1",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["is_review_request"], true);
    assert_eq!(
        value["pr_urls"],
        serde_json::json!(["https://github.com/org1/api/pull/3"])
    );
}
