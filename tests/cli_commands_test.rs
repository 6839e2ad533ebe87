// End-to-end tests for the triplink-lifecycle binary

use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("triplink-lifecycle").unwrap();
    cmd.env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_states_lists_all_tokens() {
    cli()
        .arg("states")
        .assert()
        .success()
        .stdout(predicate::str::contains("UNDER_REVIEW"))
        .stdout(predicate::str::contains("Under Review"))
        .stdout(predicate::str::contains("REVOKED"));
}

#[test]
fn test_check_allowed_exits_zero() {
    cli()
        .args(["check", "APPROVED", "SUSPENDED"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ allowed"));
}

#[test]
fn test_check_forbidden_exits_one() {
    cli()
        .args(["check", "SUBMITTED", "APPROVED"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("❌ not allowed"));
}

#[test]
fn test_transitions_for_unknown_state() {
    cli()
        .args(["transitions", "BOGUS"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown state"));
}

#[test]
fn test_schema_is_valid_json() {
    let output = cli().arg("schema").output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["initial_state"], "DRAFT");
    assert_eq!(value["states"].as_array().unwrap().len(), 7);
}

#[test]
fn test_replay_reports_invalid_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.jsonl");
    std::fs::write(
        &path,
        concat!(
            r#"{"subject_id":"app-1","from":"DRAFT","to":"SUBMITTED","actor":"u","occurred_at":"2026-01-01T00:00:00Z","correlation_id":"c1"}"#,
            "\n",
            r#"{"subject_id":"app-2","from":"DRAFT","to":"APPROVED","actor":"u","occurred_at":"2026-01-01T00:00:00Z","correlation_id":"c2"}"#,
            "\n"
        ),
    )
    .unwrap();

    cli()
        .arg("replay")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("app-1: SUBMITTED"))
        .stdout(predicate::str::contains("app-2: Invalid transition"));
}

#[test]
fn test_configuration_load_is_logged() {
    let mut cmd = Command::cargo_bin("triplink-lifecycle").unwrap();
    cmd.env("RUST_LOG", "triplink_lifecycle=debug")
        .arg("states")
        .assert()
        .success()
        .stderr(predicate::str::contains("Configuration loaded"));
}
