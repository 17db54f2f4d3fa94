//! Binary-level smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

#[test]
fn help_lists_the_subcommands() {
    let mut cmd = Command::cargo_bin("waf-console").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("rules"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn commands_refuse_to_run_without_a_resolved_endpoint() {
    let mut cmd = Command::cargo_bin("waf-console").unwrap();
    cmd.env_remove("WAF_CONSOLE_ENDPOINT")
        .args(["status", "--config", "/nonexistent/waf-console.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No WAF endpoint configured"));
}

#[test]
fn config_check_reports_findings() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[api]\nendpoint = \"not-a-url\"").unwrap();

    let mut cmd = Command::cargo_bin("waf-console").unwrap();
    cmd.args(["config", "check", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("http:// or https://"));
}

#[test]
fn config_init_writes_a_default_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("waf-console.toml");

    let mut cmd = Command::cargo_bin("waf-console").unwrap();
    cmd.args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("[api]"));
    assert!(content.contains("timeout_seconds"));
}
