//! Smoke tests for the crmwright CLI

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const ENV_VARS: [&str; 7] = [
    "SF_LOGIN_URL",
    "SF_USERNAME",
    "SF_PASSWORD",
    "CRMWRIGHT_HEADLESS",
    "CRMWRIGHT_WORKERS",
    "CRMWRIGHT_REPORT_DIR",
    "CHROMIUM_PATH",
];

/// Command for the crmwright binary, run in `dir` with a clean environment
fn crmwright(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("crmwright").expect("crmwright binary should exist");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    crmwright(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    crmwright(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("features"));
}

#[test]
fn test_no_args_fails() {
    let dir = TempDir::new().unwrap();
    crmwright(&dir).assert().failure();
}

#[test]
fn test_dashboard_help() {
    let dir = TempDir::new().unwrap();
    crmwright(&dir)
        .args(["dashboard", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("5500"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_redacts_password() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("crmwright.yaml"),
        "login_url: https://example.my.salesforce.com\nusername: qa@example.com\nworkers: 2\n",
    )
    .unwrap();

    crmwright(&dir)
        .arg("config")
        .env("SF_PASSWORD", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://example.my.salesforce.com"))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_config_env_overrides_file_as_json() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("ci.yaml"),
        "login_url: https://file.example.com\n",
    )
    .unwrap();

    crmwright(&dir)
        .args(["config", "--file", "ci.yaml", "--json"])
        .env("SF_LOGIN_URL", "https://env.example.com")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"login_url\": \"https://env.example.com\""));
}

#[test]
fn test_config_dotenv_is_loaded() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".env"),
        "SF_LOGIN_URL=https://dotenv.example.com\n",
    )
    .unwrap();

    crmwright(&dir)
        .args(["config", "--validate"])
        .assert()
        .success()
        .stderr(predicate::str::contains("dotenv.example.com"));
}

#[test]
fn test_config_bad_login_url_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("crmwright.yaml"), "login_url: example.com\n").unwrap();
    crmwright(&dir)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("login_url"));
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("crmwright.yaml"),
        "login_url: https://example.com\nbrowser: firefox\n",
    )
    .unwrap();
    crmwright(&dir).arg("config").assert().failure();
}

// ============================================================================
// Features
// ============================================================================

fn write_features(dir: &TempDir) {
    let features = dir.path().join("tests/features");
    fs::create_dir_all(&features).unwrap();
    fs::write(
        features.join("accounts.feature"),
        "@accounts\nFeature: Accounts\n\n  @smoke\n  Scenario: Create an account\n    Given I am logged in\n",
    )
    .unwrap();
    fs::write(
        features.join("cases.feature"),
        "@mode:serial\nFeature: Cases\n\n  Scenario: Open a case\n    Given I am logged in\n\n  Scenario: Close the case\n    Given I am logged in\n",
    )
    .unwrap();
}

#[test]
fn test_features_lists_modes() {
    let dir = TempDir::new().unwrap();
    write_features(&dir);

    crmwright(&dir)
        .args(["--color", "never", "features"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Create an account"))
        .stdout(predicate::str::contains("Close the case"))
        .stdout(predicate::str::contains("3 scenario(s), 2 serial, 1 parallel"));
}

#[test]
fn test_features_tag_filter_json() {
    let dir = TempDir::new().unwrap();
    write_features(&dir);

    crmwright(&dir)
        .args(["features", "--tags", "@smoke", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Create an account\""))
        .stdout(predicate::str::contains("Open a case").not());
}

#[test]
fn test_features_missing_dir_fails() {
    let dir = TempDir::new().unwrap();
    crmwright(&dir)
        .args(["features", "--dir", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere"));
}
