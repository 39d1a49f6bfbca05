//! Binary-level tests: startup configuration is fatal when incomplete.

use assert_cmd::Command;
use predicates::prelude::*;

fn statuswatch() -> Command {
    let mut cmd = Command::cargo_bin("statuswatch").unwrap();
    // Start from a clean slate so host credentials can't leak into tests.
    cmd.env_clear();
    cmd
}

#[test]
fn test_help_runs() {
    statuswatch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_watch_without_credentials_is_fatal() {
    statuswatch()
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "missing required environment variable: PRACTICUM_TOKEN",
        ));
}

#[test]
fn test_check_reports_missing_variables() {
    statuswatch()
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("PRACTICUM_TOKEN"))
        .stdout(predicate::str::contains("TELEGRAM_TOKEN"))
        .stdout(predicate::str::contains("TELEGRAM_CHAT_ID"))
        .stderr(predicate::str::contains("configuration is incomplete"));
}

#[test]
fn test_check_passes_with_full_configuration() {
    statuswatch()
        .arg("check")
        .env("PRACTICUM_TOKEN", "api-token")
        .env("TELEGRAM_TOKEN", "bot-token")
        .env("TELEGRAM_CHAT_ID", "12345")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ready to watch"));
}
