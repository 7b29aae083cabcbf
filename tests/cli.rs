//! Binary-level checks of the argument and exit-code contract.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_mentions_the_pipeline() {
    Command::cargo_bin("tubedigest")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("URL"));
}

#[test]
fn missing_url_exits_nonzero() {
    Command::cargo_bin("tubedigest")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("URL"));
}

#[test]
fn invalid_url_exits_nonzero_without_creating_folders() {
    let work = tempfile::tempdir().unwrap();

    Command::cargo_bin("tubedigest")
        .unwrap()
        .current_dir(work.path())
        .arg("not-a-url")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL format"));

    assert!(!work.path().join("videos").exists());
}
