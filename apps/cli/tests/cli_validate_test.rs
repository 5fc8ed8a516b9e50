//! Integration tests for the `tunekit validate` command.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command isolated from any user or project configuration.
fn tunekit(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tunekit").unwrap();
    cmd.current_dir(temp_dir.path()).env("HOME", temp_dir.path()).env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_validate_single_valid_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("good.jsonl"), "{\"a\": 1}\n").unwrap();

    tunekit(&temp_dir)
        .arg("validate")
        .arg("good.jsonl")
        .assert()
        .success()
        .stdout(predicate::str::contains("good.jsonl"))
        .stdout(predicate::str::contains("PASSED"));
}

#[test]
fn test_validate_reports_bad_line_number() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("bad.jsonl"), "{\"a\": 1}\n{\"a\": 1,}\n").unwrap();

    tunekit(&temp_dir)
        .arg("validate")
        .arg("bad.jsonl")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("line 2:"));
}

#[test]
fn test_validate_whitespace_only_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("blank.jsonl"), "   \n\n\t\n").unwrap();

    tunekit(&temp_dir)
        .arg("validate")
        .arg("blank.jsonl")
        .assert()
        .failure()
        .stdout(predicate::str::contains("no records found"));
}

#[test]
fn test_validate_no_input_discovered() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("data")).unwrap();

    tunekit(&temp_dir)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no dataset files found"));
}

#[test]
fn test_validate_discovers_default_data_dir() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("training.jsonl"), "{\"contents\": []}\n").unwrap();
    fs::write(data.join("notes.md"), "not a dataset").unwrap();

    tunekit(&temp_dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("training.jsonl"))
        .stdout(predicate::str::contains("notes.md").not());
}

#[test]
fn test_validate_mixed_batch_checks_every_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.jsonl"), "{\"a\": 1}\n").unwrap();
    fs::write(temp_dir.path().join("b.jsonl"), "{\"a\": 1}\nnope\n").unwrap();

    tunekit(&temp_dir)
        .args(["validate", "a.jsonl", "missing.jsonl", "b.jsonl", "--json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"status\": \"failed\""))
        .stdout(predicate::str::contains("\"total\": 3"))
        .stdout(predicate::str::contains("\"passed\": 1"))
        .stdout(predicate::str::contains("file_unreadable"));
}

#[test]
fn test_validate_respects_config_data_dir() {
    let temp_dir = TempDir::new().unwrap();
    let datasets = temp_dir.path().join("datasets");
    fs::create_dir_all(&datasets).unwrap();
    fs::write(datasets.join("train.ndjson"), "{\"ok\": true}\n").unwrap();
    fs::write(temp_dir.path().join(".tunekitrc"), "data_dir = \"datasets\"\nextension = \"ndjson\"\n").unwrap();

    tunekit(&temp_dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("train.ndjson"));
}

#[test]
fn test_validate_warns_on_malformed_local_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("good.jsonl"), "{\"a\": 1}\n").unwrap();
    fs::write(temp_dir.path().join(".tunekitrc"), "epochs = [").unwrap();

    tunekit(&temp_dir)
        .args(["validate", "good.jsonl"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Ignoring configuration file"))
        .stderr(predicate::str::contains(".tunekitrc"));
}

#[cfg(unix)]
#[test]
fn test_validate_discovery_survives_dangling_symlink() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("a.jsonl"), "{\"a\": 1}\n").unwrap();
    std::os::unix::fs::symlink(data.join("gone"), data.join("b.jsonl")).unwrap();

    tunekit(&temp_dir)
        .arg("validate")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("a.jsonl"))
        .stdout(predicate::str::contains("file unreadable"));
}
