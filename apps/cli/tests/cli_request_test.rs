//! Integration tests for `tunekit stats` and `tunekit request`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const EXAMPLE: &str = r#"{"systemInstruction": {"parts": [{"text": "be brief"}]}, "contents": [{"role": "user", "parts": [{"text": "hi"}]}, {"role": "model", "parts": [{"text": "hello"}]}]}"#;

fn tunekit(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tunekit").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("HOME", temp_dir.path())
        .env("NO_COLOR", "1")
        .env_remove("GCP_PROJECT")
        .env_remove("GCP_LOCATION");
    cmd
}

fn write_default_dataset(temp_dir: &TempDir, content: &str) {
    let data = temp_dir.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("training.jsonl"), content).unwrap();
}

#[test]
fn test_stats_default_path() {
    let temp_dir = TempDir::new().unwrap();
    write_default_dataset(&temp_dir, &format!("{EXAMPLE}\n{EXAMPLE}\n"));

    tunekit(&temp_dir)
        .args(["stats", "--json", "--epochs", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"examples\": 2"))
        .stdout(predicate::str::contains("\"characters\": 30"))
        .stdout(predicate::str::contains("\"characters_for_epochs\": 60"));
}

#[test]
fn test_stats_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    tunekit(&temp_dir)
        .args(["stats", "nowhere.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_request_prints_body() {
    let temp_dir = TempDir::new().unwrap();
    write_default_dataset(&temp_dir, &format!("{EXAMPLE}\n"));

    tunekit(&temp_dir)
        .args(["request", "--bucket", "tuning-data", "--prefix", "support", "--epochs", "4", "--json"])
        .env("GCP_PROJECT", "demo-project")
        .env("GCP_LOCATION", "us-central1")
        .assert()
        .success()
        .stdout(predicate::str::contains("gs://tuning-data/support/"))
        .stdout(predicate::str::contains("\"epochCount\": 4"))
        .stdout(predicate::str::contains("\"baseModel\": \"gemini-2.0-flash-001\""))
        .stdout(predicate::str::contains(
            "https://us-central1-aiplatform.googleapis.com/v1/projects/demo-project/locations/us-central1/tuningJobs",
        ));
}

#[test]
fn test_request_refuses_invalid_dataset() {
    let temp_dir = TempDir::new().unwrap();
    write_default_dataset(&temp_dir, &format!("{EXAMPLE}\n{{broken\n"));

    tunekit(&temp_dir)
        .args(["request", "--bucket", "tuning-data"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing"))
        .stdout(predicate::str::contains("line 2:"))
        .stdout(predicate::str::contains("baseModel").not());
}

#[test]
fn test_request_requires_bucket() {
    let temp_dir = TempDir::new().unwrap();
    write_default_dataset(&temp_dir, &format!("{EXAMPLE}\n"));

    tunekit(&temp_dir)
        .arg("request")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bucket is required"));
}
