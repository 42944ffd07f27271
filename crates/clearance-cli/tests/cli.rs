use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn clearance(dir: &TempDir) -> Command {
    let config = dir.path().join("config.json");
    if !config.exists() {
        fs::write(&config, "{}").unwrap();
    }
    let mut cmd = Command::cargo_bin("clearance").unwrap();
    cmd.arg("--config").arg(&config);
    cmd
}

#[test]
fn batch_leaves_unreadable_file_in_place() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("inpdf");
    let processed = input.join("processed");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("bad.pdf"), b"not a pdf").unwrap();

    clearance(&dir)
        .arg("batch")
        .arg("--input-dir")
        .arg(&input)
        .arg("--processed-dir")
        .arg(&processed)
        .arg("--output")
        .arg(dir.path().join("out.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed files:"))
        .stdout(predicate::str::contains("bad.pdf"));

    assert!(input.join("bad.pdf").exists());
    assert!(processed.is_dir());
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn batch_on_empty_directory_creates_it() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("fresh");

    clearance(&dir)
        .arg("batch")
        .arg("--input-dir")
        .arg(&input)
        .arg("--processed-dir")
        .arg(input.join("done"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No files found"));

    assert!(input.join("done").is_dir());
}

#[test]
fn process_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    clearance(&dir)
        .arg("process")
        .arg(dir.path().join("missing.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn config_get_and_set() {
    let dir = TempDir::new().unwrap();

    clearance(&dir)
        .args(["config", "get", "layout.split_x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("202.0"));

    clearance(&dir)
        .args(["config", "set", "output.header_style", "localized"])
        .assert()
        .success();

    clearance(&dir)
        .args(["config", "get", "output.header_style"])
        .assert()
        .success()
        .stdout(predicate::str::contains("localized"));
}

#[test]
fn config_path_reports_explicit_file() {
    let dir = TempDir::new().unwrap();

    clearance(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"))
        .stdout(predicate::str::contains("exists"));
}
