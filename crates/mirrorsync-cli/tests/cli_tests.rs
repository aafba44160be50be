use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn setup() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("source");
    fs::create_dir_all(source.join("docs")).unwrap();
    fs::write(source.join("docs/readme.md"), "readme").unwrap();
    fs::write(source.join("top.txt"), "top").unwrap();
    tmp
}

fn mirror_once(tmp: &Path, extra: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("mirrorsync").unwrap();
    cmd.arg("--once")
        .arg("--no-config")
        .args(extra)
        .arg(tmp.join("source"))
        .arg(tmp.join("replica"))
        .arg("1")
        .arg(tmp.join("sync.log"))
        .assert()
}

#[test]
fn test_help_output() {
    let mut cmd = Command::cargo_bin("mirrorsync").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("One-way directory mirroring"))
        .stdout(predicate::str::contains("SOURCE"))
        .stdout(predicate::str::contains("REPLICA"))
        .stdout(predicate::str::contains("INTERVAL"))
        .stdout(predicate::str::contains("LOG_FILE"));
}

#[test]
fn test_version_output() {
    let mut cmd = Command::cargo_bin("mirrorsync").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_missing_arguments() {
    let mut cmd = Command::cargo_bin("mirrorsync").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_invalid_interval() {
    let mut cmd = Command::cargo_bin("mirrorsync").unwrap();
    cmd.args(["src", "dst", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'soon'"));
}

#[test]
fn test_zero_interval() {
    let mut cmd = Command::cargo_bin("mirrorsync").unwrap();
    cmd.args(["src", "dst", "0"]).assert().failure();
}

#[test]
fn test_missing_source_directory() {
    let tmp = TempDir::new().unwrap();

    mirror_once(tmp.path(), &[])
        .failure()
        .stderr(predicate::str::contains("Source directory does not exist"));
}

#[test]
fn test_config_and_no_config_conflict() {
    let mut cmd = Command::cargo_bin("mirrorsync").unwrap();
    cmd.args(["--config", "x.toml", "--no-config", "src", "dst"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_once_mirrors_tree() {
    let tmp = setup();

    mirror_once(tmp.path(), &[])
        .success()
        .stdout(predicate::str::contains("] - Created: "))
        .stdout(predicate::str::contains("] - Successfully synced"));

    assert_eq!(
        fs::read_to_string(tmp.path().join("replica/docs/readme.md")).unwrap(),
        "readme"
    );
    assert_eq!(
        fs::read_to_string(tmp.path().join("replica/top.txt")).unwrap(),
        "top"
    );
}

#[test]
fn test_quiet_suppresses_echo() {
    let tmp = setup();

    mirror_once(tmp.path(), &["--quiet"])
        .success()
        .stdout(predicate::str::is_empty());

    let log = fs::read_to_string(tmp.path().join("sync.log")).unwrap();
    assert!(log.contains("] - Successfully synced"));
}

#[test]
fn test_log_is_appended_across_runs() {
    let tmp = setup();

    mirror_once(tmp.path(), &["--quiet"]).success();
    let first = fs::read_to_string(tmp.path().join("sync.log")).unwrap();

    mirror_once(tmp.path(), &["--quiet"]).success();
    let second = fs::read_to_string(tmp.path().join("sync.log")).unwrap();

    assert!(second.starts_with(&first));
    let markers = second
        .lines()
        .filter(|l| l.ends_with("] - Successfully synced"))
        .count();
    assert_eq!(markers, 2);
    // Second run found nothing to do
    assert_eq!(second.lines().count(), first.lines().count() + 1);
}

#[test]
fn test_dry_run_changes_nothing() {
    let tmp = setup();

    mirror_once(tmp.path(), &["--dry-run", "--quiet"]).success();

    assert!(!tmp.path().join("replica").exists());
    let log = fs::read_to_string(tmp.path().join("sync.log")).unwrap();
    assert!(!log.contains("Created"));
}

#[test]
fn test_config_file_supplies_defaults() {
    let tmp = setup();
    let config = tmp.path().join("mirror.toml");
    fs::write(&config, "quiet = true\n").unwrap();

    let mut cmd = Command::cargo_bin("mirrorsync").unwrap();
    cmd.arg("--once")
        .arg("--config")
        .arg(&config)
        .arg(tmp.path().join("source"))
        .arg(tmp.path().join("replica"))
        .arg("1")
        .arg(tmp.path().join("sync.log"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(tmp.path().join("replica/top.txt").exists());
}
