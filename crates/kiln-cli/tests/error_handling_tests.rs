//! Tests for error handling, suggestions and exit codes.

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kiln(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kiln").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("KILN_PROGRESS__SETTLE_MS", "0")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_error_empty_project_name() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["new", "   ", "-f", "react"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("project name must not be empty"))
        .stderr(predicate::str::contains("Suggestions:"));

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_error_missing_framework() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["new", "app"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no framework selected"));
}

#[test]
fn test_error_framework_platform_mismatch() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["new", "app", "-p", "mobile", "-f", "react"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not support the mobile platform"))
        .stderr(predicate::str::contains("website"));
}

#[test]
fn test_error_incompatible_feature() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["new", "app", "-p", "desktop", "-f", "tauri", "-F", "analytics"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not available for framework 'tauri'"));
}

#[test]
fn test_error_unknown_feature() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["new", "app", "-f", "react", "-F", "teleport"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown feature 'teleport'"));
}

#[test]
fn test_error_unknown_framework_in_list() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["list", "features", "--framework", "cobol"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown framework 'cobol'"));
}

#[test]
fn test_error_unknown_platform() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["list", "frameworks", "--platform", "watch"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown platform 'watch'"));
}

#[test]
fn test_error_existing_file_without_force() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("my-app.jsx"), "keep me").unwrap();

    kiln(temp.path())
        .args(["new", "My App", "-f", "react"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));

    assert_eq!(
        fs::read_to_string(temp.path().join("my-app.jsx")).unwrap(),
        "keep me"
    );
}

#[test]
fn test_error_missing_config_file() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["--config", "absent.toml", "list", "frameworks"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_error_unknown_config_key() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["config", "get", "defaults.lang"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_quiet_and_verbose_conflict() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["-q", "-v", "list", "frameworks"])
        .assert()
        .code(2);
}

#[test]
fn test_verbose_error_has_no_hint() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["-v", "new", "app", "-f", "react", "-F", "teleport"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Use -v / --verbose").not());
}
