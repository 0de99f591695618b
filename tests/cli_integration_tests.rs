//! CLI integration tests
//!
//! These tests run the extbump binary against temporary repositories.
//! Runs that reach the git step point GIT_DIR at a missing directory so git
//! fails deterministically without touching any real repository.
//!
//! NOTE: the in-process tests change the current directory and use the
//! serial_test attribute to ensure they don't interfere with each other.

mod common;

use assert_cmd::Command;
use common::{consumer_manifest, write_file};
use extbump::cli::{EXIT_ERROR, EXIT_SUCCESS};
use predicates::prelude::*;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

fn extbump(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("extbump").unwrap();
    cmd.current_dir(dir.path())
        .env("GIT_DIR", dir.path().join("no-such-git-dir"));
    cmd
}

#[test]
fn test_no_arguments_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    extbump(&temp_dir)
        .assert()
        .code(EXIT_SUCCESS)
        .stdout(predicate::str::contains("No manifests bumped"));
}

#[test]
fn test_unrelated_paths_leave_manifests_alone() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_file(
        temp_dir.path(),
        "src/en/ext/build.gradle",
        &consumer_manifest("Ext", 3, "    // :lib:unpacker\n"),
    );

    extbump(&temp_dir)
        .args(["README.md", "src/en/ext/src/Ext.kt"])
        .assert()
        .code(EXIT_SUCCESS);

    assert!(
        fs::read_to_string(&manifest)
            .unwrap()
            .contains("extVersionCode = 3\n")
    );
}

#[test]
fn test_git_failure_exits_with_error_after_rewrite() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_file(
        temp_dir.path(),
        "src/en/ext/build.gradle",
        &consumer_manifest("Ext", 3, "    // :lib:unpacker\n"),
    );

    extbump(&temp_dir)
        .arg("lib/unpacker/Unpacker.kt")
        .assert()
        .code(EXIT_ERROR)
        .stdout(predicate::str::contains("3 -> 4"))
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("git config --local user.email"));

    assert!(
        fs::read_to_string(&manifest)
            .unwrap()
            .contains("extVersionCode = 4\n")
    );
}

#[test]
fn test_invalid_config_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("extbump.toml"), "[layout]\nsource_root = \"\"\n").unwrap();

    extbump(&temp_dir)
        .arg("lib/unpacker/Unpacker.kt")
        .assert()
        .code(EXIT_ERROR)
        .stderr(predicate::str::contains("layout.source_root"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    extbump(&temp_dir).arg("--force").assert().failure();
}

#[test]
fn test_output_color_follows_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("extbump.toml"),
        "[output]\ncolor = \"always\"\n",
    )
    .unwrap();
    extbump(&temp_dir)
        .arg("lib/unpacker/Unpacker.kt")
        .assert()
        .code(EXIT_SUCCESS)
        .stdout(predicate::str::contains("\x1b["));

    fs::write(
        temp_dir.path().join("extbump.toml"),
        "[output]\ncolor = \"never\"\n",
    )
    .unwrap();
    extbump(&temp_dir)
        .arg("lib/unpacker/Unpacker.kt")
        .assert()
        .code(EXIT_SUCCESS)
        .stdout(predicate::str::contains("lib unpacker (token ':lib:unpacker')"))
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
#[serial]
fn test_run_bump_in_process_without_matches() {
    let temp_dir = TempDir::new().unwrap();
    write_file(
        temp_dir.path(),
        "src/en/ext/build.gradle",
        &consumer_manifest("Ext", 1, ""),
    );

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_dir.path()).unwrap();

    let exit_code = extbump::cli::run_bump(&["lib/nobody/uses.kt".to_string()]);

    std::env::set_current_dir(original_dir).unwrap();
    assert_eq!(exit_code, EXIT_SUCCESS);
}

#[test]
#[serial]
fn test_run_bump_in_process_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("extbump.toml"), "not = [valid").unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_dir.path()).unwrap();

    let exit_code = extbump::cli::run_bump(&[]);

    std::env::set_current_dir(original_dir).unwrap();
    assert_eq!(exit_code, EXIT_ERROR);
}
