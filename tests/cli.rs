use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CHANGELOG: &str = "# Changelog

All notable changes to this project will be documented in this file.

## [Unreleased]

## [0.2.4] - 2024-01-01

### Fixed
- Fixed a bug.

### Changed
- Faster startup.

## [0.2.3] - 2023-12-01
Initial release.
";

fn extractor(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("changelog_extractor").unwrap();
    cmd.current_dir(dir).env_remove("CHANGELOG_PATH").env_remove("RUST_LOG");
    cmd
}

fn workspace_with(changelog: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("CHANGELOG.md"), changelog).unwrap();
    dir
}

#[test]
fn extracts_middle_section() {
    let dir = workspace_with(CHANGELOG);
    extractor(dir.path())
        .arg("0.2.4")
        .assert()
        .success()
        .stdout("### Fixed\n- Fixed a bug.\n\n### Changed\n- Faster startup.\n")
        .stderr("");
}

#[test]
fn extracts_last_section() {
    let dir = workspace_with(CHANGELOG);
    extractor(dir.path())
        .arg("0.2.3")
        .assert()
        .success()
        .stdout("Initial release.\n");
}

#[test]
fn empty_section_prints_single_newline() {
    let dir = workspace_with("## [0.1.0] - 2023-01-01\n");
    extractor(dir.path()).arg("0.1.0").assert().success().stdout("\n");

    let dir = workspace_with(CHANGELOG);
    extractor(dir.path()).arg("Unreleased").assert().success().stdout("\n");
}

#[test]
fn version_argument_is_trimmed() {
    let dir = workspace_with(CHANGELOG);
    extractor(dir.path())
        .arg("  0.2.3 ")
        .assert()
        .success()
        .stdout("Initial release.\n");
}

#[test]
fn version_matched_literally() {
    let dir = workspace_with("## [1x2x3] - 2024-01-01\nwrong\n");
    extractor(dir.path())
        .arg("1.2.3")
        .assert()
        .code(1)
        .stdout("");
}

#[test]
fn missing_version_exits_1() {
    let dir = workspace_with(CHANGELOG);
    extractor(dir.path())
        .arg("9.9.9")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Could not find CHANGELOG section for version 9.9.9"));
}

#[test]
fn empty_version_exits_2_before_reading() {
    // No CHANGELOG.md here: the version is rejected first
    let dir = tempfile::tempdir().unwrap();
    for version in ["", "   "] {
        extractor(dir.path())
            .arg(version)
            .assert()
            .code(2)
            .stdout("")
            .stderr(predicate::str::contains("Version cannot be empty"));
    }
}

#[test]
fn wrong_argument_count_exits_2() {
    let dir = workspace_with(CHANGELOG);
    extractor(dir.path()).assert().code(2).stdout("");
    extractor(dir.path())
        .args(["0.2.4", "0.2.3"])
        .assert()
        .code(2)
        .stdout("");
}

#[test]
fn missing_changelog_fails() {
    let dir = tempfile::tempdir().unwrap();
    extractor(dir.path())
        .arg("0.2.4")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Failed to read CHANGELOG.md"));
}

#[test]
fn repeated_runs_are_identical() {
    let dir = workspace_with(CHANGELOG);
    let first = extractor(dir.path()).arg("0.2.4").output().unwrap();
    let second = extractor(dir.path()).arg("0.2.4").output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn changelog_path_from_flag_and_env() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs").join("HISTORY.md"), CHANGELOG).unwrap();

    extractor(dir.path())
        .args(["0.2.3", "--changelog", "docs/HISTORY.md"])
        .assert()
        .success()
        .stdout("Initial release.\n");

    extractor(dir.path())
        .arg("0.2.3")
        .env("CHANGELOG_PATH", "docs/HISTORY.md")
        .assert()
        .success()
        .stdout("Initial release.\n");
}

#[test]
fn output_file_receives_section() {
    let dir = workspace_with(CHANGELOG);
    extractor(dir.path())
        .args(["0.2.3", "--output", "dist/RELEASE_NOTES.md"])
        .assert()
        .success()
        .stdout("");

    let written = fs::read_to_string(dir.path().join("dist").join("RELEASE_NOTES.md")).unwrap();
    assert_eq!(written, "Initial release.\n");
}

#[test]
fn output_file_not_created_when_missing() {
    let dir = workspace_with(CHANGELOG);
    extractor(dir.path())
        .args(["9.9.9", "-o", "RELEASE_NOTES.md"])
        .assert()
        .code(1);

    assert!(!dir.path().join("RELEASE_NOTES.md").exists());
}

#[test]
fn json_format() {
    let dir = workspace_with(CHANGELOG);
    let output = extractor(dir.path())
        .args(["0.2.3", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["version"], "0.2.3");
    assert_eq!(value["heading"], "## [0.2.3] - 2023-12-01");
    assert_eq!(value["heading_line"], 15);
    assert_eq!(value["end_line"], 17);
    assert_eq!(value["content"], "Initial release.\n");
    assert!(value["extracted_at"].is_string());
}

#[test]
fn help_flag() {
    let dir = tempfile::tempdir().unwrap();
    extractor(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("VERSION"));
}
