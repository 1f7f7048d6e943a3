#![cfg(unix)]

mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::FakeTerraform;
use predicates::prelude::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn project_using(binary: &str) -> tempfile::TempDir {
    let project = tempdir().unwrap();
    fs::write(project.path().join(".tfwatch.toml"), format!("binary = \"{binary}\"\n")).unwrap();
    project
}

#[test]
#[serial]
fn test_version_reports_modern_terraform() {
    let terraform = FakeTerraform::new("1.5.3");
    let project = project_using(terraform.binary_str());

    cargo_bin_cmd!("tfwatch")
        .current_dir(project.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("tfwatch {}", env!("CARGO_PKG_VERSION"))))
        .stdout(predicate::str::contains("Terraform 1.5.3 (modern)"));
}

#[test]
#[serial]
fn test_version_reports_legacy_terraform() {
    let terraform = FakeTerraform::new("0.11.14");
    let project = project_using(terraform.binary_str());

    cargo_bin_cmd!("tfwatch")
        .current_dir(project.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Terraform 0.11.14 (legacy)"));
}

#[test]
#[serial]
fn test_version_without_terraform() {
    let project = project_using("/nonexistent/terraform");

    cargo_bin_cmd!("tfwatch")
        .current_dir(project.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("not found (/nonexistent/terraform)"));
}
