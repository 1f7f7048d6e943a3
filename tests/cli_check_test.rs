#![cfg(unix)]

mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{FakeTerraform, touch};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

#[test]
#[serial]
fn test_check_modern_runs_once_recursively() {
    let terraform = FakeTerraform::new("1.5.3");
    let project = tempdir().unwrap();
    touch(project.path(), "main.tf");

    cargo_bin_cmd!("tfwatch")
        .current_dir(project.path())
        .args(["check", "--no-config", "--binary", terraform.binary_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inspecting Terraform formatting for ."))
        .stdout(predicate::str::contains("fmt -diff=true -write=false -check=true -recursive=true ."));

    assert_eq!(terraform.calls(), vec!["fmt -diff=true -write=false -check=true -recursive=true ."]);
}

#[test]
#[serial]
fn test_check_legacy_adds_tfvars_files() {
    let terraform = FakeTerraform::new("0.11.14");
    let project = tempdir().unwrap();
    touch(project.path(), "main.tf");
    touch(project.path(), "foo.tfvars");
    touch(project.path(), "env/prod.tfvars");
    touch(project.path(), ".terraform/cached.tfvars");

    cargo_bin_cmd!("tfwatch")
        .current_dir(project.path())
        .args(["check", "--no-config", "--binary", terraform.binary_str()])
        .assert()
        .success();

    assert_eq!(
        terraform.calls(),
        vec![
            "fmt -diff=true -write=false -check=true .",
            "fmt -diff=true -write=false -check=true env/prod.tfvars",
            "fmt -diff=true -write=false -check=true foo.tfvars",
        ]
    );
}

#[test]
#[serial]
fn test_check_failure_exits_with_one() {
    let terraform = FakeTerraform::new("1.5.3");
    let project = tempdir().unwrap();
    touch(project.path(), "unformatted/main.tf");

    cargo_bin_cmd!("tfwatch")
        .current_dir(project.path())
        .args([
            "check",
            "--no-config",
            "--binary",
            terraform.binary_str(),
            "--project-root",
            "unformatted",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Terraform file formatting check failed"));
}

#[test]
#[serial]
fn test_legacy_failure_still_runs_every_path() {
    let terraform = FakeTerraform::new("0.11.0");
    let project = tempdir().unwrap();
    touch(project.path(), "a.tfvars");
    touch(project.path(), "unformatted.tfvars");
    touch(project.path(), "z.tfvars");

    cargo_bin_cmd!("tfwatch")
        .current_dir(project.path())
        .args(["check", "--no-config", "--binary", terraform.binary_str()])
        .assert()
        .code(1);

    assert_eq!(terraform.calls().len(), 4);
}

#[test]
#[serial]
fn test_no_fail_on_error_exits_zero() {
    let terraform = FakeTerraform::new("1.5.3");
    let project = tempdir().unwrap();

    cargo_bin_cmd!("tfwatch")
        .current_dir(project.path())
        .args([
            "check",
            "--no-config",
            "--binary",
            terraform.binary_str(),
            "--project-root",
            "unformatted",
            "--no-fail-on-error",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Terraform file formatting check failed"));
}

#[test]
#[serial]
fn test_write_disables_check() {
    let terraform = FakeTerraform::new("1.5.3");
    let project = tempdir().unwrap();

    cargo_bin_cmd!("tfwatch")
        .current_dir(project.path())
        .args(["check", "--no-config", "--write", "--no-diff", "--binary", terraform.binary_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Auto-correcting Terraform formatting for ."));

    assert_eq!(terraform.calls(), vec!["fmt -diff=false -write=true -check=false -recursive=true ."]);
}

#[test]
#[serial]
fn test_check_reads_discovered_config() {
    let terraform = FakeTerraform::new("1.5.3");
    let project = tempdir().unwrap();
    fs::create_dir(project.path().join(".git")).unwrap();
    fs::write(
        project.path().join(".tfwatch.toml"),
        format!("binary = \"{}\"\nwrite = true\nverbose = false\n", terraform.binary_str()),
    )
    .unwrap();
    touch(project.path(), "modules/vpc/main.tf");

    cargo_bin_cmd!("tfwatch")
        .current_dir(project.path().join("modules/vpc"))
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("fmt -diff").not());

    assert_eq!(terraform.calls(), vec!["fmt -diff=true -write=true -check=false -recursive=true ."]);
}

#[test]
#[serial]
fn test_missing_terraform_is_a_tool_error() {
    let project = tempdir().unwrap();
    let missing = project.path().join("no-such-terraform");

    cargo_bin_cmd!("tfwatch")
        .current_dir(project.path())
        .args(["check", "--no-config", "--binary", missing.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Terraform not found"));
}

#[test]
#[serial]
fn test_unknown_config_key_is_a_tool_error() {
    let project = tempdir().unwrap();
    fs::write(project.path().join(".tfwatch.toml"), "colour = \"red\"\n").unwrap();

    cargo_bin_cmd!("tfwatch")
        .current_dir(project.path())
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse config file"));
}
