//! A stand-in `terraform` executable for CLI tests.
//!
//! The script answers `version` with the configured version, appends every
//! other invocation to a log file, and fails any `fmt` whose target path
//! contains "unformatted".
#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct FakeTerraform {
    _dir: TempDir,
    pub binary: PathBuf,
    log: PathBuf,
}

impl FakeTerraform {
    pub fn new(version: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("terraform");
        let log = dir.path().join("calls.log");

        let script = format!(
            r#"#!/bin/sh
if [ "$1" = "version" ]; then
  echo "Terraform v{version}"
  echo ""
  echo "Your version of Terraform is out of date!"
  exit 0
fi
echo "$*" >> "{log}"
for arg in "$@"; do last="$arg"; done
case "$last" in
  *unformatted*) exit 3 ;;
esac
exit 0
"#,
            log = log.display()
        );
        fs::write(&binary, script).unwrap();
        fs::set_permissions(&binary, fs::Permissions::from_mode(0o755)).unwrap();

        Self { _dir: dir, binary, log }
    }

    pub fn binary_str(&self) -> &str {
        self.binary.to_str().unwrap()
    }

    /// Arguments of each non-version invocation, in order.
    pub fn calls(&self) -> Vec<String> {
        match fs::read_to_string(&self.log) {
            Ok(content) => content.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Create `name` (and its parent directories) under `dir`.
pub fn touch(dir: &Path, name: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "").unwrap();
}
