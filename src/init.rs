//!
//! This module provides initialization utilities for tfwatch, such as creating default configuration files.

use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Error type for initialization operations
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Failed to access file {path}: {source}")]
    IoError { source: io::Error, path: String },
}

pub const DEFAULT_CONFIG: &str = r#"# tfwatch configuration file

# Terraform executable to run
binary = "terraform"

# Check all files when `tfwatch watch` starts
all-on-start = true

# Show diffs of the changes (-diff)
diff = true

# Fix the formatting instead of just verifying (-write).
# When enabled, -check is disabled.
write = false

# Root directory for whole-project runs
project-root = "."

# Exit with an error code when `tfwatch check` finds unformatted files
fail-on-error = true

# Print every executed terraform command in `tfwatch check`
verbose = true
"#;

/// Create a default configuration file at the specified path.
///
/// Returns `true` if the file was created, or `false` if it already exists.
///
/// # Errors
///
/// Returns an error if the file cannot be created due to permissions or other I/O errors.
pub fn create_default_config(path: &Path) -> Result<bool, InitError> {
    if path.exists() {
        return Ok(false);
    }

    fs::write(path, DEFAULT_CONFIG).map_err(|err| InitError::IoError {
        source: err,
        path: path.display().to_string(),
    })?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config = Config::from_toml(DEFAULT_CONFIG, Path::new(".tfwatch.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_create_default_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(".tfwatch.toml");

        assert!(create_default_config(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }

    #[test]
    fn test_does_not_overwrite() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(".tfwatch.toml");
        fs::write(&path, "write = true\n").unwrap();

        assert!(!create_default_config(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "write = true\n");
    }
}
