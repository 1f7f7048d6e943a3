//! Configuration loading for tfwatch.
//!
//! Options come from `.tfwatch.toml` (or `tfwatch.toml`), found by walking up
//! from the current directory until a `.git` boundary, or from an explicit path.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::terraform::{DEFAULT_BINARY, FlagSet};

/// File names searched for, in order of precedence.
pub const CONFIG_FILES: &[&str] = &[".tfwatch.toml", "tfwatch.toml"];

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config file at {path}: {message}")]
    ParseError { path: String, message: String },
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Terraform executable (default: "terraform")
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Check all files when watching starts (default: true)
    #[serde(default = "default_true")]
    pub all_on_start: bool,

    /// Show diffs of the changes (default: true)
    #[serde(default = "default_true")]
    pub diff: bool,

    /// Fix the formatting instead of just verifying (default: false)
    #[serde(default)]
    pub write: bool,

    /// Root directory for whole-project runs (default: ".")
    #[serde(default = "default_project_root")]
    pub project_root: String,

    /// Exit with an error code when `tfwatch check` fails (default: true)
    #[serde(default = "default_true")]
    pub fail_on_error: bool,

    /// Print every executed command in `tfwatch check` (default: true)
    #[serde(default = "default_true")]
    pub verbose: bool,
}

fn default_binary() -> String {
    DEFAULT_BINARY.to_string()
}

fn default_project_root() -> String {
    ".".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            all_on_start: true,
            diff: true,
            write: false,
            project_root: default_project_root(),
            fail_on_error: true,
            verbose: true,
        }
    }
}

impl Config {
    /// Flags passed to every `terraform fmt` call. `check` is the inverse of `write`.
    pub fn flags(&self) -> FlagSet {
        FlagSet::from_options(self.diff, self.write)
    }

    pub fn from_toml(content: &str, path: &Path) -> Result<Config, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            source: e,
            path: path.display().to_string(),
        })?;
        Self::from_toml(&content, path)
    }
}

/// A config together with the file it came from, if any.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub path: Option<PathBuf>,
}

/// Load configuration from `explicit_path`, or discover it upward from `start_dir`.
///
/// With `isolated` set, no discovery happens and defaults are used.
pub fn load_config(
    explicit_path: Option<&Path>,
    start_dir: &Path,
    isolated: bool,
) -> Result<LoadedConfig, ConfigError> {
    let path = match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None if isolated => None,
        None => discover_config_upward(start_dir),
    };

    match path {
        Some(path) => {
            log::debug!("[tfwatch-config] Loading {}", path.display());
            Ok(LoadedConfig {
                config: Config::load_file(&path)?,
                path: Some(path),
            })
        }
        None => Ok(LoadedConfig::default()),
    }
}

/// Find the nearest config file at or above `start_dir`, stopping at a `.git` directory.
pub fn discover_config_upward(start_dir: &Path) -> Option<PathBuf> {
    const MAX_DEPTH: usize = 100; // Prevent infinite traversal

    let mut current_dir = start_dir.to_path_buf();
    for _ in 0..MAX_DEPTH {
        log::debug!("[tfwatch-config] Searching for config in: {}", current_dir.display());

        for config_name in CONFIG_FILES {
            let config_path = current_dir.join(config_name);
            if config_path.is_file() {
                log::debug!("[tfwatch-config] Found config file: {}", config_path.display());
                return Some(config_path);
            }
        }

        if current_dir.join(".git").exists() {
            log::debug!("[tfwatch-config] Stopping at .git directory");
            return None;
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => {
                log::debug!("[tfwatch-config] Reached filesystem root");
                return None;
            }
        }
    }

    log::debug!("[tfwatch-config] Maximum traversal depth reached");
    None
}
