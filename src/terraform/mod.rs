//! Wrapper around the `terraform` binary.
//!
//! [`Terraform`] knows how to ask the binary for its version (once) and how to
//! run `terraform fmt` over a list of paths. It has no opinion about which paths
//! or flags to use; see [`crate::resolution`] and [`crate::orchestrator`].

pub mod executor;
pub mod flags;
pub mod version;

pub use executor::{CommandRunner, ExecutorError, SystemRunner};
pub use flags::{Flag, FlagParseError, FlagSet};
pub use version::{Generation, MODERN_BOUNDARY, parse_version_output};

use std::cell::OnceCell;

/// Default executable name, looked up on PATH.
pub const DEFAULT_BINARY: &str = "terraform";

#[derive(Debug, thiserror::Error)]
pub enum TerraformError {
    #[error("Terraform not found (tried '{binary}')")]
    ToolNotFound { binary: String },

    #[error("Unrecognized Terraform version '{0}'")]
    InvalidVersion(String),
}

pub struct Terraform<R: CommandRunner = SystemRunner> {
    binary: String,
    runner: R,
    version: OnceCell<Option<String>>,
}

impl Terraform<SystemRunner> {
    pub fn new() -> Self {
        Self::with_binary(DEFAULT_BINARY)
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self::with_runner(binary, SystemRunner)
    }
}

impl Default for Terraform<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> Terraform<R> {
    pub fn with_runner(binary: impl Into<String>, runner: R) -> Self {
        Self {
            binary: binary.into(),
            runner,
            version: OnceCell::new(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// The installed Terraform version, or `None` if the binary is missing or
    /// printed something unexpected.
    ///
    /// `terraform version` is run at most once per instance.
    pub fn version(&self) -> Option<&str> {
        self.version.get_or_init(|| self.query_version()).as_deref()
    }

    fn query_version(&self) -> Option<String> {
        match self.runner.capture(&self.binary, &["version".to_string()]) {
            Ok(output) => {
                let version = parse_version_output(&output);
                if version.is_none() {
                    log::debug!("Unexpected output from '{} version': {:?}", self.binary, output);
                }
                version
            }
            Err(ExecutorError::ToolNotFound { tool }) => {
                log::debug!("'{tool}' not found in PATH");
                None
            }
            Err(e) => {
                log::debug!("{e}");
                None
            }
        }
    }

    /// Which `fmt` behavior the installed version has.
    pub fn generation(&self) -> Result<Generation, TerraformError> {
        let version = self.version().ok_or_else(|| TerraformError::ToolNotFound {
            binary: self.binary.clone(),
        })?;
        Generation::classify(version)
    }

    /// Whether the installed version predates 0.12.
    pub fn is_legacy(&self) -> Result<bool, TerraformError> {
        self.generation().map(Generation::is_legacy)
    }

    /// Full command line for formatting one path, binary included.
    pub fn fmt_command(&self, path: &str, flags: &FlagSet) -> Vec<String> {
        let mut cmd = Vec::with_capacity(flags.len() + 3);
        cmd.push(self.binary.clone());
        cmd.push("fmt".to_string());
        cmd.extend(flags.to_args());
        cmd.push(path.to_string());
        cmd
    }

    /// Run `terraform fmt` once per path. See [`Terraform::fmt_with`].
    pub fn fmt(&self, paths: &[String], flags: &FlagSet) -> bool {
        self.fmt_with(paths, flags, |_, _| {})
    }

    /// Run `terraform fmt <flags> <path>` for each path in order.
    ///
    /// `on_each` receives the path and the full command before each launch.
    /// A failing path does not stop the remaining ones. Returns `true` only if
    /// every invocation exited successfully; an empty `paths` is a success.
    pub fn fmt_with<F>(&self, paths: &[String], flags: &FlagSet, mut on_each: F) -> bool
    where
        F: FnMut(&str, &[String]),
    {
        let mut result = true;

        for path in paths {
            let cmd = self.fmt_command(path, flags);
            on_each(path, &cmd);

            let succeeded = match self.runner.status(&cmd[0], &cmd[1..]) {
                Ok(success) => success,
                Err(e) => {
                    log::warn!("{e}");
                    false
                }
            };

            // carry on failure
            result = succeeded && result;
        }

        result
    }
}
