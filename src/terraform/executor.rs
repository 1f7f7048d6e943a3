//! Process execution for the external Terraform binary.
//!
//! Every call blocks until the child exits.

use std::io;
use std::process::{Command, Stdio};

/// Error launching or waiting on an external process.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    /// Binary not found on PATH.
    #[error("Tool '{tool}' not found in PATH")]
    ToolNotFound { tool: String },

    /// The process could not be spawned or waited on for another reason.
    #[error("Failed to run '{tool}': {source}")]
    Io { tool: String, source: io::Error },
}

impl ExecutorError {
    fn from_spawn(tool: &str, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::ToolNotFound { tool: tool.to_string() }
        } else {
            Self::Io {
                tool: tool.to_string(),
                source: err,
            }
        }
    }
}

/// Seam between the Terraform wrapper and the operating system.
///
/// [`SystemRunner`] is the real implementation; tests substitute a recorder.
pub trait CommandRunner {
    /// Run `program args...` and return its stdout, regardless of exit status.
    fn capture(&self, program: &str, args: &[String]) -> Result<String, ExecutorError>;

    /// Run `program args...` with inherited stdio and report whether it exited with 0.
    fn status(&self, program: &str, args: &[String]) -> Result<bool, ExecutorError>;
}

/// Runs commands with [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn capture(&self, program: &str, args: &[String]) -> Result<String, ExecutorError> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| ExecutorError::from_spawn(program, e))?;

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn status(&self, program: &str, args: &[String]) -> Result<bool, ExecutorError> {
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|e| ExecutorError::from_spawn(program, e))?;

        Ok(status.success())
    }
}
