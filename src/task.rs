//! One-shot formatting task for build pipelines.
//!
//! Where the watcher reacts to change sets, a [`FormatTask`] always checks (or
//! fixes) the whole project once and reports a single outcome, which `tfwatch
//! check` turns into an exit code.

use std::io::Write;

use crate::config::Config;
use crate::resolution::{resolve_whole_project, whole_project_flags};
use crate::terraform::{CommandRunner, FlagSet, Generation, Terraform, TerraformError};

/// Outcome of running a [`FormatTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Passed,
    /// Formatting check failed; `fatal` mirrors the task's `fail_on_error`.
    Failed { fatal: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTask {
    /// Name of the task (default: "terraform")
    pub name: String,
    /// Path to the project root (default: ".")
    pub project_root: String,
    /// Show diffs of the changes? (default: true)
    pub diff: bool,
    /// Fix the formatting instead of just verifying? (default: false)
    pub write: bool,
    /// Whether a formatting failure should fail the caller. If `write` is
    /// disabled, this includes formatting issues.
    pub fail_on_error: bool,
    /// Print each executed command (default: true)
    pub verbose: bool,
}

impl Default for FormatTask {
    fn default() -> Self {
        Self {
            name: "terraform".to_string(),
            project_root: ".".to_string(),
            diff: true,
            write: false,
            fail_on_error: true,
            verbose: true,
        }
    }
}

impl FormatTask {
    pub fn from_config(config: &Config) -> Self {
        Self {
            project_root: config.project_root.clone(),
            diff: config.diff,
            write: config.write,
            fail_on_error: config.fail_on_error,
            verbose: config.verbose,
            ..Self::default()
        }
    }

    /// Paths to format for the given generation.
    pub fn paths(&self, generation: Generation) -> Vec<String> {
        resolve_whole_project(&self.project_root, generation).paths
    }

    /// Flags in the order `diff, write, check[, recursive]`.
    pub fn flags(&self, generation: Generation) -> FlagSet {
        FlagSet::from_options(self.diff, self.write).merged(&whole_project_flags(generation))
    }

    /// Run the task, writing progress messages to `out`.
    pub fn run<R, W>(&self, terraform: &Terraform<R>, out: &mut W) -> Result<TaskOutcome, TerraformError>
    where
        R: CommandRunner,
        W: Write,
    {
        log::debug!("Running task '{}'", self.name);

        let action = if self.write { "Auto-correcting" } else { "Inspecting" };
        writeln!(out, "{action} Terraform formatting for {}", self.project_root).ok();

        let generation = terraform.generation()?;
        let resolved = resolve_whole_project(&self.project_root, generation);
        let flags = FlagSet::from_options(self.diff, self.write).merged(&resolved.extra_flags);

        let passed = terraform.fmt_with(&resolved.paths, &flags, |_, cmd| {
            if self.verbose {
                writeln!(out, "{}", cmd.join(" ")).ok();
            }
        });

        if passed {
            return Ok(TaskOutcome::Passed);
        }

        writeln!(out, "Terraform file formatting check failed").ok();
        Ok(TaskOutcome::Failed {
            fatal: self.fail_on_error,
        })
    }
}
