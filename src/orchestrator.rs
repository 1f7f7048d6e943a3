//! Entry points a file-watching host calls into.
//!
//! A [`FormatOrchestrator`] is built once per process and handed by `&mut` to
//! whichever trigger fires: [`start`](FormatOrchestrator::start) when the host
//! comes up, [`run_on_modifications`](FormatOrchestrator::run_on_modifications)
//! and [`run_on_additions`](FormatOrchestrator::run_on_additions) for change
//! sets, [`run_all`](FormatOrchestrator::run_all) for the whole project.

use crate::config::Config;
use crate::notifier::{LogNotifier, Notifier, RunEvent};
use crate::resolution::{resolve_changed_paths, resolve_whole_project};
use crate::terraform::{CommandRunner, FlagSet, SystemRunner, Terraform, TerraformError};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Terraform(#[from] TerraformError),

    /// At least one `terraform fmt` invocation failed.
    #[error("Terraform format check failed")]
    RunFailed,
}

impl RunError {
    /// Whether the host should keep going after this error.
    pub fn is_run_failure(&self) -> bool {
        matches!(self, RunError::RunFailed)
    }
}

pub struct FormatOrchestrator<R: CommandRunner = SystemRunner, N: Notifier = LogNotifier> {
    terraform: Terraform<R>,
    notifier: N,
    all_on_start: bool,
    write: bool,
    project_root: String,
    flags: FlagSet,
}

impl FormatOrchestrator {
    pub fn from_config(config: &Config) -> Self {
        Self::new(Terraform::with_binary(&config.binary), config, LogNotifier)
    }
}

impl<R: CommandRunner, N: Notifier> FormatOrchestrator<R, N> {
    pub fn new(terraform: Terraform<R>, config: &Config, notifier: N) -> Self {
        let mut orchestrator = Self {
            terraform,
            notifier,
            all_on_start: true,
            write: false,
            project_root: String::new(),
            flags: FlagSet::new(),
        };
        orchestrator.reconfigure(config);
        orchestrator
    }

    /// Pick up new options. The cached Terraform version is kept.
    pub fn reconfigure(&mut self, config: &Config) {
        self.all_on_start = config.all_on_start;
        self.write = config.write;
        self.project_root = config.project_root.clone();
        self.flags = config.flags();
    }

    pub fn terraform(&self) -> &Terraform<R> {
        &self.terraform
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Base flags passed to every `terraform fmt` call.
    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    /// Check that Terraform is installed with a recognized version, then run
    /// over the whole project if `all-on-start` is set.
    pub fn start(&mut self) -> Result<(), RunError> {
        log::info!("tfwatch started");

        let version = self.terraform.version().ok_or_else(|| TerraformError::ToolNotFound {
            binary: self.terraform.binary().to_string(),
        })?;
        log::info!("Terraform version: {version}");
        self.terraform.generation()?;

        if self.all_on_start {
            self.run_all()?;
        }
        Ok(())
    }

    pub fn run_all(&mut self) -> Result<(), RunError> {
        let generation = self.terraform.generation()?;
        let resolved = resolve_whole_project(&self.project_root, generation);
        self.run(&resolved.paths, &resolved.extra_flags)
    }

    pub fn run_on_modifications(&mut self, paths: &[String]) -> Result<(), RunError> {
        if paths.is_empty() {
            return Ok(());
        }
        let generation = self.terraform.generation()?;
        let resolved = resolve_changed_paths(paths, generation);
        self.run(&resolved, &FlagSet::new())
    }

    /// Added files are handled exactly like modified ones.
    pub fn run_on_additions(&mut self, paths: &[String]) -> Result<(), RunError> {
        self.run_on_modifications(paths)
    }

    /// Format `paths` with the configured flags overlaid by `extra_flags`.
    pub fn run(&mut self, paths: &[String], extra_flags: &FlagSet) -> Result<(), RunError> {
        self.notifier.notify(&RunEvent::starting(paths, self.write));

        let flags = self.flags.merged(extra_flags);
        let result = self
            .terraform
            .fmt_with(paths, &flags, |_, cmd| log::debug!("{}", cmd.join(" ")));

        if result {
            return Ok(());
        }

        self.notifier.notify(&RunEvent::Failed);
        Err(RunError::RunFailed)
    }
}
