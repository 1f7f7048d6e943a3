use clap::Args;
use tfwatch_lib::Config;

/// Options shared by `check` and `watch` that override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct FormatArgs {
    /// Fix the formatting instead of just verifying (also disables -check)
    #[arg(short, long)]
    pub write: bool,

    /// Do not show diffs of the changes
    #[arg(long)]
    pub no_diff: bool,

    /// Terraform executable to run
    #[arg(long, value_name = "PATH")]
    pub binary: Option<String>,

    /// Root directory for whole-project runs
    #[arg(long, value_name = "DIR")]
    pub project_root: Option<String>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub format: FormatArgs,

    /// Report failures but exit with code 0
    #[arg(long)]
    pub no_fail_on_error: bool,

    /// Do not print the executed terraform commands
    #[arg(long)]
    pub no_print_commands: bool,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Directories to watch (default: current directory)
    #[arg(required = false)]
    pub paths: Vec<String>,

    #[command(flatten)]
    pub format: FormatArgs,

    /// Skip the whole-project run when watching starts
    #[arg(long)]
    pub skip_initial_run: bool,

    /// Clear the screen before each run
    #[arg(long)]
    pub clear: bool,
}

impl FormatArgs {
    /// Overlay the flags given on the command line onto `config`.
    pub fn apply(&self, config: &mut Config) {
        if self.write {
            config.write = true;
        }
        if self.no_diff {
            config.diff = false;
        }
        if let Some(binary) = &self.binary {
            config.binary = binary.clone();
        }
        if let Some(root) = &self.project_root {
            config.project_root = root.clone();
        }
    }
}

impl CheckArgs {
    pub fn apply(&self, config: &mut Config) {
        self.format.apply(config);
        if self.no_fail_on_error {
            config.fail_on_error = false;
        }
        if self.no_print_commands {
            config.verbose = false;
        }
    }
}

impl WatchArgs {
    pub fn apply(&self, config: &mut Config) {
        self.format.apply(config);
        if self.skip_initial_run {
            config.all_on_start = false;
        }
    }
}
