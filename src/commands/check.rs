//! Handler for the `check` command.

use std::io;

use colored::*;
use tfwatch_lib::{FormatTask, TaskOutcome, Terraform};

use crate::cli_types::CheckArgs;
use crate::exit_codes::{FORMAT_FAILED, SUCCESS};

/// Check (or fix) the whole project once.
pub fn handle_check(args: &CheckArgs, config_path: Option<&str>, isolated: bool) -> anyhow::Result<i32> {
    let mut config = crate::load_config(config_path, isolated)?;
    args.apply(&mut config);

    let task = FormatTask::from_config(&config);
    let terraform = Terraform::with_binary(&config.binary);

    let mut out = io::stdout().lock();
    let outcome = task.run(&terraform, &mut out)?;

    Ok(match outcome {
        TaskOutcome::Passed => SUCCESS,
        TaskOutcome::Failed { fatal: true } => FORMAT_FAILED,
        TaskOutcome::Failed { fatal: false } => {
            eprintln!("{}: formatting issues ignored (fail-on-error is off)", "Warning".yellow().bold());
            SUCCESS
        }
    })
}
