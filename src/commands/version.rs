//! Handler for the `version` command.

use colored::*;
use tfwatch_lib::{Generation, Terraform};

use crate::exit_codes::SUCCESS;

/// Print version information for tfwatch and the Terraform it would run.
pub fn handle_version(config_path: Option<&str>, isolated: bool) -> anyhow::Result<i32> {
    println!("tfwatch {}", env!("CARGO_PKG_VERSION"));

    let config = crate::load_config(config_path, isolated)?;
    let terraform = Terraform::with_binary(&config.binary);
    match (terraform.version(), terraform.generation()) {
        (Some(version), Ok(generation)) => {
            let kind = match generation {
                Generation::Legacy => "legacy",
                Generation::Modern => "modern",
            };
            println!("Terraform {version} ({kind})");
        }
        (Some(version), Err(e)) => println!("Terraform {version} ({})", e.to_string().yellow()),
        (None, _) => println!("Terraform: {}", format!("not found ({})", terraform.binary()).yellow()),
    }
    Ok(SUCCESS)
}
