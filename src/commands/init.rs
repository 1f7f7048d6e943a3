//! Handler for the `init` command.

use anyhow::Context;
use std::path::Path;
use tfwatch_lib::config::CONFIG_FILES;
use tfwatch_lib::init::create_default_config;

use crate::exit_codes::{SUCCESS, TOOL_ERROR};

pub fn handle_init(quiet: bool) -> anyhow::Result<i32> {
    let path = Path::new(CONFIG_FILES[0]);
    let created =
        create_default_config(path).with_context(|| format!("could not write {}", path.display()))?;

    if !created {
        eprintln!("Configuration file {} already exists", path.display());
        return Ok(TOOL_ERROR);
    }
    if !quiet {
        println!("Created default configuration file: {}", path.display());
    }
    Ok(SUCCESS)
}
