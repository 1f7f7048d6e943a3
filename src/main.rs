use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::Path;
use tfwatch_lib::Config;
use tfwatch_lib::config::{LoadedConfig, load_config as load_config_from};

mod cli_types;
mod commands;
mod exit_codes;
mod watch;

use cli_types::{CheckArgs, WatchArgs};
use exit_codes::exit;

#[derive(Parser)]
#[command(author, version, about = "Keep Terraform files formatted with `terraform fmt`", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<String>,

    /// Ignore any configuration file and use the defaults
    #[arg(long, global = true, conflicts_with = "config")]
    no_config: bool,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show warnings and failures
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check (or fix) the formatting of the whole project once
    Check(CheckArgs),
    /// Watch directories and format Terraform files as they change
    Watch(WatchArgs),
    /// Create a default .tfwatch.toml in the current directory
    Init,
    /// Show tfwatch and Terraform versions
    Version,
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Load the config file (if any) the same way for every command.
pub fn load_config_with_path(config_path: Option<&str>, isolated: bool) -> anyhow::Result<LoadedConfig> {
    let start_dir = std::env::current_dir().context("could not determine the current directory")?;
    let loaded = load_config_from(config_path.map(Path::new), &start_dir, isolated)?;
    if let Some(path) = &loaded.path {
        log::debug!("Using configuration from {}", path.display());
    }
    Ok(loaded)
}

pub fn load_config(config_path: Option<&str>, isolated: bool) -> anyhow::Result<Config> {
    load_config_with_path(config_path, isolated).map(|loaded| loaded.config)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config_path = cli.config.as_deref();
    let isolated = cli.no_config;

    let result = match &cli.command {
        Commands::Check(args) => commands::check::handle_check(args, config_path, isolated),
        Commands::Watch(args) => watch::run_watch_mode(args, config_path, isolated, cli.quiet),
        Commands::Init => commands::init::handle_init(cli.quiet),
        Commands::Version => commands::version::handle_version(config_path, isolated),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}
