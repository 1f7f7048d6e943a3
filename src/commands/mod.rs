//! Command handlers for the tfwatch CLI.
//!
//! Each subcommand has its own module with a public handler function
//! that `main()` dispatches to. Handlers return the process exit code.

pub mod check;
pub mod init;
pub mod version;
