pub mod config;
pub mod discovery;
pub mod init;
pub mod notifier;
pub mod orchestrator;
pub mod resolution;
pub mod task;
pub mod terraform;

pub use crate::config::Config;
pub use crate::notifier::{LogNotifier, Notifier, RunEvent};
pub use crate::orchestrator::{FormatOrchestrator, RunError};
pub use crate::task::{FormatTask, TaskOutcome};
pub use crate::terraform::{Flag, FlagSet, Generation, Terraform, TerraformError};
