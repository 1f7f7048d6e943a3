//! Events the orchestrator reports to whoever is hosting it.

use std::fmt;

/// Something the host may want to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// A format run is about to start.
    Starting {
        targets: usize,
        description: String,
        write: bool,
    },
    /// The run finished and at least one invocation failed.
    Failed,
}

impl RunEvent {
    /// Build a [`RunEvent::Starting`] for the given path list.
    pub fn starting(paths: &[String], write: bool) -> Self {
        RunEvent::Starting {
            targets: paths.len(),
            description: describe_targets(paths),
            write,
        }
    }
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunEvent::Starting { description, write, .. } => {
                let verb = if *write { "Enforcing" } else { "Inspecting" };
                write!(f, "{verb} Terraform formatting for {description}")
            }
            RunEvent::Failed => f.write_str("Terraform format check failed"),
        }
    }
}

/// "the whole project", a single path, or "N files or dirs".
pub fn describe_targets(paths: &[String]) -> String {
    match paths {
        [only] if only == "." => "the whole project".to_string(),
        [only] => only.clone(),
        _ => format!("{} files or dirs", paths.len()),
    }
}

/// Receives [`RunEvent`]s. Implementations only present them; they must not
/// influence the run.
pub trait Notifier {
    fn notify(&self, event: &RunEvent);
}

/// Sends events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: &RunEvent) {
        match event {
            RunEvent::Starting { .. } => log::info!("{event}"),
            RunEvent::Failed => log::error!("{event}"),
        }
    }
}
