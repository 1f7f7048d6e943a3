//! Watch mode: re-run `terraform fmt` on the files that change

use chrono::Local;
use colored::*;
use indexmap::IndexSet;
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};
use tfwatch_lib::config::CONFIG_FILES;
use tfwatch_lib::discovery::is_terraform_file;
use tfwatch_lib::{Config, FormatOrchestrator, Notifier, RunError, RunEvent, Terraform};

use crate::cli_types::WatchArgs;
use crate::exit_codes::{SUCCESS, TOOL_ERROR};

/// What the watcher watches and which config file it reloads on.
#[derive(Debug, Clone)]
pub struct WatchScope {
    base: PathBuf,
    roots: Vec<PathBuf>,
    config_file: Option<PathBuf>,
    discover_config: bool,
}

impl WatchScope {
    /// `roots` are the watched paths as given on the command line. With a
    /// loaded `config_file` only that file triggers a reload; otherwise a
    /// config file appearing where discovery would look for one does, unless
    /// `discover_config` is off.
    pub fn new(base: &Path, roots: &[String], config_file: Option<&Path>, discover_config: bool) -> Self {
        Self {
            base: normalize(base, Path::new(".")),
            roots: roots.iter().map(|root| normalize(base, Path::new(root))).collect(),
            config_file: config_file.map(|file| normalize(base, file)),
            discover_config,
        }
    }

    fn is_config_file(&self, absolute: &Path) -> bool {
        if let Some(config_file) = &self.config_file {
            return absolute == config_file.as_path();
        }
        if !self.discover_config {
            return false;
        }
        let named_like_config = absolute
            .file_name()
            .is_some_and(|name| CONFIG_FILES.iter().any(|candidate| name == *candidate));
        named_like_config && absolute.parent().is_some_and(|dir| self.base.starts_with(dir))
    }

    /// Whether the path has a dot-entry such as `.terraform` below the watched
    /// root that contains it.
    fn is_hidden(&self, absolute: &Path) -> bool {
        let root = self
            .roots
            .iter()
            .filter(|root| absolute.starts_with(root))
            .max_by_key(|root| root.components().count());
        let below = match root {
            Some(root) => absolute.strip_prefix(root).unwrap_or(absolute),
            None => absolute.file_name().map(Path::new).unwrap_or(absolute),
        };
        below.components().any(|c| match c {
            Component::Normal(name) => name.to_string_lossy().starts_with('.'),
            _ => false,
        })
    }

    /// Relative to the working directory when below it, absolute otherwise.
    fn display(&self, absolute: &Path) -> String {
        match absolute.strip_prefix(&self.base) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative.to_string_lossy().to_string(),
            _ => absolute.to_string_lossy().to_string(),
        }
    }
}

/// `path` joined onto `base`, with `.` and `..` resolved lexically.
fn normalize(base: &Path, path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in base.join(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Files created, files modified, and whether the config file was touched,
/// collected over one debounce window.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub created: IndexSet<String>,
    pub modified: IndexSet<String>,
    pub configuration: bool,
}

impl ChangeSet {
    /// Fold one watcher event into the set.
    pub fn record(&mut self, event: &Event, scope: &WatchScope) {
        let created = match event.kind {
            EventKind::Create(_) => true,
            EventKind::Modify(_) => false,
            // Removed files cannot be formatted
            _ => return,
        };

        for path in &event.paths {
            let absolute = normalize(&scope.base, path);
            if scope.is_config_file(&absolute) {
                self.configuration = true;
                continue;
            }
            if !is_terraform_file(&absolute) || !absolute.exists() || scope.is_hidden(&absolute) {
                continue;
            }

            let display = scope.display(&absolute);
            if created {
                self.modified.shift_remove(&display);
                self.created.insert(display);
            } else if !self.created.contains(&display) {
                self.modified.insert(display);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.modified.is_empty() && !self.configuration
    }
}

/// Clear the terminal screen
pub fn clear_screen() {
    // ANSI escape sequence to clear screen and move cursor to top-left
    print!("\x1B[2J\x1B[1;1H");
    let _ = io::stdout().flush();
}

/// Prints run events to the terminal with a timestamp.
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, event: &RunEvent) {
        let timestamp = Local::now().format("%H:%M:%S");
        match event {
            RunEvent::Starting { .. } if !self.quiet => {
                println!("[{}] {}...", timestamp, event.to_string().cyan().bold());
            }
            RunEvent::Starting { .. } => {}
            RunEvent::Failed => println!("[{}] {}", timestamp, event.to_string().red().bold()),
        }
    }
}

/// Report a run result. Returns `false` if watching cannot go on.
fn report(result: Result<(), RunError>) -> bool {
    match result {
        Ok(()) => true,
        // Already shown by the notifier
        Err(RunError::RunFailed) => true,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            false
        }
    }
}

/// Watch `args.paths` and format Terraform files as they change.
pub fn run_watch_mode(args: &WatchArgs, config_path: Option<&str>, isolated: bool, quiet: bool) -> anyhow::Result<i32> {
    let loaded = crate::load_config_with_path(config_path, isolated)?;
    let watched_config = loaded.path.clone();
    let mut config: Config = loaded.config;
    args.apply(&mut config);

    let mut orchestrator = FormatOrchestrator::new(
        Terraform::with_binary(&config.binary),
        &config,
        ConsoleNotifier::new(quiet),
    );

    // Configure the file watcher
    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(tx, NotifyConfig::default().with_poll_interval(Duration::from_millis(500)))?;

    let watch_paths = if args.paths.is_empty() {
        vec![".".to_string()]
    } else {
        args.paths.clone()
    };
    let scope = WatchScope::new(&std::env::current_dir()?, &watch_paths, watched_config.as_deref(), !isolated);
    for path_str in &watch_paths {
        if let Err(e) = watcher.watch(Path::new(path_str), RecursiveMode::Recursive) {
            eprintln!("{}: Failed to watch {}: {}", "Warning".yellow().bold(), path_str, e);
        }
    }
    if let Some(path) = &watched_config
        && let Err(e) = watcher.watch(path, RecursiveMode::NonRecursive)
    {
        eprintln!("{}: Failed to watch config file: {}", "Warning".yellow().bold(), e);
    }

    if args.clear {
        clear_screen();
    }
    if !quiet {
        let timestamp = Local::now().format("%H:%M:%S");
        println!("[{}] {}...", timestamp, "Starting tfwatch".green().bold());
        println!("{}", "Press Ctrl-C to exit".cyan());
    }

    if !report(orchestrator.start()) {
        return Ok(TOOL_ERROR);
    }
    if !quiet {
        println!("\n{}", "Watching for file changes...".cyan());
    }

    let debounce_duration = Duration::from_millis(100);

    loop {
        let first_event = match rx.recv() {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => {
                eprintln!("{}: Watch error: {}", "Error".red().bold(), e);
                continue;
            }
            Err(_) => break,
        };

        let mut changes = ChangeSet::default();
        changes.record(&first_event, &scope);
        if changes.is_empty() {
            continue;
        }

        // Collect all events that occur within the debounce window
        let start = Instant::now();
        while start.elapsed() < debounce_duration {
            if let Ok(Ok(event)) = rx.recv_timeout(Duration::from_millis(10)) {
                changes.record(&event, &scope);
            }
        }

        if args.clear {
            clear_screen();
        }

        let healthy = if changes.configuration {
            let timestamp = Local::now().format("%H:%M:%S");
            println!("[{}] {}...", timestamp, "Configuration change detected".yellow().bold());
            match crate::load_config(config_path, isolated) {
                Ok(mut reloaded) => {
                    args.apply(&mut reloaded);
                    orchestrator.reconfigure(&reloaded);
                    report(orchestrator.run_all())
                }
                Err(e) => {
                    eprintln!("{}: {:#}", "Error".red().bold(), e);
                    true
                }
            }
        } else {
            let created: Vec<String> = changes.created.into_iter().collect();
            let modified: Vec<String> = changes.modified.into_iter().collect();
            report(orchestrator.run_on_additions(&created)) && report(orchestrator.run_on_modifications(&modified))
        };

        if !healthy {
            return Ok(TOOL_ERROR);
        }
        if !quiet {
            println!("\n{}", "Watching for file changes...".cyan());
        }
    }

    Ok(SUCCESS)
}
