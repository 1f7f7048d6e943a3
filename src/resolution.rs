//! Which paths to hand to `terraform fmt`.
//!
//! Every decision that depends on the Terraform [`Generation`] lives here so the
//! layers above can stay version-agnostic.

use indexmap::IndexSet;
use std::path::Path;

use crate::discovery::find_tfvars_files;
use crate::terraform::{Flag, FlagSet, Generation};

/// Sentinel for "the project root" in path lists.
pub const PROJECT_ROOT: &str = ".";

/// Paths and additional flags for a whole-project run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WholeProject {
    pub paths: Vec<String>,
    pub extra_flags: FlagSet,
}

/// Resolve a whole-project run rooted at `root`.
///
/// Legacy `fmt` skips `*.tfvars` when given a directory, so those files are
/// discovered and appended individually. Modern `fmt` needs `-recursive` to
/// descend into subdirectories.
pub fn resolve_whole_project(root: &str, generation: Generation) -> WholeProject {
    match generation {
        Generation::Legacy => {
            let mut paths = vec![root.to_string()];
            paths.extend(find_tfvars_files(Some(Path::new(root))));
            WholeProject {
                paths,
                extra_flags: whole_project_flags(generation),
            }
        }
        Generation::Modern => WholeProject {
            paths: vec![root.to_string()],
            extra_flags: whole_project_flags(generation),
        },
    }
}

/// Flags a whole-project run adds on top of the configured ones.
pub fn whole_project_flags(generation: Generation) -> FlagSet {
    match generation {
        Generation::Legacy => FlagSet::new(),
        Generation::Modern => FlagSet::new().with(Flag::Recursive, true),
    }
}

/// Resolve the paths reported by a watcher.
///
/// Legacy `fmt` accepts files, so paths pass through unchanged. Modern `fmt`
/// only accepts directories: files are replaced by their parent directory and
/// duplicates are dropped, keeping the first occurrence.
pub fn resolve_changed_paths(paths: &[String], generation: Generation) -> Vec<String> {
    match generation {
        Generation::Legacy => paths.to_vec(),
        Generation::Modern => paths
            .iter()
            .map(|path| containing_directory(path))
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect(),
    }
}

/// `path` itself if it is a directory, else its parent (`.` for bare file names).
fn containing_directory(path: &str) -> String {
    let p = Path::new(path);
    if p.is_dir() {
        return path.to_string();
    }

    match p.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PROJECT_ROOT.to_string(),
        Some(parent) => parent.to_string_lossy().to_string(),
        None => path.to_string(),
    }
}
