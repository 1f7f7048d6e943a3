//! Finding Terraform variable files on disk.

use ignore::WalkBuilder;
use std::path::Path;

/// Extension of Terraform variable definition files.
pub const TFVARS_EXTENSION: &str = "tfvars";

/// Extensions of all files Terraform formats.
pub const TERRAFORM_EXTENSIONS: &[&str] = &["tf", TFVARS_EXTENSION];

/// Whether `path` names a Terraform source or variable file.
pub fn is_terraform_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TERRAFORM_EXTENSIONS.contains(&ext))
}

/// Recursively find all `*.tfvars` files under `dir`, or the current directory.
///
/// Hidden files and directories (such as `.terraform/`) are skipped; ignore
/// files are not consulted. Paths are returned sorted and spelled relative to
/// the current directory when no `dir` (or `.`) is given, otherwise prefixed
/// with `dir` as passed in.
pub fn find_tfvars_files(dir: Option<&Path>) -> Vec<String> {
    let root = dir.filter(|d| !d.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let strip_dot = root == Path::new(".");

    let mut walk_builder = WalkBuilder::new(root);
    walk_builder.hidden(true); // skips .terraform/
    walk_builder.ignore(false);
    walk_builder.git_ignore(false);
    walk_builder.git_global(false);
    walk_builder.git_exclude(false);
    walk_builder.parents(false);
    walk_builder.require_git(false);

    let mut file_paths = Vec::new();
    for result in walk_builder.build() {
        match result {
            Ok(entry) => {
                let path = entry.path();
                let is_tfvars = path.extension().is_some_and(|ext| ext == TFVARS_EXTENSION);
                if !is_tfvars || !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    continue;
                }

                let file_path = path.to_string_lossy().to_string();
                let cleaned_path = if strip_dot {
                    file_path.strip_prefix("./").map(str::to_string).unwrap_or(file_path)
                } else {
                    file_path
                };
                file_paths.push(cleaned_path);
            }
            Err(err) => log::warn!("Error walking directory: {err}"),
        }
    }

    file_paths.sort();
    file_paths
}
