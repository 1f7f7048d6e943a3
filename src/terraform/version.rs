//! Terraform version detection and behavior generations.
//!
//! `terraform fmt` changed twice at 0.12: it stopped accepting bare file paths
//! and it stopped recursing into subdirectories unless `-recursive` is passed.
//! Everything that depends on that split goes through [`Generation`].

use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

use super::TerraformError;

/// First version with the 0.12 `fmt` semantics. Pre-releases of 0.12 count as modern.
pub const MODERN_BOUNDARY: &str = "0.12.0-alpha";

static VERSION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Terraform v(?<version>\S+)").expect("valid version regex"));
static BOUNDARY: LazyLock<Version> = LazyLock::new(|| Version::parse(MODERN_BOUNDARY).expect("valid boundary version"));

/// Extract the version from `terraform version` output.
///
/// Only the first line is considered, e.g. `Terraform v1.5.3` -> `1.5.3`.
pub fn parse_version_output(output: &str) -> Option<String> {
    let first_line = output.lines().next()?;
    VERSION_LINE
        .captures(first_line)
        .map(|caps| caps["version"].to_string())
}

/// The two behaviorally distinct eras of `terraform fmt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// Before 0.12: accepts files, does not pick up `*.tfvars` on its own.
    Legacy,
    /// 0.12 and later: only accepts directories, recurses only with `-recursive`.
    Modern,
}

impl Generation {
    pub fn is_legacy(self) -> bool {
        self == Generation::Legacy
    }

    /// Classify a version string against [`MODERN_BOUNDARY`].
    pub fn classify(version: &str) -> Result<Generation, TerraformError> {
        let parsed = parse_semver(version).ok_or_else(|| TerraformError::InvalidVersion(version.to_string()))?;

        if parsed < *BOUNDARY {
            Ok(Generation::Legacy)
        } else {
            Ok(Generation::Modern)
        }
    }
}

/// Parse a version, padding a short core (`0.12`, `1`) with zero components.
fn parse_semver(version: &str) -> Option<Version> {
    if let Ok(parsed) = Version::parse(version) {
        return Some(parsed);
    }

    let split_at = version.find(['-', '+']).unwrap_or(version.len());
    let (core, suffix) = version.split_at(split_at);
    let components = core.split('.').count();
    if components >= 3 {
        return None;
    }

    let padding = ".0".repeat(3 - components);
    Version::parse(&format!("{core}{padding}{suffix}")).ok()
}
