/// Exit codes for tfwatch
///
/// These exit codes allow users and CI/CD systems to distinguish between
/// unformatted files and a broken setup.
/// Success - All files are formatted (or were fixed)
pub const SUCCESS: i32 = 0;

/// Formatting check failed - `terraform fmt` reported a problem for at least one path
pub const FORMAT_FAILED: i32 = 1;

/// Tool error - Terraform not found, configuration error, or internal error
pub const TOOL_ERROR: i32 = 2;

pub mod exit {
    use super::TOOL_ERROR;

    /// Exit with tool error code (2)
    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }
}
