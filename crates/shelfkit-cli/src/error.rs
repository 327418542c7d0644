//! CLI-specific error types and exit-code mapping.

use shelfkit_core::ShelfError;
use thiserror::Error;

/// Errors raised by the CLI itself rather than by a core operation.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required tools are not installed.
    #[error("Missing required tools: {}", .0.join(", "))]
    MissingTools(Vec<String>),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::MissingTools(_) => 69,
        }
    }
}

/// Exit code for an error returned by a command handler.
///
/// Exit codes follow sysexits.h where one fits:
/// - 1: General error, failed post-condition
/// - 64: Invalid arguments (EX_USAGE)
/// - 69: Required tool unavailable (EX_UNAVAILABLE)
/// - 71: External command failed (EX_OSERR)
/// - 74: IO error (EX_IOERR)
/// - 78: Configuration error (EX_CONFIG)
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    match err.downcast_ref::<ShelfError>() {
        Some(ShelfError::CommandFailed { .. } | ShelfError::Spawn { .. }) => 71,
        Some(ShelfError::InvalidArgument(_)) => 64,
        Some(ShelfError::Io { .. }) => 74,
        Some(ShelfError::Config { .. }) => 78,
        Some(ShelfError::PostconditionFailed { .. }) | None => 1,
    }
}
