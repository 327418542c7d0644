//! Error types for command execution and file operations.
//!
//! Every operation either completes or returns one of these variants. The
//! variants carry structured fields so callers can branch on the kind of
//! failure, while `Display` renders the same diagnostic text that ends up in
//! logs and on the terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced by the command executor and the file operations built on it.
#[derive(Debug, Error)]
pub enum ShelfError {
    // === Command execution ===
    /// The command ran but exited unsuccessfully.
    #[error("{}", render_command_failure(.command, *.status, .stderr, .stdout))]
    CommandFailed {
        /// Display text of the command (secrets redacted).
        command: String,
        /// Exit code, or `None` when the process was terminated by a signal.
        status: Option<i32>,
        /// Captured standard error.
        stderr: String,
        /// Captured standard output.
        stdout: String,
    },

    /// The command could not be started at all.
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // === Post-conditions ===
    /// The command reported success but the expected artifact is absent.
    #[error("{operation} failed: {reason}")]
    PostconditionFailed {
        operation: &'static str,
        reason: String,
    },

    // === Input ===
    /// An argument cannot be used to build a command or a path.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // === Filesystem & config ===
    /// A filesystem operation performed directly by this crate failed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tool configuration could not be loaded or is invalid.
    #[error("Invalid configuration {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

impl ShelfError {
    /// Create an `InvalidArgument` error with a message.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a `PostconditionFailed` error for the given operation.
    pub fn postcondition(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::PostconditionFailed {
            operation,
            reason: reason.into(),
        }
    }

    /// Wrap an I/O error with the path it happened at.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type alias for shelfkit operations.
pub type ShelfResult<T> = Result<T, ShelfError>;

/// Collapse captured output into a single line: non-blank lines joined by `"; "`.
pub(crate) fn join_fragments(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

fn render_command_failure(
    command: &str,
    status: Option<i32>,
    stderr: &str,
    stdout: &str,
) -> String {
    let status = status.map_or_else(
        || "terminated by signal".to_string(),
        |code| format!("exit status {code}"),
    );
    let mut msg = format!("Command `{command}` failed ({status})");
    let stderr = join_fragments(stderr);
    if !stderr.is_empty() {
        msg.push_str(": ");
        msg.push_str(&stderr);
    }
    let stdout = join_fragments(stdout);
    if !stdout.is_empty() {
        msg.push_str("; stdout: ");
        msg.push_str(&stdout);
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_fragments_skips_blank_lines() {
        assert_eq!(join_fragments("one\n\n  two  \nthree\n"), "one; two; three");
        assert_eq!(join_fragments(""), "");
    }

    #[test]
    fn test_command_failed_message_includes_stderr_and_stdout() {
        let err = ShelfError::CommandFailed {
            command: "tar -xzf missing.tar.gz".to_string(),
            status: Some(2),
            stderr: "tar: missing.tar.gz: Cannot open\ntar: Error is not recoverable\n".to_string(),
            stdout: "partial\n".to_string(),
        };

        let msg = err.to_string();
        assert_eq!(
            msg,
            "Command `tar -xzf missing.tar.gz` failed (exit status 2): \
             tar: missing.tar.gz: Cannot open; tar: Error is not recoverable; stdout: partial"
        );
    }

    #[test]
    fn test_command_failed_message_omits_empty_stdout() {
        let err = ShelfError::CommandFailed {
            command: "false".to_string(),
            status: None,
            stderr: String::new(),
            stdout: "\n".to_string(),
        };

        let msg = err.to_string();
        assert_eq!(msg, "Command `false` failed (terminated by signal)");
    }

    #[test]
    fn test_command_failed_message_without_stderr_keeps_stdout() {
        let err = ShelfError::CommandFailed {
            command: "false".to_string(),
            status: Some(1),
            stderr: "\n".to_string(),
            stdout: "partial\n".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Command `false` failed (exit status 1); stdout: partial"
        );
    }

    #[test]
    fn test_postcondition_message() {
        let err = ShelfError::postcondition("Archive creation", "/tmp/x.tar was not created");
        assert_eq!(
            err.to_string(),
            "Archive creation failed: /tmp/x.tar was not created"
        );
    }
}
