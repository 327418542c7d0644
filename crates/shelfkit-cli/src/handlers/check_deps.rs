//! Check-deps command handler.

use anyhow::Result;
use shelfkit_core::{ToolState, ToolStatus, missing_required, probe_tools};

use crate::bootstrap::CliContext;
use crate::error::CliError;

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Probe the configured tools, print a status table, and fail if a required one is missing.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let statuses = probe_tools(ctx.ops().runner(), ctx.ops().config());

    println!("{:<20} {:<30} Used for", "Tool", "Status");
    for status in &statuses {
        println!("{}", format_status(status));
    }

    let missing: Vec<String> = missing_required(&statuses)
        .into_iter()
        .map(|s| s.name.clone())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CliError::MissingTools(missing).into())
    }
}

/// One table row for a probed tool.
pub fn format_status(status: &ToolStatus) -> String {
    let (color, text) = match &status.state {
        ToolState::Present { version, .. } => (
            GREEN,
            format!("✓ {}", version.as_deref().unwrap_or("installed")),
        ),
        ToolState::Missing if status.required => (RED, "✗ missing".to_string()),
        ToolState::Missing => (YELLOW, "○ missing".to_string()),
    };
    // Pad before coloring; escape codes would count towards the width
    let marker = if status.required { "*" } else { " " };
    format!(
        "{marker}{:<19} {color}{text:<30}{RESET} {}",
        status.name, status.purpose
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn status(required: bool, state: ToolState) -> ToolStatus {
        ToolStatus {
            name: "rsync".to_string(),
            purpose: "file transfer",
            required,
            state,
        }
    }

    #[test]
    fn test_format_present_with_version() {
        let row = format_status(&status(
            true,
            ToolState::Present {
                path: PathBuf::from("/usr/bin/rsync"),
                version: Some("rsync  version 3.2.7  protocol version 31".to_string()),
            },
        ));
        assert!(row.starts_with("*rsync"));
        assert!(row.contains("version 3.2.7"));
        assert!(row.ends_with("file transfer"));
    }

    #[test]
    fn test_format_missing_optional() {
        let row = format_status(&status(false, ToolState::Missing));
        assert!(row.starts_with(" rsync"));
        assert!(row.contains("○ missing"));
    }

    #[test]
    fn test_status_column_aligns_regardless_of_color() {
        let present = format_status(&status(
            true,
            ToolState::Present {
                path: PathBuf::from("/usr/bin/rsync"),
                version: None,
            },
        ));
        let missing = format_status(&status(false, ToolState::Missing));

        let purpose_column = |row: &str| {
            let plain = row.replace(GREEN, "").replace(YELLOW, "").replace(RESET, "");
            plain.chars().count() - "file transfer".chars().count()
        };
        assert_eq!(purpose_column(&present), purpose_column(&missing));
        assert_eq!(purpose_column(&present), 1 + 19 + 1 + 30 + 1);
    }

    #[test]
    fn test_format_missing_required() {
        let row = format_status(&status(true, ToolState::Missing));
        assert!(row.contains("✗ missing"));
    }
}
