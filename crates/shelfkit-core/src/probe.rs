//! Availability probe for the external tools.

use std::path::{Path, PathBuf};

use crate::config::ToolConfig;
use crate::exec::{CommandRunner, CommandSpec};

/// Whether a tool was found on `PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolState {
    /// Tool resolved to `path`; `version` is the first line of its version output.
    Present {
        path: PathBuf,
        version: Option<String>,
    },
    Missing,
}

/// Probe result for one configured tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    /// Program name as configured.
    pub name: String,
    /// What the tool is used for.
    pub purpose: &'static str,
    /// Whether local operations need it (the remote shell only matters for remote copies).
    pub required: bool,
    pub state: ToolState,
}

impl ToolStatus {
    pub const fn is_present(&self) -> bool {
        matches!(self.state, ToolState::Present { .. })
    }
}

/// Locate every configured tool and read its version.
pub fn probe_tools<R>(runner: &R, config: &ToolConfig) -> Vec<ToolStatus>
where
    R: CommandRunner + ?Sized,
{
    let tools = [
        (&config.copy_program, "--version", "file transfer", true),
        (&config.remote_shell, "-V", "remote transport for transfers", false),
        (&config.decrypt_program, "--version", "archive decryption", true),
        (&config.archive_program, "--version", "archive creation and unpacking", true),
    ];

    tools
        .into_iter()
        .map(|(name, version_flag, purpose, required)| {
            let state = which::which(name).map_or(ToolState::Missing, |path| {
                let version = read_version(runner, &path, version_flag);
                ToolState::Present { path, version }
            });
            ToolStatus {
                name: name.clone(),
                purpose,
                required,
                state,
            }
        })
        .collect()
}

/// Required tools that were not found.
pub fn missing_required(statuses: &[ToolStatus]) -> Vec<&ToolStatus> {
    statuses
        .iter()
        .filter(|status| status.required && !status.is_present())
        .collect()
}

fn read_version<R>(runner: &R, path: &Path, flag: &str) -> Option<String>
where
    R: CommandRunner + ?Sized,
{
    let output = runner.output(&CommandSpec::new(path).arg(flag)).ok()?;
    if !output.success() {
        return None;
    }

    // Some tools (ssh) print their version to stderr
    let text = if output.stdout.trim().is_empty() {
        &output.stderr
    } else {
        &output.stdout
    };
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
