//! Tool configuration.
//!
//! Names the external programs the file operations invoke. All fields
//! default to the usual program names so an empty JSON object is a valid
//! configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ShelfError, ShelfResult};

/// Default remote-copy program.
pub const DEFAULT_COPY_PROGRAM: &str = "rsync";

/// Default remote shell used by the copy program.
pub const DEFAULT_REMOTE_SHELL: &str = "ssh";

/// Default decryption program.
pub const DEFAULT_DECRYPT_PROGRAM: &str = "gpg";

/// Default archive program.
pub const DEFAULT_ARCHIVE_PROGRAM: &str = "tar";

/// External programs used by [`FileOps`](crate::FileOps).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolConfig {
    /// Recursive, attribute-preserving copy tool (`rsync`).
    pub copy_program: String,
    /// Transport handed to the copy tool via `-e` (`ssh`).
    pub remote_shell: String,
    /// Decryption tool (`gpg`).
    pub decrypt_program: String,
    /// Archive tool used for both extraction and creation (`tar`).
    pub archive_program: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            copy_program: DEFAULT_COPY_PROGRAM.to_string(),
            remote_shell: DEFAULT_REMOTE_SHELL.to_string(),
            decrypt_program: DEFAULT_DECRYPT_PROGRAM.to_string(),
            archive_program: DEFAULT_ARCHIVE_PROGRAM.to_string(),
        }
    }
}

impl ToolConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn load(path: &Path) -> ShelfResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ShelfError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&content).map_err(|e| match e {
            ShelfError::Config { reason, .. } => ShelfError::Config {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    /// Parse and validate a configuration from JSON text.
    pub fn from_json(content: &str) -> ShelfResult<Self> {
        let config: Self = serde_json::from_str(content).map_err(|e| ShelfError::Config {
            path: "<inline>".into(),
            reason: e.to_string(),
        })?;
        validate_config(&config).map_err(|reason| ShelfError::Config {
            path: "<inline>".into(),
            reason,
        })?;
        Ok(config)
    }
}

/// Check that every configured program name is usable.
pub fn validate_config(config: &ToolConfig) -> Result<(), String> {
    let fields = [
        ("copy_program", &config.copy_program),
        ("remote_shell", &config.remote_shell),
        ("decrypt_program", &config.decrypt_program),
        ("archive_program", &config.archive_program),
    ];

    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(format!("{name} cannot be empty"));
        }
    }
    Ok(())
}
