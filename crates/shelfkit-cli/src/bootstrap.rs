//! CLI bootstrap - the composition root.
//!
//! Loads the tool configuration and builds the [`FileOps`] facade that every
//! handler receives.

use std::path::PathBuf;

use anyhow::Result;
use shelfkit_core::{FileOps, ToolConfig};
use tracing::debug;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Optional JSON tool configuration; defaults are used when absent.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    pub const fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }
}

/// Fully composed context for CLI commands.
#[derive(Debug)]
pub struct CliContext {
    /// File operations backed by real subprocesses.
    pub ops: FileOps,
}

impl CliContext {
    pub const fn ops(&self) -> &FileOps {
        &self.ops
    }
}

/// Build the CLI context from the bootstrap configuration.
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let tools = match &config.config_path {
        Some(path) => {
            debug!(path = %path.display(), "Loading tool configuration");
            ToolConfig::load(path)?
        }
        None => ToolConfig::default(),
    };

    Ok(CliContext {
        ops: FileOps::system(tools),
    })
}
