//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for moving and unpacking archived items.
#[derive(Parser)]
#[command(name = "shelfkit")]
#[command(about = "Transfer, decrypt, unpack and archive items stored in pair-tree layouts")]
#[command(version)]
pub struct Cli {
    /// JSON file naming the external tools to use
    #[arg(long = "config", global = true, env = "SHELFKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
