//! Command-line adapter for shelfkit.
//!
//! Parses arguments, loads the tool configuration, and hands each subcommand
//! to one [`shelfkit_core::FileOps`] operation.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs
use dotenvy as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod parser;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::{CliError, exit_code};
pub use parser::Cli;
