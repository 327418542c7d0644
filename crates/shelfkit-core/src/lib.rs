//! Core of shelfkit: a command executor and the file operations built on it.
//!
//! - [`exec`]: describe, run and classify external commands.
//! - [`pairtree`]: barcode to pair-tree directory path.
//! - [`ops`]: transfer, decrypt, unpack and create archives via external tools.
//! - [`probe`]: check that the configured tools are installed.
//! - [`config`]: which programs to invoke.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod exec;
pub mod ops;
pub mod pairtree;
pub mod probe;

pub use config::{ToolConfig, validate_config};
pub use error::{ShelfError, ShelfResult};
pub use exec::{CommandOutput, CommandRunner, CommandSpec, SystemRunner, run_checked};
pub use ops::{FileOps, default_archive_path, is_remote_location};
pub use pairtree::{pair_tree, pair_tree_os};
pub use probe::{ToolState, ToolStatus, missing_required, probe_tools};
