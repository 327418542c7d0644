//! Command handlers.
//!
//! Handlers follow one pattern: `pub fn execute(ctx: &CliContext, ...) -> Result<()>`.
//! They call a single `FileOps` operation and format its result for the
//! terminal. No retries, no business logic.

pub mod archive;
pub mod check_deps;
pub mod pairtree;
pub mod run;
pub mod transfer;
