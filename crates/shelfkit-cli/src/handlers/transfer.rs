//! Transfer command handler.

use anyhow::{Context, Result};

use crate::bootstrap::CliContext;

/// Copy `source_dir/name` into `dest_dir` and print the verified local path.
pub fn execute(ctx: &CliContext, name: &str, source_dir: &str, dest_dir: &str) -> Result<()> {
    let copied = ctx
        .ops()
        .transfer_object(name, source_dir, dest_dir)
        .with_context(|| format!("transferring {name} from {source_dir}"))?;
    println!("{}", copied.display());
    Ok(())
}
