//! Run command handler.

use std::io::Write;

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Run a raw shell command and echo its standard output unchanged.
pub fn execute(ctx: &CliContext, command: &str) -> Result<()> {
    let stdout = ctx.ops().run_shell(command)?;
    let mut out = std::io::stdout().lock();
    out.write_all(stdout.as_bytes())?;
    out.flush()?;
    Ok(())
}
