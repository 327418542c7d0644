//! Pairtree command handler.

use std::ffi::OsStr;

use anyhow::Result;
use shelfkit_core::pair_tree_os;

/// Print the pair-tree path for `barcode`.
pub fn execute(barcode: &OsStr) -> Result<()> {
    let path = pair_tree_os(barcode)?;
    println!("{}", path.display());
    Ok(())
}
