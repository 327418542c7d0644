//! Decrypt, unpack and pack command handlers.

use std::path::Path;

use anyhow::{Context, Result};

use crate::bootstrap::CliContext;

/// Decrypt `dir/encrypted` into `dir/decrypted`.
pub fn decrypt(
    ctx: &CliContext,
    dir: &Path,
    encrypted: &str,
    decrypted: &str,
    passphrase: &str,
) -> Result<()> {
    let output = ctx
        .ops()
        .decrypt_archive(dir, encrypted, decrypted, passphrase)
        .with_context(|| format!("decrypting {encrypted}"))?;
    println!("{}", output.display());
    Ok(())
}

/// Extract `source_dir/archive` into `dest_dir`.
pub fn unpack(ctx: &CliContext, source_dir: &Path, archive: &str, dest_dir: &Path) -> Result<()> {
    ctx.ops()
        .unpack_archive(source_dir, archive, dest_dir)
        .with_context(|| format!("unpacking {archive}"))?;
    println!("{}", dest_dir.display());
    Ok(())
}

/// Archive `source`, printing the archive path.
pub fn pack(ctx: &CliContext, source: &Path, dest: Option<&Path>) -> Result<()> {
    let archive = ctx
        .ops()
        .create_archive(source, dest)
        .with_context(|| format!("archiving {}", source.display()))?;
    println!("{}", archive.display());
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::bootstrap::{CliConfig, bootstrap};
    use tempfile::TempDir;

    #[test]
    fn test_pack_then_unpack() {
        let ctx = bootstrap(CliConfig::default()).unwrap();
        let root = TempDir::new().unwrap();
        let item = root.path().join("ABC123456");
        std::fs::create_dir(&item).unwrap();
        std::fs::write(item.join("meta.xml"), "<item/>").unwrap();

        let gz = root.path().join("ABC123456.tar.gz");
        ctx.ops()
            .run_shell(&format!(
                "cd '{}' && tar -czf '{}' ABC123456",
                root.path().display(),
                gz.display()
            ))
            .unwrap();

        pack(&ctx, &item, None).unwrap();
        assert!(root.path().join("ABC123456.tar").exists());

        let dest = root.path().join("restored");
        unpack(&ctx, root.path(), "ABC123456.tar.gz", &dest).unwrap();
        assert!(dest.join("ABC123456/meta.xml").exists());
    }

    #[test]
    fn test_unpack_missing_archive_reports_process_error() {
        let ctx = bootstrap(CliConfig::default()).unwrap();
        let root = TempDir::new().unwrap();

        let err = unpack(&ctx, root.path(), "absent.tar.gz", &root.path().join("out")).unwrap_err();
        assert_eq!(crate::exit_code(&err), 71);
        assert!(format!("{err:#}").contains("unpacking absent.tar.gz"));
    }
}
