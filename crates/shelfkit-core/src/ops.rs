//! File transfer and archive operations.
//!
//! [`FileOps`] wraps one external tool per operation: `rsync` for transfers,
//! `gpg` for decryption and `tar` for extraction and creation. Each call makes
//! a single attempt, then checks the filesystem for the artifact the tool was
//! supposed to produce. Nothing is retried and partial output is left in
//! place on failure.
//!
//! Working directories are passed to the child process, never set on the
//! current process, so operations may run concurrently.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::ToolConfig;
use crate::error::{ShelfError, ShelfResult};
use crate::exec::{CommandRunner, CommandSpec, SystemRunner, run_checked};

/// Facade over the external tools, sharing one command runner.
#[derive(Clone)]
pub struct FileOps {
    runner: Arc<dyn CommandRunner>,
    config: ToolConfig,
}

impl std::fmt::Debug for FileOps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileOps")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FileOps {
    pub fn new(runner: Arc<dyn CommandRunner>, config: ToolConfig) -> Self {
        Self { runner, config }
    }

    /// Operations backed by real subprocesses.
    pub fn system(config: ToolConfig) -> Self {
        Self::new(Arc::new(SystemRunner::new()), config)
    }

    pub const fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    /// Run a raw shell command string and return its standard output.
    pub fn run_shell(&self, command: &str) -> ShelfResult<String> {
        run_checked(self.runner(), &CommandSpec::shell(command))
    }

    /// Copy `source_dir/name` into `dest_dir` with `rsync -a` over the remote shell.
    ///
    /// Either directory may carry a `host:` prefix. Success additionally
    /// requires `dest_dir/name` to exist on the local filesystem, so a remote
    /// destination always fails the check.
    pub fn transfer_object(
        &self,
        name: &str,
        source_dir: &str,
        dest_dir: &str,
    ) -> ShelfResult<PathBuf> {
        require_name("object name", name)?;

        if is_remote_location(dest_dir) {
            warn!(
                dest_dir,
                "Destination looks remote; the local existence check cannot see it"
            );
        }

        let spec = CommandSpec::new(&self.config.copy_program)
            .arg("-a")
            .arg("-e")
            .arg(&self.config.remote_shell)
            .arg(join_location(source_dir, name))
            .arg(dest_dir);
        run_checked(self.runner(), &spec)?;

        let copied = Path::new(dest_dir).join(name);
        if !copied.exists() {
            return Err(ShelfError::postcondition(
                "Object transfer",
                format!("{name} not found in {dest_dir} after copy"),
            ));
        }

        info!(name, source_dir, dest_dir, "Transferred object");
        Ok(copied)
    }

    /// Decrypt `dir/encrypted` into `dir/decrypted` with `gpg --batch`.
    ///
    /// The passphrase is handed to gpg as a command-line argument, which makes
    /// it visible in the host's process listing while gpg runs. It is redacted
    /// from logs and error messages.
    pub fn decrypt_archive(
        &self,
        dir: &Path,
        encrypted: &str,
        decrypted: &str,
        passphrase: &str,
    ) -> ShelfResult<PathBuf> {
        require_name("encrypted file name", encrypted)?;
        require_name("decrypted file name", decrypted)?;

        let output = dir.join(decrypted);
        let spec = CommandSpec::new(&self.config.decrypt_program)
            .arg("--batch")
            .arg("--yes")
            .arg("--passphrase")
            .secret_arg(passphrase)
            .arg("-o")
            .arg(&output)
            .arg("-d")
            .arg(dir.join(encrypted));
        run_checked(self.runner(), &spec)?;

        if !output.exists() {
            return Err(ShelfError::postcondition(
                "Archive decryption",
                format!("{decrypted} not found in {} after decrypting {encrypted}", dir.display()),
            ));
        }

        info!(encrypted, decrypted, dir = %dir.display(), "Decrypted archive");
        Ok(output)
    }

    /// Extract the gzip-compressed tar `source_dir/archive` into `dest_dir`.
    ///
    /// `dest_dir` is created if missing and must hold at least one entry
    /// afterwards.
    pub fn unpack_archive(
        &self,
        source_dir: &Path,
        archive: &str,
        dest_dir: &Path,
    ) -> ShelfResult<()> {
        require_name("archive name", archive)?;

        fs::create_dir_all(dest_dir).map_err(|e| ShelfError::io(dest_dir, e))?;

        // tar runs inside dest_dir, so the archive path must not be relative.
        let archive_path = absolute(&source_dir.join(archive))?;
        let spec = CommandSpec::new(&self.config.archive_program)
            .arg("-xzf")
            .arg(&archive_path)
            .current_dir(dest_dir);
        run_checked(self.runner(), &spec)?;

        let mut entries = fs::read_dir(dest_dir).map_err(|e| ShelfError::io(dest_dir, e))?;
        if entries.next().is_none() {
            return Err(ShelfError::postcondition(
                "Archive unpacking",
                format!(
                    "{} is empty after extracting {}",
                    dest_dir.display(),
                    archive_path.display()
                ),
            ));
        }

        info!(archive = %archive_path.display(), dest_dir = %dest_dir.display(), "Unpacked archive");
        Ok(())
    }

    /// Create a tar archive of `source`.
    ///
    /// The archive is written to `dest`, or to [`default_archive_path`] when
    /// no destination is given. tar runs in the parent of `source` and
    /// archives it by base name; `--force-local` lets archive names contain
    /// colons. Returns the destination path as given (or as defaulted).
    pub fn create_archive(&self, source: &Path, dest: Option<&Path>) -> ShelfResult<PathBuf> {
        let dest = match dest {
            Some(dest) => dest.to_path_buf(),
            None => default_archive_path(source)?,
        };

        let source_abs = absolute(source)?;
        let (Some(base_name), Some(parent)) = (source_abs.file_name(), source_abs.parent()) else {
            return Err(ShelfError::invalid_argument(format!(
                "cannot archive {}: path has no final component",
                source.display()
            )));
        };
        let dest_abs = absolute(&dest)?;

        let spec = CommandSpec::new(&self.config.archive_program)
            .arg("--force-local")
            .arg("-cf")
            .arg(&dest_abs)
            .arg(base_name)
            .current_dir(parent);
        run_checked(self.runner(), &spec)?;

        if !dest_abs.exists() {
            return Err(ShelfError::postcondition(
                "Archive creation",
                format!("{} was not created", dest.display()),
            ));
        }

        info!(source = %source.display(), archive = %dest.display(), "Created archive");
        Ok(dest)
    }
}

/// Default archive location for `source`: the same path with `.tar` appended.
///
/// A source ending in `.` is resolved against the working directory first, so
/// `.` archives to `../<dir>.tar` rather than a hidden file inside itself.
pub fn default_archive_path(source: &Path) -> ShelfResult<PathBuf> {
    // Collecting components drops a trailing separator ("dir/" -> "dir").
    let mut base = source.components().collect::<PathBuf>();
    if !matches!(base.components().next_back(), Some(Component::Normal(_))) {
        base = absolute(source)?.components().collect();
    }
    if !matches!(base.components().next_back(), Some(Component::Normal(_))) {
        return Err(ShelfError::invalid_argument(format!(
            "cannot derive an archive name from {}",
            source.display()
        )));
    }

    let mut name = base.into_os_string();
    name.push(".tar");
    Ok(PathBuf::from(name))
}

/// Whether `location` uses the `host:path` form understood by rsync.
pub fn is_remote_location(location: &str) -> bool {
    location
        .find(':')
        .is_some_and(|idx| idx > 0 && !location[..idx].contains('/'))
}

fn join_location(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

fn require_name(what: &str, value: &str) -> ShelfResult<()> {
    if value.is_empty() {
        return Err(ShelfError::invalid_argument(format!("{what} must not be empty")));
    }
    Ok(())
}

fn absolute(path: &Path) -> ShelfResult<PathBuf> {
    std::path::absolute(path).map_err(|e| ShelfError::io(path, e))
}
