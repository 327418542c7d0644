//! Subcommands, one per file operation.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Subcommand;

/// Available shelfkit commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Check that the configured external tools are installed
    CheckDeps,

    /// Run a shell command and print its output
    Run {
        /// Complete shell command line (quote it as one argument)
        command: String,
    },

    /// Print the pair-tree path for a barcode
    Pairtree {
        /// Item barcode (e.g. "36105123456")
        barcode: OsString,
    },

    /// Copy an item between directories or hosts with rsync
    Transfer {
        /// File or directory name inside SOURCE_DIR
        name: String,
        /// Source directory, optionally "host:/path"
        source_dir: String,
        /// Destination directory (must be local for the copy to be verified)
        dest_dir: String,
    },

    /// Decrypt a gpg-encrypted archive inside a directory
    Decrypt {
        /// Directory holding the encrypted file
        dir: PathBuf,
        /// Encrypted file name
        encrypted: String,
        /// Name for the decrypted file
        decrypted: String,
        /// Passphrase (visible to other local users while gpg runs)
        #[arg(long, env = "SHELFKIT_PASSPHRASE", hide_env_values = true)]
        passphrase: String,
    },

    /// Extract a .tar.gz archive into a directory
    Unpack {
        /// Directory holding the archive
        source_dir: PathBuf,
        /// Archive file name
        archive: String,
        /// Directory to extract into (created if missing)
        dest_dir: PathBuf,
    },

    /// Create a tar archive of a file or directory
    Pack {
        /// File or directory to archive
        source: PathBuf,
        /// Archive path (defaults to SOURCE with ".tar" appended)
        #[arg(long)]
        dest: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use crate::Cli;
    use crate::commands::Commands;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_transfer_accepts_remote_locations() {
        let cli = Cli::parse_from([
            "shelfkit",
            "transfer",
            "36105123456.tar.gz.gpg",
            "archive-host:/outgoing",
            "/srv/incoming",
        ]);
        match cli.command {
            Some(Commands::Transfer {
                name,
                source_dir,
                dest_dir,
            }) => {
                assert_eq!(name, "36105123456.tar.gz.gpg");
                assert_eq!(source_dir, "archive-host:/outgoing");
                assert_eq!(dest_dir, "/srv/incoming");
            }
            _ => panic!("expected transfer"),
        }
    }

    #[test]
    fn test_decrypt_takes_passphrase_flag() {
        let cli = Cli::parse_from([
            "shelfkit",
            "decrypt",
            "/srv/incoming",
            "item.tar.gz.gpg",
            "item.tar.gz",
            "--passphrase",
            "pw",
        ]);
        match cli.command {
            Some(Commands::Decrypt { dir, passphrase, .. }) => {
                assert_eq!(dir, PathBuf::from("/srv/incoming"));
                assert_eq!(passphrase, "pw");
            }
            _ => panic!("expected decrypt"),
        }
    }

    #[test]
    fn test_pack_dest_is_optional() {
        let cli = Cli::parse_from(["shelfkit", "pack", "/srv/items/ABC123456"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Pack { dest: None, .. })
        ));

        let cli = Cli::parse_from(["shelfkit", "pack", "item", "--dest", "host:item.tar"]);
        match cli.command {
            Some(Commands::Pack { dest, .. }) => {
                assert_eq!(dest, Some(PathBuf::from("host:item.tar")));
            }
            _ => panic!("expected pack"),
        }
    }
}
