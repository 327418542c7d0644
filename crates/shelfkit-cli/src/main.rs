//! CLI entry point - the composition root.
//!
//! Loads `.env`, parses arguments, initialises logging, bootstraps the
//! context and dispatches to one handler. Errors are printed once and turned
//! into a sysexits-style exit code.

use std::process::ExitCode;

use clap::Parser;

use shelfkit_cli::logging::init_tracing;
use shelfkit_cli::{Cli, CliConfig, Commands, bootstrap, exit_code, handlers};

fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    // Pairtree needs no tools, so the configuration is only loaded on demand
    let ctx = || bootstrap(CliConfig::new(cli.config.clone()));

    match command {
        Commands::Pairtree { barcode } => handlers::pairtree::execute(&barcode),
        Commands::CheckDeps => handlers::check_deps::execute(&ctx()?),
        Commands::Run { command } => handlers::run::execute(&ctx()?, &command),
        Commands::Transfer {
            name,
            source_dir,
            dest_dir,
        } => handlers::transfer::execute(&ctx()?, &name, &source_dir, &dest_dir),
        Commands::Decrypt {
            dir,
            encrypted,
            decrypted,
            passphrase,
        } => handlers::archive::decrypt(&ctx()?, &dir, &encrypted, &decrypted, &passphrase),
        Commands::Unpack {
            source_dir,
            archive,
            dest_dir,
        } => handlers::archive::unpack(&ctx()?, &source_dir, &archive, &dest_dir),
        Commands::Pack { source, dest } => handlers::archive::pack(&ctx()?, &source, dest.as_deref()),
    }
}

fn main() -> ExitCode {
    // Load environment variables (SHELFKIT_CONFIG, SHELFKIT_PASSPHRASE, RUST_LOG)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(u8::try_from(exit_code(&err)).unwrap_or(1))
        }
    }
}
