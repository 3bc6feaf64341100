//! pacspire CLI - install, update and remove packages from the command line.

mod commands;
mod error;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use console::style;
use pacspire::logging::{init_logging, LoggingGuard};

use commands::config::ConfigCommands;
use commands::packages::PackageCommand;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "pacspire")]
#[command(version, about = "Package installer for zip-based application bundles")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Install or update a package from an archive
    Install {
        /// Package archive
        archive: PathBuf,

        /// Install root (overrides install.root)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Answer every prompt with yes
        #[arg(short, long)]
        yes: bool,
    },

    /// Show an archive's package info and how it compares to the installed copy
    Info {
        /// Package archive
        archive: PathBuf,

        /// Install root (overrides install.root)
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// List installed packages
    List {
        /// Install root (overrides install.root)
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Remove an installed package
    Remove {
        /// Package name
        name: String,

        /// Install root (overrides install.root)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Remove without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Create or update the configuration file
    Init,

    /// View or change configuration settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();
    let logging = setup_logging(cli.verbose);

    let result = run(cli.command);
    if let Err(e) = &result {
        tracing::error!(error = %e, "Command failed");
    }
    // Flush the log writer before exiting.
    drop(logging);

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        process::exit(1);
    }
}

fn setup_logging(verbose: bool) -> LoggingGuard {
    let mut config = commands::common::load_config().logging_config();
    if verbose {
        config = config.with_level("debug");
    }
    init_logging(&config)
}

fn run(command: Option<Commands>) -> Result<(), CliError> {
    match command {
        None => commands::init::first_run(),
        Some(Commands::Install { archive, root, yes }) => {
            commands::packages::run(PackageCommand::Install { archive, root, yes })
        }
        Some(Commands::Info { archive, root }) => {
            commands::packages::run(PackageCommand::Info { archive, root })
        }
        Some(Commands::List { root }) => commands::packages::run(PackageCommand::List { root }),
        Some(Commands::Remove { name, root, yes }) => {
            commands::packages::run(PackageCommand::Remove { name, root, yes })
        }
        Some(Commands::Init) => commands::init::run(),
        Some(Commands::Config(command)) => commands::config::run(command),
    }
}
