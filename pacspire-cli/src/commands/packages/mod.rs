//! Package commands: install, info, list, remove.
//!
//! Handlers depend only on the interfaces in `traits`, so each can be tested
//! with in-memory output and scripted answers:
//!
//! - `traits`: `Output`, `CommandContext`, `CommandHandler`
//! - `services`: terminal implementations (`ConsoleOutput`, `ConsoleInteraction`)
//! - `args`: resolved handler arguments
//! - `handlers`: one handler per command

mod args;
mod handlers;
mod services;
mod traits;

pub use handlers::{InfoHandler, InstallHandler, ListHandler, RemoveHandler};
pub use services::{ConsoleInteraction, ConsoleOutput};
pub use traits::CommandHandler;

use std::path::PathBuf;

use args::{InfoArgs, InstallArgs, ListArgs, RemoveArgs};
use traits::CommandContext;

use super::common::{load_config, resolve_installer_config};
use crate::error::CliError;

/// A package command with its raw command-line arguments.
#[derive(Debug)]
pub enum PackageCommand {
    Install {
        archive: PathBuf,
        root: Option<PathBuf>,
        yes: bool,
    },
    Info {
        archive: PathBuf,
        root: Option<PathBuf>,
    },
    List {
        root: Option<PathBuf>,
    },
    Remove {
        name: String,
        root: Option<PathBuf>,
        yes: bool,
    },
}

/// Run a package command against the terminal.
pub fn run(command: PackageCommand) -> Result<(), CliError> {
    let config = load_config();

    let output = ConsoleOutput::new();
    let interaction = ConsoleInteraction::new();
    let ctx = CommandContext::new(&output, &output, &interaction);

    match command {
        PackageCommand::Install { archive, root, yes } => InstallHandler::execute(
            InstallArgs {
                archive,
                config: resolve_installer_config(root, &config),
                assume_yes: yes,
            },
            &ctx,
        ),

        PackageCommand::Info { archive, root } => InfoHandler::execute(
            InfoArgs {
                archive,
                config: resolve_installer_config(root, &config),
            },
            &ctx,
        ),

        PackageCommand::List { root } => ListHandler::execute(
            ListArgs {
                config: resolve_installer_config(root, &config),
            },
            &ctx,
        ),

        PackageCommand::Remove { name, root, yes } => RemoveHandler::execute(
            RemoveArgs {
                name,
                config: resolve_installer_config(root, &config),
                assume_yes: yes,
            },
            &ctx,
        ),
    }
}
