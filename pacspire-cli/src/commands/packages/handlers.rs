//! Package command handlers.

use pacspire::manager::{
    inspect_archive, AssumeYes, Confirmation, InstallAction, LocalPackageStore, ManagerError,
    PackageInstaller, Prompt,
};

use super::args::{InfoArgs, InstallArgs, ListArgs, RemoveArgs};
use super::traits::{CommandContext, CommandHandler};
use crate::error::CliError;

/// Install a package archive.
pub struct InstallHandler;

impl CommandHandler for InstallHandler {
    type Args = InstallArgs;

    fn execute(args: InstallArgs, ctx: &CommandContext) -> Result<(), CliError> {
        let confirmation: &dyn Confirmation = if args.assume_yes {
            &AssumeYes
        } else {
            ctx.interaction
        };

        let installer = PackageInstaller::new(&args.config, ctx.reporter, confirmation);
        let result = installer
            .install(&args.archive)
            .map_err(|source| CliError::InstallFailed {
                archive: args.archive.clone(),
                source,
            })?;

        ctx.output.newline();
        let verb = match result.action {
            InstallAction::Fresh => "Installed",
            InstallAction::Upgrade { .. } => "Updated",
            InstallAction::SameOrOlder { .. } => "Reinstalled",
        };
        ctx.output.println(&format!(
            "{} {} {} ({} files, {} bytes)",
            verb,
            result.record.name,
            result.record.version,
            result.files_extracted,
            result.bytes_written
        ));
        Ok(())
    }
}

/// Show what installing an archive would do.
pub struct InfoHandler;

impl CommandHandler for InfoHandler {
    type Args = InfoArgs;

    fn execute(args: InfoArgs, ctx: &CommandContext) -> Result<(), CliError> {
        let store = LocalPackageStore::new(&args.config.install_root, args.config.limits);
        let inspection = inspect_archive(&args.archive, &store)?;
        let out = ctx.output;

        out.header("Package Information");
        out.println(&format!("Name:       {}", inspection.record.name));
        out.println(&format!("Version:    {}", inspection.record.version));
        out.println(&format!("Timestamp:  {}", inspection.record.timestamp));
        out.println(&format!(
            "Install to: {}",
            inspection.install_path.display()
        ));

        let status = match &inspection.action {
            InstallAction::Fresh => "not installed".to_string(),
            InstallAction::Upgrade { from } => {
                format!("update available ({} -> {})", from.version, inspection.record.version)
            }
            InstallAction::SameOrOlder { from } => {
                format!("installed version {} is the same or newer", from.version)
            }
        };
        out.println(&format!("Status:     {}", status));

        out.newline();
        out.println(&format!(
            "Files ({}, {} bytes):",
            inspection.entries.len(),
            inspection.total_size()
        ));
        for entry in &inspection.entries {
            out.indented(&format!("{:<49} {:>10}", entry.name, entry.size));
        }
        Ok(())
    }
}

/// List installed packages.
pub struct ListHandler;

impl CommandHandler for ListHandler {
    type Args = ListArgs;

    fn execute(args: ListArgs, ctx: &CommandContext) -> Result<(), CliError> {
        let store = LocalPackageStore::new(&args.config.install_root, args.config.limits);
        let packages = store.list()?;

        if packages.is_empty() {
            ctx.output.println(&format!(
                "No packages installed in {}",
                store.root().display()
            ));
            return Ok(());
        }

        ctx.output.header("Installed Packages");
        for package in &packages {
            ctx.output.println(&format!(
                "{:<20} {:<10} {}",
                package.name, package.version, package.timestamp
            ));
        }
        ctx.output.newline();
        ctx.output
            .println(&format!("{} package(s) in {}", packages.len(), store.root().display()));
        Ok(())
    }
}

/// Remove an installed package.
pub struct RemoveHandler;

impl CommandHandler for RemoveHandler {
    type Args = RemoveArgs;

    fn execute(args: RemoveArgs, ctx: &CommandContext) -> Result<(), CliError> {
        let store = LocalPackageStore::new(&args.config.install_root, args.config.limits);
        let installed = store.get(&args.name)?;

        if !args.assume_yes {
            let decision = ctx.interaction.confirm(&Prompt::remove(&installed));
            if !decision.is_affirmative() {
                return Err(ManagerError::UserCancelled.into());
            }
        }

        let path = store.remove(&args.name)?;
        tracing::info!(package = %args.name, path = %path.display(), "Package removed");
        ctx.reporter
            .success(&format!("Removed {} {}", installed.name, installed.version));
        Ok(())
    }
}
