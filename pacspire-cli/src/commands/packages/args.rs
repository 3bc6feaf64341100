//! Resolved handler arguments.
//!
//! Built from the clap arguments after config defaults have been applied.

use std::path::PathBuf;

use pacspire::manager::InstallerConfig;

/// Arguments for the install command.
#[derive(Debug, Clone)]
pub struct InstallArgs {
    /// Package archive to install.
    pub archive: PathBuf,
    /// Install root and limits.
    pub config: InstallerConfig,
    /// Answer every prompt affirmatively.
    pub assume_yes: bool,
}

/// Arguments for the info command.
#[derive(Debug, Clone)]
pub struct InfoArgs {
    /// Package archive to inspect.
    pub archive: PathBuf,
    /// Install root and limits.
    pub config: InstallerConfig,
}

/// Arguments for the list command.
#[derive(Debug, Clone)]
pub struct ListArgs {
    /// Install root and limits.
    pub config: InstallerConfig,
}

/// Arguments for the remove command.
#[derive(Debug, Clone)]
pub struct RemoveArgs {
    /// Installed package name.
    pub name: String,
    /// Install root and limits.
    pub config: InstallerConfig,
    /// Skip the confirmation prompt.
    pub assume_yes: bool,
}
