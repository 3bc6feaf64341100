//! Init command and first-run mode.

use std::path::Path;

use pacspire::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Printed when `pacspire` runs without a command.
pub const FIRST_RUN_MESSAGE: &str =
    "pacspire has been installed. Click on a package to install it.";

/// Run the init command: write the configuration file, keeping any values
/// already set.
pub fn run() -> Result<(), CliError> {
    let path = config_file_path();
    let config = ConfigFile::load_from(&path)?;
    config.save_to(&path)?;

    println!("Configuration file: {}", path.display());
    println!("Install root:       {}", config.install.root.display());
    println!();
    println!("Edit this file to customize pacspire settings.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}

/// First-run mode: record a default configuration if there is none yet.
pub fn first_run() -> Result<(), CliError> {
    let created = ensure_config(&config_file_path())?;
    if created {
        tracing::info!(path = %config_file_path().display(), "Wrote default configuration");
    }
    println!("{}", FIRST_RUN_MESSAGE);
    Ok(())
}

/// Write a default configuration to `path` unless a file already exists.
/// Returns whether a file was written.
fn ensure_config(path: &Path) -> Result<bool, CliError> {
    if path.exists() {
        return Ok(false);
    }
    ConfigFile::default().save_to(path)?;
    Ok(true)
}
