//! Common utilities shared across CLI commands.

use std::path::PathBuf;

use pacspire::config::ConfigFile;
use pacspire::manager::InstallerConfig;

/// Load config or fall back to defaults. Load failures are logged.
pub fn load_config() -> ConfigFile {
    ConfigFile::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load configuration, using defaults");
        ConfigFile::default()
    })
}

/// Resolve the installer configuration. A `--root` flag takes precedence over
/// the config file.
pub fn resolve_installer_config(cli_root: Option<PathBuf>, config: &ConfigFile) -> InstallerConfig {
    let installer = config.installer_config();
    match cli_root {
        Some(root) => installer.with_install_root(root),
        None => installer,
    }
}
