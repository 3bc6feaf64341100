//! CLI error type.

use std::path::PathBuf;

use pacspire::config::ConfigError;
use pacspire::manager::ManagerError;
use thiserror::Error;

/// Errors surfaced to the user by the `pacspire` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid configuration or configuration key.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to load or save the configuration file.
    #[error(transparent)]
    ConfigFile(#[from] ConfigError),

    /// A package operation failed.
    #[error(transparent)]
    Manager(#[from] ManagerError),

    /// An install failed. The cause was already reported as it happened.
    #[error("installation of {} failed", .archive.display())]
    InstallFailed {
        archive: PathBuf,
        #[source]
        source: ManagerError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_message() {
        let err = CliError::Config("unknown key".to_string());
        assert_eq!(err.to_string(), "Configuration error: unknown key");
    }

    #[test]
    fn test_install_failed_keeps_source() {
        use std::error::Error;

        let err = CliError::InstallFailed {
            archive: PathBuf::from("foo.pcs"),
            source: ManagerError::UserCancelled,
        };
        assert_eq!(err.to_string(), "installation of foo.pcs failed");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display_is_transparent() {
        let err = CliError::Manager(ManagerError::PackageNotInstalled {
            name: "foo".to_string(),
        });
        assert_eq!(err.to_string(), "package foo is not installed");
    }
}
