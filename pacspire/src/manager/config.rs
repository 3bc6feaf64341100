//! Configuration for the package installer.

use std::path::PathBuf;

use crate::package::RecordLimits;

/// Directory name used for the default install root.
pub const DEFAULT_ROOT_DIR_NAME: &str = "pacspire";

/// Configuration for the package installer.
#[derive(Debug, Clone)]
pub struct InstallerConfig {
    /// Directory under which every package gets its own subdirectory.
    pub install_root: PathBuf,

    /// Length limits for names, versions and archive entry names.
    pub limits: RecordLimits,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            install_root: default_install_root(),
            limits: RecordLimits::default(),
        }
    }
}

impl InstallerConfig {
    /// Create a new configuration with the given install root.
    pub fn new(install_root: impl Into<PathBuf>) -> Self {
        Self {
            install_root: install_root.into(),
            ..Default::default()
        }
    }

    /// Set the install root.
    pub fn with_install_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.install_root = root.into();
        self
    }

    /// Set the record length limits.
    pub fn with_limits(mut self, limits: RecordLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Default install root: `<documents>/pacspire`.
///
/// Falls back to the home directory, then the working directory.
pub fn default_install_root() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_ROOT_DIR_NAME)
}
