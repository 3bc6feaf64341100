//! INI configuration file.
//!
//! ```ini
//! [install]
//! root = /home/user/Documents/pacspire
//! max_name_length = 20
//! max_version_length = 10
//! max_filename_length = 49
//!
//! [logging]
//! level = info
//! directory = /home/user/.local/share/pacspire/logs
//! ```
//!
//! Missing keys fall back to defaults, so an empty or absent file is valid.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::logging::LoggingConfig;
use crate::manager::{default_install_root, InstallerConfig};
use crate::package::RecordLimits;

/// Directory name under the platform config directory.
const CONFIG_DIR_NAME: &str = "pacspire";

/// Configuration file name.
const CONFIG_FILE_NAME: &str = "config.ini";

/// Errors from loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the file.
    #[error("I/O error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The file is not valid INI.
    #[error("failed to parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    /// A key holds a value of the wrong type.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// No such configuration key.
    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// `[install]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSettings {
    /// Install root directory.
    pub root: PathBuf,
    /// Maximum package name length.
    pub max_name_length: usize,
    /// Maximum version length.
    pub max_version_length: usize,
    /// Maximum archive entry name length.
    pub max_filename_length: usize,
}

impl Default for InstallSettings {
    fn default() -> Self {
        let limits = RecordLimits::default();
        Self {
            root: default_install_root(),
            max_name_length: limits.max_name_len,
            max_version_length: limits.max_version_len,
            max_filename_length: limits.max_filename_len,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Default log filter when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for log files; `None` logs to stderr.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: dirs::data_local_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("logs")),
        }
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    /// Install settings.
    pub install: InstallSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| match e {
            ini::Error::Io(source) => ConfigError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => ConfigError::Parse {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        })?;

        let mut config = Self::default();
        for key in super::ConfigKey::all() {
            if let Some(value) = ini
                .section(Some(key.section()))
                .and_then(|section| section.get(key.key_name()))
            {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save every key to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source: io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let mut ini = Ini::new();
        for key in super::ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }
        ini.write_to_file(path).map_err(io_error)
    }

    /// Installer configuration described by this file.
    pub fn installer_config(&self) -> InstallerConfig {
        InstallerConfig::new(&self.install.root).with_limits(self.record_limits())
    }

    /// Record limits described by this file.
    pub fn record_limits(&self) -> RecordLimits {
        RecordLimits::default()
            .with_max_name_len(self.install.max_name_length)
            .with_max_version_len(self.install.max_version_length)
            .with_max_filename_len(self.install.max_filename_length)
    }

    /// Logging configuration described by this file.
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.logging.level.clone(),
            directory: self.logging.directory.clone(),
        }
    }
}

/// Location of the configuration file.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&temp.path().join("config.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_load_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        fs::write(&path, "[install]\nroot = /media/packages\nmax_name_length = 32\n").unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.install.root, PathBuf::from("/media/packages"));
        assert_eq!(config.install.max_name_length, 32);
        assert_eq!(config.install.max_version_length, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_invalid_number() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        fs::write(&path, "[install]\nmax_name_length = lots\n").unwrap();

        let result = ConfigFile::load_from(&path);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.install.root = PathBuf::from("/srv/pacspire");
        config.install.max_filename_length = 64;
        config.logging.level = "debug".to_string();
        config.logging.directory = None;
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_installer_config() {
        let mut config = ConfigFile::default();
        config.install.root = PathBuf::from("/srv/pacspire");
        config.install.max_version_length = 4;

        let installer = config.installer_config();
        assert_eq!(installer.install_root, PathBuf::from("/srv/pacspire"));
        assert_eq!(installer.limits.max_version_len, 4);
        assert_eq!(installer.limits.max_name_len, 20);
    }

    #[test]
    fn test_config_file_path() {
        let path = config_file_path();
        assert!(path.ends_with("pacspire/config.ini"));
    }
}
