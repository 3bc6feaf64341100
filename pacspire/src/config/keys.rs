//! Addressable configuration keys for `config get` and `config set`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::{ConfigError, ConfigFile};

/// A single `section.key` entry in the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    InstallRoot,
    InstallMaxNameLength,
    InstallMaxVersionLength,
    InstallMaxFilenameLength,
    LoggingLevel,
    LoggingDirectory,
}

const ALL_KEYS: [ConfigKey; 6] = [
    ConfigKey::InstallRoot,
    ConfigKey::InstallMaxNameLength,
    ConfigKey::InstallMaxVersionLength,
    ConfigKey::InstallMaxFilenameLength,
    ConfigKey::LoggingLevel,
    ConfigKey::LoggingDirectory,
];

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl ConfigKey {
    /// Every key, in file order.
    pub fn all() -> &'static [ConfigKey] {
        &ALL_KEYS
    }

    /// INI section holding this key.
    pub fn section(&self) -> &'static str {
        match self {
            Self::InstallRoot
            | Self::InstallMaxNameLength
            | Self::InstallMaxVersionLength
            | Self::InstallMaxFilenameLength => "install",
            Self::LoggingLevel | Self::LoggingDirectory => "logging",
        }
    }

    /// Key name within its section.
    pub fn key_name(&self) -> &'static str {
        match self {
            Self::InstallRoot => "root",
            Self::InstallMaxNameLength => "max_name_length",
            Self::InstallMaxVersionLength => "max_version_length",
            Self::InstallMaxFilenameLength => "max_filename_length",
            Self::LoggingLevel => "level",
            Self::LoggingDirectory => "directory",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as a string. Unset optional values are empty.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            Self::InstallRoot => config.install.root.display().to_string(),
            Self::InstallMaxNameLength => config.install.max_name_length.to_string(),
            Self::InstallMaxVersionLength => config.install.max_version_length.to_string(),
            Self::InstallMaxFilenameLength => config.install.max_filename_length.to_string(),
            Self::LoggingLevel => config.logging.level.clone(),
            Self::LoggingDirectory => config
                .logging
                .directory
                .as_ref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Validate `value` and store it in `config`.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            Self::InstallRoot => {
                if value.is_empty() {
                    return Err(self.invalid(value, "path must not be empty"));
                }
                config.install.root = PathBuf::from(value);
            }
            Self::InstallMaxNameLength => {
                config.install.max_name_length = self.parse_length(value)?;
            }
            Self::InstallMaxVersionLength => {
                config.install.max_version_length = self.parse_length(value)?;
            }
            Self::InstallMaxFilenameLength => {
                config.install.max_filename_length = self.parse_length(value)?;
            }
            Self::LoggingLevel => {
                let level = value.to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(self.invalid(value, "expected one of trace, debug, info, warn, error"));
                }
                config.logging.level = level;
            }
            Self::LoggingDirectory => {
                config.logging.directory = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
        }
        Ok(())
    }

    fn parse_length(&self, value: &str) -> Result<usize, ConfigError> {
        match value.parse::<usize>() {
            Ok(0) => Err(self.invalid(value, "length must be at least 1")),
            Ok(len) => Ok(len),
            Err(e) => Err(self.invalid(value, &e.to_string())),
        }
    }

    fn invalid(&self, value: &str, reason: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_KEYS
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
