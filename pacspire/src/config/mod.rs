//! Persistent user configuration.
//!
//! Settings live in an INI file under the platform config directory
//! (`~/.config/pacspire/config.ini` on Linux). Command-line flags override
//! what is loaded here.

mod file;
mod keys;

pub use file::{config_file_path, ConfigError, ConfigFile, InstallSettings, LoggingSettings};
pub use keys::ConfigKey;
