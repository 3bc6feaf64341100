//! Logging setup.
//!
//! Logs go to a daily rolling file when a directory is configured and to
//! stderr otherwise. `RUST_LOG` takes precedence over the configured level.

use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Log file name prefix; the appender adds the date.
const LOG_FILE_PREFIX: &str = "pacspire.log";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for log files; `None` logs to stderr.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl LoggingConfig {
    /// Override the level.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Override the log directory.
    pub fn with_directory(mut self, directory: Option<PathBuf>) -> Self {
        self.directory = directory;
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Keeps the background log writer alive. Drop it at exit to flush.
#[derive(Debug)]
pub struct LoggingGuard {
    _worker: Option<WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Directory logs are written to, if logging to a file.
    pub fn log_dir(&self) -> Option<&PathBuf> {
        self.log_dir.as_ref()
    }
}

/// Install the global subscriber.
///
/// If the log directory cannot be created, logging falls back to stderr.
/// Calling this twice leaves the first subscriber in place.
pub fn init_logging(config: &LoggingConfig) -> LoggingGuard {
    let filter = config.filter();

    if let Some(dir) = &config.directory {
        match fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_timer(LocalTime::rfc_3339())
                    .with_ansi(false)
                    .with_writer(writer)
                    .try_init();
                return LoggingGuard {
                    _worker: Some(guard),
                    log_dir: Some(dir.clone()),
                };
            }
            Err(e) => {
                eprintln!(
                    "warning: cannot create log directory {}: {}",
                    dir.display(),
                    e
                );
            }
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTime::rfc_3339())
        .with_writer(std::io::stderr)
        .try_init();
    LoggingGuard {
        _worker: None,
        log_dir: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.directory.is_none());
    }

    #[test]
    fn test_builder() {
        let config = LoggingConfig::default()
            .with_level("debug")
            .with_directory(Some(PathBuf::from("/tmp/logs")));
        assert_eq!(config.level, "debug");
        assert_eq!(config.directory, Some(PathBuf::from("/tmp/logs")));
    }

    #[test]
    fn test_file_logging_creates_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("logs");
        let config = LoggingConfig::default().with_directory(Some(dir.clone()));

        let guard = init_logging(&config);
        assert!(dir.is_dir());
        assert_eq!(guard.log_dir(), Some(&dir));
    }
}
