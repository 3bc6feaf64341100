//! Status levels and the tracing-backed reporter.

use std::fmt;

use super::traits::StatusReporter;

/// Severity of a status event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// A step is starting or general progress.
    Info,
    /// A step completed.
    Success,
    /// Something unexpected that does not stop the install.
    Warning,
    /// The current step failed.
    Error,
}

impl StatusLevel {
    /// Short lowercase name for the level.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Forwards status events to `tracing`.
///
/// Useful when running without a terminal; success events are logged at
/// `info` since tracing has no dedicated level for them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl StatusReporter for TracingReporter {
    fn report(&self, level: StatusLevel, message: &str) {
        match level {
            StatusLevel::Info => tracing::info!("{}", message),
            StatusLevel::Success => tracing::info!(status = "success", "{}", message),
            StatusLevel::Warning => tracing::warn!("{}", message),
            StatusLevel::Error => tracing::error!("{}", message),
        }
    }
}
