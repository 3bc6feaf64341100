//! Error types for the package manager.

use std::io;
use std::path::PathBuf;

use super::store::StoreError;

/// Result type for manager operations.
pub type ManagerResult<T> = Result<T, ManagerError>;

/// Errors that end an install (or remove) attempt.
///
/// Every variant is terminal: nothing in the pipeline retries.
#[derive(Debug)]
pub enum ManagerError {
    /// The archive could not be opened.
    ArchiveOpen { path: PathBuf, reason: String },

    /// The archive's `pkginfo.txt` is missing, unreadable or invalid.
    MissingOrInvalidMetadata { reason: String },

    /// An existing install has unreadable or invalid metadata.
    CorruptExistingInstall { path: PathBuf, reason: String },

    /// The user declined a confirmation prompt.
    UserCancelled,

    /// The previous installation could not be removed.
    RemovalFailed { path: PathBuf, source: StoreError },

    /// The install directory could not be created.
    DirectoryCreateFailed { path: PathBuf, source: io::Error },

    /// An archive entry could not be read or written.
    ExtractionFailed { entry: String, reason: String },

    /// No package with this name is installed.
    PackageNotInstalled { name: String },

    /// Failed to read the install root.
    ReadFailed { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for ManagerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArchiveOpen { path, reason } => {
                write!(f, "failed to open package {}: {}", path.display(), reason)
            }
            Self::MissingOrInvalidMetadata { reason } => {
                write!(f, "missing or invalid package info: {}", reason)
            }
            Self::CorruptExistingInstall { path, reason } => {
                write!(
                    f,
                    "installed package at {} is corrupt: {}",
                    path.display(),
                    reason
                )
            }
            Self::UserCancelled => write!(f, "installation aborted by user"),
            Self::RemovalFailed { path, source } => {
                write!(
                    f,
                    "failed to remove previous installation {}: {}",
                    path.display(),
                    source
                )
            }
            Self::DirectoryCreateFailed { path, source } => {
                write!(
                    f,
                    "failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::ExtractionFailed { entry, reason } => {
                write!(f, "failed to extract {}: {}", entry, reason)
            }
            Self::PackageNotInstalled { name } => {
                write!(f, "package {} is not installed", name)
            }
            Self::ReadFailed { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ManagerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RemovalFailed { source, .. } => Some(source),
            Self::DirectoryCreateFailed { source, .. } => Some(source),
            Self::ReadFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
