//! Installed package type with filesystem context.
//!
//! The [`InstalledPackage`] struct extends [`PackageRecord`] with the directory
//! it was found in, using composition.

use std::ops::Deref;
use std::path::{Path, PathBuf};

use super::record::PackageRecord;

/// A package found under the install root.
///
/// The [`Deref`] implementation gives direct access to the record fields.
///
/// # Example
///
/// ```
/// use pacspire::package::{InstalledPackage, PackageRecord};
///
/// let record = PackageRecord {
///     name: "foo".to_string(),
///     version: "1.0".to_string(),
///     timestamp: 100,
/// };
/// let installed = InstalledPackage::new(record, "/documents/pacspire/foo");
///
/// assert_eq!(installed.name, "foo");
/// assert_eq!(installed.path().to_str().unwrap(), "/documents/pacspire/foo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    /// Record parsed from the installed `pkginfo.txt`.
    pub record: PackageRecord,

    /// Install directory.
    pub path: PathBuf,
}

impl InstalledPackage {
    /// Create a new installed package.
    pub fn new(record: PackageRecord, path: impl Into<PathBuf>) -> Self {
        Self {
            record,
            path: path.into(),
        }
    }

    /// Get the install directory.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Deref for InstalledPackage {
    type Target = PackageRecord;

    fn deref(&self) -> &Self::Target {
        &self.record
    }
}
