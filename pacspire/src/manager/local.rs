//! Read-side view of the install root.
//!
//! Every package lives in `<root>/<name>/` and carries its own
//! `pkginfo.txt`. The presence of the directory is what makes a package
//! "installed"; the metadata file says which build it is.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::package::{
    install_target, parse_package_info_bytes, pkginfo_path, InstalledPackage, PackageRecord,
    RecordLimits,
};

use super::error::{ManagerError, ManagerResult};
use super::store::{self, StoreError};

/// Packages installed under a single root directory.
#[derive(Debug, Clone)]
pub struct LocalPackageStore {
    root: PathBuf,
    limits: RecordLimits,
}

impl LocalPackageStore {
    /// Create a store over `root`.
    pub fn new(root: impl Into<PathBuf>, limits: RecordLimits) -> Self {
        Self {
            root: root.into(),
            limits,
        }
    }

    /// The install root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Length limits used when parsing installed metadata.
    pub fn limits(&self) -> &RecordLimits {
        &self.limits
    }

    /// Install directory for `name`, if the name is a valid directory name.
    pub fn install_path(&self, name: &str) -> Option<PathBuf> {
        install_target(&self.root, name)
    }

    /// Whether a directory exists for `name`.
    pub fn is_installed(&self, name: &str) -> bool {
        self.install_path(name).is_some_and(|path| path.exists())
    }

    /// Load the installed package called `name`.
    pub fn get(&self, name: &str) -> ManagerResult<InstalledPackage> {
        let path = self
            .install_path(name)
            .filter(|path| path.exists())
            .ok_or_else(|| ManagerError::PackageNotInstalled {
                name: name.to_string(),
            })?;

        let record = self.read_record(&path)?;
        Ok(InstalledPackage::new(record, path))
    }

    /// Read and parse `<install_dir>/pkginfo.txt`.
    ///
    /// Any failure means the install is corrupt.
    pub fn read_record(&self, install_dir: &Path) -> ManagerResult<PackageRecord> {
        let corrupt = |reason: String| ManagerError::CorruptExistingInstall {
            path: install_dir.to_path_buf(),
            reason,
        };

        let bytes = store::read_whole_file(&pkginfo_path(install_dir))
            .map_err(|e| corrupt(e.to_string()))?;
        parse_package_info_bytes(&bytes, &self.limits).map_err(|e| corrupt(e.to_string()))
    }

    /// All installed packages, sorted by name.
    ///
    /// Directories without readable metadata are skipped. A missing root
    /// means nothing is installed.
    pub fn list(&self) -> ManagerResult<Vec<InstalledPackage>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ManagerError::ReadFailed {
                    path: self.root.clone(),
                    source: e,
                })
            }
        };

        let mut packages = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            match self.read_record(&path) {
                Ok(record) => packages.push(InstalledPackage::new(record, path)),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Skipping directory"),
            }
        }

        packages.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(packages)
    }

    /// Delete the install directory of `name`.
    pub fn remove(&self, name: &str) -> ManagerResult<PathBuf> {
        let path = self
            .install_path(name)
            .filter(|path| path.exists())
            .ok_or_else(|| ManagerError::PackageNotInstalled {
                name: name.to_string(),
            })?;

        store::remove_tree(&path).map_err(|source: StoreError| ManagerError::RemovalFailed {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}
