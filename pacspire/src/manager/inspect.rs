//! Read-only preview of what installing an archive would do.

use std::path::{Path, PathBuf};

use crate::package::{parse_package_info_bytes, PackageRecord, RecordLimits, PKGINFO_FILENAME};

use super::archive::{ArchiveEntryInfo, ZipPackageArchive};
use super::error::{ManagerError, ManagerResult};
use super::installer::InstallAction;
use super::local::LocalPackageStore;

/// What an archive contains and how it relates to the install root.
#[derive(Debug, Clone)]
pub struct PackageInspection {
    /// The archive's embedded record.
    pub record: PackageRecord,
    /// Archive entries, in archive order.
    pub entries: Vec<ArchiveEntryInfo>,
    /// Where the package would be installed.
    pub install_path: PathBuf,
    /// What an install would replace.
    pub action: InstallAction,
}

impl PackageInspection {
    /// Total uncompressed size of all entries.
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|entry| entry.size).sum()
    }
}

/// Inspect `archive_path` against `store` without writing anything.
pub fn inspect_archive(
    archive_path: &Path,
    store: &LocalPackageStore,
) -> ManagerResult<PackageInspection> {
    let limits = *store.limits();
    let mut archive = ZipPackageArchive::open(archive_path, &limits).map_err(|e| {
        ManagerError::ArchiveOpen {
            path: archive_path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    let record = read_incoming_record(&mut archive, &limits)?;
    let install_path = resolve_install_path(store, &record)?;

    let entries = archive
        .list_entries()
        .map_err(|e| ManagerError::ArchiveOpen {
            path: archive_path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let action = if install_path.exists() {
        let existing = store.read_record(&install_path)?;
        if record.is_newer_than(&existing) {
            InstallAction::Upgrade { from: existing }
        } else {
            InstallAction::SameOrOlder { from: existing }
        }
    } else {
        InstallAction::Fresh
    };

    Ok(PackageInspection {
        record,
        entries,
        install_path,
        action,
    })
}

/// Read and parse the archive's embedded metadata.
pub(crate) fn read_incoming_record(
    archive: &mut ZipPackageArchive,
    limits: &RecordLimits,
) -> ManagerResult<PackageRecord> {
    let invalid = |reason: String| ManagerError::MissingOrInvalidMetadata { reason };

    let bytes = archive
        .read_entry(PKGINFO_FILENAME)
        .map_err(|e| invalid(e.to_string()))?;
    parse_package_info_bytes(&bytes, limits).map_err(|e| invalid(e.to_string()))
}

/// Install directory for `record`, rejecting names that are not a single
/// path component.
pub(crate) fn resolve_install_path(
    store: &LocalPackageStore,
    record: &PackageRecord,
) -> ManagerResult<PathBuf> {
    store
        .install_path(&record.name)
        .ok_or_else(|| ManagerError::MissingOrInvalidMetadata {
            reason: format!("package name '{}' is not a valid directory name", record.name),
        })
}
