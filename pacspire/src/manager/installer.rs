//! Package installer for local package archives.
//!
//! This module drives one install attempt from start to finish:
//! 1. Open the archive
//! 2. Extract and parse the embedded `pkginfo.txt`
//! 3. Probe for an existing installation and parse its metadata
//! 4. Compare timestamps and ask for confirmation
//! 5. Remove the previous installation
//! 6. Create the install directory
//! 7. Write every archive entry into it, in archive order
//!
//! Any failure ends the attempt. Nothing is rolled back: a failure during
//! step 7 leaves the entries written so far on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::package::{is_single_component, PackageRecord};

use super::archive::ZipPackageArchive;
use super::config::InstallerConfig;
use super::error::{ManagerError, ManagerResult};
use super::inspect::{read_incoming_record, resolve_install_path};
use super::local::LocalPackageStore;
use super::prompt::Prompt;
use super::store;
use super::traits::{Confirmation, StatusReporter};

/// Installation stages, in the order they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStage {
    /// Opening the package archive.
    OpenArchive,
    /// Reading and parsing the archive's `pkginfo.txt`.
    ExtractIncomingMetadata,
    /// Checking for an existing installation.
    ProbeExisting,
    /// Comparing incoming and installed timestamps.
    CompareVersions,
    /// Deleting the previous installation.
    RemoveExisting,
    /// Asking to install a package that is not installed yet.
    ConfirmFreshInstall,
    /// Creating the install directory.
    CreateTarget,
    /// Writing archive entries.
    ExtractAll,
    /// Installation complete.
    Installed,
}

impl InstallStage {
    /// Get a human-readable name for the stage.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenArchive => "Opening package",
            Self::ExtractIncomingMetadata => "Reading package info",
            Self::ProbeExisting => "Checking existing installation",
            Self::CompareVersions => "Comparing versions",
            Self::RemoveExisting => "Removing previous installation",
            Self::ConfirmFreshInstall => "Confirming installation",
            Self::CreateTarget => "Creating install directory",
            Self::ExtractAll => "Extracting files",
            Self::Installed => "Installed",
        }
    }
}

/// How the install related to what was already on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallAction {
    /// Nothing was installed before.
    Fresh,
    /// Replaced an older build.
    Upgrade { from: PackageRecord },
    /// Replaced an equal or newer build.
    SameOrOlder { from: PackageRecord },
}

/// Result of a package installation.
#[derive(Debug, Clone)]
pub struct InstallResult {
    /// The installed package's record.
    pub record: PackageRecord,
    /// Path where the package was installed.
    pub install_path: PathBuf,
    /// What the install replaced, if anything.
    pub action: InstallAction,
    /// Number of files written.
    pub files_extracted: usize,
    /// Total bytes written.
    pub bytes_written: u64,
}

/// Package installer.
///
/// Holds the configuration and the two collaborators every install needs:
/// somewhere to send status events and someone to answer prompts.
pub struct PackageInstaller<'a> {
    store: LocalPackageStore,
    reporter: &'a dyn StatusReporter,
    confirmation: &'a dyn Confirmation,
}

impl<'a> PackageInstaller<'a> {
    /// Create a new package installer.
    ///
    /// # Arguments
    ///
    /// * `config` - Install root and record limits
    /// * `reporter` - Receives status events for every stage
    /// * `confirmation` - Answers the install/update/continue prompts
    pub fn new(
        config: &InstallerConfig,
        reporter: &'a dyn StatusReporter,
        confirmation: &'a dyn Confirmation,
    ) -> Self {
        Self {
            store: LocalPackageStore::new(&config.install_root, config.limits),
            reporter,
            confirmation,
        }
    }

    /// Get the local package store.
    pub fn store(&self) -> &LocalPackageStore {
        &self.store
    }

    /// Install the package archive at `archive_path`.
    ///
    /// Every failure is reported to the status reporter before it is
    /// returned.
    pub fn install(&self, archive_path: &Path) -> ManagerResult<InstallResult> {
        tracing::info!(archive = %archive_path.display(), "Installing package");

        let result = self.run(archive_path);
        match &result {
            Ok(installed) => {
                tracing::info!(
                    package = %installed.record.name,
                    version = %installed.record.version,
                    files = installed.files_extracted,
                    "Package installed"
                );
            }
            Err(e) => {
                tracing::warn!(archive = %archive_path.display(), error = %e, "Installation failed");
                self.reporter.error(&e.to_string());
            }
        }
        result
    }

    fn run(&self, archive_path: &Path) -> ManagerResult<InstallResult> {
        let limits = *self.store.limits();

        // Stage: open archive
        self.stage(InstallStage::OpenArchive);
        let mut archive = ZipPackageArchive::open(archive_path, &limits).map_err(|e| {
            ManagerError::ArchiveOpen {
                path: archive_path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        self.reporter.success("done");

        // Stage: incoming metadata
        self.stage(InstallStage::ExtractIncomingMetadata);
        let incoming = read_incoming_record(&mut archive, &limits)?;
        self.reporter.success("done");
        self.reporter.info(&format!("Package: {}", incoming.name));
        self.reporter.info(&format!("Version: {}", incoming.version));
        self.reporter.info(&format!("Timestamp: {}", incoming.timestamp));

        let target = resolve_install_path(&self.store, &incoming)?;

        // Stage: probe existing
        self.stage(InstallStage::ProbeExisting);
        let action = if target.exists() {
            self.reporter.warning("already installed");
            let existing = self.store.read_record(&target)?;
            tracing::debug!(existing = %existing, incoming = %incoming, "Found existing installation");

            self.stage(InstallStage::CompareVersions);
            let (prompt, action) = if incoming.is_newer_than(&existing) {
                self.reporter.success("incoming package is newer");
                (
                    Prompt::upgrade(&existing, &incoming),
                    InstallAction::Upgrade { from: existing },
                )
            } else {
                self.reporter.warning("installed version is the same or newer");
                (
                    Prompt::same_or_older(&existing, &incoming),
                    InstallAction::SameOrOlder { from: existing },
                )
            };
            self.require_confirmation(&prompt)?;

            self.stage(InstallStage::RemoveExisting);
            store::remove_tree(&target).map_err(|source| ManagerError::RemovalFailed {
                path: target.clone(),
                source,
            })?;
            self.reporter.success("done");
            action
        } else {
            self.reporter.success("not installed");

            self.stage(InstallStage::ConfirmFreshInstall);
            self.require_confirmation(&Prompt::fresh_install(&incoming))?;
            InstallAction::Fresh
        };

        // Stage: create target
        self.stage(InstallStage::CreateTarget);
        self.create_target(&target)?;

        // Stage: extract all
        self.stage(InstallStage::ExtractAll);
        let (files_extracted, bytes_written) = self.extract_all(&mut archive, &target)?;

        tracing::debug!(stage = ?InstallStage::Installed, "Entering stage");
        self.reporter.success(&format!(
            "{}: {} {} in {}",
            InstallStage::Installed.name(),
            incoming.name,
            incoming.version,
            target.display()
        ));

        Ok(InstallResult {
            record: incoming,
            install_path: target,
            action,
            files_extracted,
            bytes_written,
        })
    }

    fn stage(&self, stage: InstallStage) {
        tracing::debug!(stage = ?stage, "Entering stage");
        self.reporter.info(&format!("{}...", stage.name()));
    }

    fn require_confirmation(&self, prompt: &Prompt) -> ManagerResult<()> {
        let decision = self.confirmation.confirm(prompt);
        tracing::debug!(kind = ?prompt.kind, decision = ?decision, "Confirmation answered");

        if decision.is_affirmative() {
            Ok(())
        } else {
            Err(ManagerError::UserCancelled)
        }
    }

    fn create_target(&self, target: &Path) -> ManagerResult<()> {
        let create_failed = |path: &Path, source: io::Error| ManagerError::DirectoryCreateFailed {
            path: path.to_path_buf(),
            source,
        };

        fs::create_dir_all(self.store.root()).map_err(|e| create_failed(self.store.root(), e))?;

        match fs::create_dir(target) {
            Ok(()) => self.reporter.success("done"),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                self.reporter.warning("exists");
            }
            Err(e) => return Err(create_failed(target, e)),
        }
        Ok(())
    }

    fn extract_all(
        &self,
        archive: &mut ZipPackageArchive,
        target: &Path,
    ) -> ManagerResult<(usize, u64)> {
        let mut files = 0;
        let mut bytes = 0u64;

        for index in 0..archive.len() {
            let entry = archive
                .read_entry_at(index)
                .map_err(|e| ManagerError::ExtractionFailed {
                    entry: format!("entry #{}", index),
                    reason: e.to_string(),
                })?;
            let name = entry.info.name;

            self.reporter.info(&format!("Inflating {}...", name));
            if entry.info.is_dir || !is_single_component(&name) {
                return Err(ManagerError::ExtractionFailed {
                    entry: name,
                    reason: "entry name must be a plain file name".to_string(),
                });
            }

            let destination = target.join(&name);
            store::write_whole_file(&destination, &entry.content).map_err(|e| {
                ManagerError::ExtractionFailed {
                    entry: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            tracing::debug!(entry = %name, bytes = entry.content.len(), "Wrote entry");

            files += 1;
            bytes += entry.content.len() as u64;
        }

        self.reporter
            .success(&format!("Extracted {} files ({} bytes)", files, bytes));
        Ok((files, bytes))
    }
}
