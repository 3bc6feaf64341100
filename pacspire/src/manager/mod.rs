//! Package manager: installing, listing and removing packages.
//!
//! # Architecture
//!
//! ```text
//! PackageInstaller (orchestrator)
//!         │
//!         ├── ZipPackageArchive   (archive access, `archive`)
//!         ├── parse_package_info  (metadata, `crate::package`)
//!         ├── LocalPackageStore   (install root view, `local`)
//!         ├── inspect_archive     (read-only preview, `inspect`)
//!         ├── store               (whole-file I/O, remove_tree)
//!         │
//!         ├── Confirmation (trait) ── asks the user
//!         └── StatusReporter (trait) ── receives status events
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use pacspire::manager::{AssumeYes, InstallerConfig, PackageInstaller, TracingReporter};
//!
//! let config = InstallerConfig::new("/documents/pacspire");
//! let installer = PackageInstaller::new(&config, &TracingReporter, &AssumeYes);
//!
//! let result = installer.install(Path::new("game.pcs"))?;
//! println!("Installed {} to {}", result.record, result.install_path.display());
//! ```

mod archive;
mod config;
mod error;
mod inspect;
mod installer;
mod local;
mod prompt;
mod reporter;
pub mod store;
mod traits;

pub use archive::{ArchiveEntry, ArchiveEntryInfo, ArchiveError, ArchiveResult, ZipPackageArchive};
pub use config::{default_install_root, InstallerConfig, DEFAULT_ROOT_DIR_NAME};
pub use error::{ManagerError, ManagerResult};
pub use inspect::{inspect_archive, PackageInspection};
pub use installer::{InstallAction, InstallResult, InstallStage, PackageInstaller};
pub use local::LocalPackageStore;
pub use prompt::{AssumeYes, Decision, Prompt, PromptKind, PROMPT_TITLE};
pub use reporter::{StatusLevel, TracingReporter};
pub use store::StoreError;
pub use traits::{Confirmation, StatusReporter};
