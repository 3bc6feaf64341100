//! Package identity types and metadata parsing.
//!
//! # Overview
//!
//! Every pacspire package is a zip archive carrying a `pkginfo.txt` entry that
//! declares the package's identity:
//!
//! - **PackageRecord**: name, display version and ordering timestamp
//! - **InstalledPackage**: a record plus the directory it was found in
//! - **RecordLimits**: maximum lengths applied when copying strings in
//! - **Naming**: install directory derivation and path component checks
//!
//! # File Format
//!
//! ```text
//! name=foo
//! version=1.0
//! timestamp=100
//! ```
//!
//! The same file is extracted verbatim into `<root>/<name>/pkginfo.txt`, where
//! it records which build is installed.

mod installed;
mod metadata;
mod naming;
mod record;

pub use installed::InstalledPackage;
pub use metadata::{parse_package_info, parse_package_info_bytes, MetadataError};
pub use naming::{install_target, is_single_component, pkginfo_path, PKGINFO_FILENAME};
pub use record::{
    PackageRecord, RecordLimits, DEFAULT_MAX_FILENAME_LEN, DEFAULT_MAX_NAME_LEN,
    DEFAULT_MAX_VERSION_LEN,
};

pub(crate) use record::truncate_to;
