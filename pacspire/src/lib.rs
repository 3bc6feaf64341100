//! pacspire - package installer for zip-based application bundles.
//!
//! A package is a zip archive holding a flat set of files plus a
//! `pkginfo.txt` that names the package, its display version and a build
//! timestamp. Installing unpacks the archive into `<root>/<name>/`, asking
//! for confirmation first and replacing any previous build.
//!
//! - [`package`]: package records and metadata parsing
//! - [`manager`]: archive access, installation and the local package store
//! - [`config`]: INI configuration file
//! - [`logging`]: tracing subscriber setup

pub mod config;
pub mod logging;
pub mod manager;
pub mod package;
