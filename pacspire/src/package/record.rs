//! Core package identity type.
//!
//! The [`PackageRecord`] struct is the name/version/timestamp triple declared by
//! a package's `pkginfo.txt`, shared by the archive being installed and the copy
//! already on disk.

use std::fmt;

/// Default maximum length of a package name, in bytes.
pub const DEFAULT_MAX_NAME_LEN: usize = 20;

/// Default maximum length of a version string, in bytes.
pub const DEFAULT_MAX_VERSION_LEN: usize = 10;

/// Default maximum length of an archive entry name, in bytes.
pub const DEFAULT_MAX_FILENAME_LEN: usize = 49;

/// Length limits applied when copying strings into records.
///
/// Values longer than a limit are silently truncated, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLimits {
    /// Maximum package name length in bytes.
    pub max_name_len: usize,
    /// Maximum version string length in bytes.
    pub max_version_len: usize,
    /// Maximum archive entry name length in bytes.
    pub max_filename_len: usize,
}

impl Default for RecordLimits {
    fn default() -> Self {
        Self {
            max_name_len: DEFAULT_MAX_NAME_LEN,
            max_version_len: DEFAULT_MAX_VERSION_LEN,
            max_filename_len: DEFAULT_MAX_FILENAME_LEN,
        }
    }
}

impl RecordLimits {
    /// Set the maximum name length.
    pub fn with_max_name_len(mut self, len: usize) -> Self {
        self.max_name_len = len;
        self
    }

    /// Set the maximum version length.
    pub fn with_max_version_len(mut self, len: usize) -> Self {
        self.max_version_len = len;
        self
    }

    /// Set the maximum archive entry name length.
    pub fn with_max_filename_len(mut self, len: usize) -> Self {
        self.max_filename_len = len;
        self
    }
}

/// Identity of a package build.
///
/// A record only exists once all three fields are populated: the name and
/// version are non-empty and the timestamp is non-zero. Records are built by
/// [`parse_package_info`](super::parse_package_info).
///
/// # Example
///
/// ```
/// use pacspire::package::{parse_package_info, RecordLimits};
///
/// let record = parse_package_info("name=foo\nversion=1.0\ntimestamp=100", &RecordLimits::default())
///     .unwrap();
///
/// assert_eq!(record.name, "foo");
/// assert_eq!(record.to_string(), "foo 1.0 (100)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    /// Short package identifier, also the install directory name.
    pub name: String,

    /// Display version string.
    pub version: String,

    /// Build marker used to order two builds of the same package.
    pub timestamp: u64,
}

impl PackageRecord {
    /// Whether this build is strictly newer than `other`.
    ///
    /// Only the timestamp is compared; the version string is for display.
    pub fn is_newer_than(&self, other: &PackageRecord) -> bool {
        self.timestamp > other.timestamp
    }
}

impl fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.name, self.version, self.timestamp)
    }
}

/// Truncate `value` to at most `max` bytes without splitting a character.
pub(crate) fn truncate_to(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: u64) -> PackageRecord {
        PackageRecord {
            name: "foo".to_string(),
            version: "1.0".to_string(),
            timestamp,
        }
    }

    #[test]
    fn test_default_limits() {
        let limits = RecordLimits::default();
        assert_eq!(limits.max_name_len, 20);
        assert_eq!(limits.max_version_len, 10);
        assert_eq!(limits.max_filename_len, 49);
    }

    #[test]
    fn test_limits_builder() {
        let limits = RecordLimits::default()
            .with_max_name_len(8)
            .with_max_version_len(4)
            .with_max_filename_len(12);

        assert_eq!(limits.max_name_len, 8);
        assert_eq!(limits.max_version_len, 4);
        assert_eq!(limits.max_filename_len, 12);
    }

    #[test]
    fn test_is_newer_than() {
        assert!(record(200).is_newer_than(&record(100)));
        assert!(!record(100).is_newer_than(&record(100)));
        assert!(!record(100).is_newer_than(&record(200)));
    }

    #[test]
    fn test_display() {
        assert_eq!(record(42).to_string(), "foo 1.0 (42)");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to("abcdef", 3), "abc");
        assert_eq!(truncate_to("abc", 3), "abc");
        assert_eq!(truncate_to("ab", 3), "ab");
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        // 'é' is two bytes; a cut at byte 2 would split it
        assert_eq!(truncate_to("aéb", 2), "a");
        assert_eq!(truncate_to("aéb", 3), "aé");
    }
}
