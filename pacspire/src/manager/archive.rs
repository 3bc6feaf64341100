//! Sequential access to package archives.
//!
//! [`ZipPackageArchive`] wraps [`zip::ZipArchive`] with the handful of
//! operations the installer needs: look up an entry by exact name, walk the
//! entries in the order they are stored, and decompress an entry into an
//! owned buffer.
//!
//! No integrity guarantee is made here. The zip crate happens to check CRCs
//! while reading, but callers must not rely on it.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::package::{truncate_to, RecordLimits};

/// Errors from archive access.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive file could not be opened or is not a zip archive.
    #[error("cannot open archive {}: {reason}", .path.display())]
    Open { path: PathBuf, reason: String },

    /// No entry with the requested name.
    #[error("entry '{0}' not found in archive")]
    EntryNotFound(String),

    /// No entry at the requested position.
    #[error("no entry at index {0}")]
    IndexOutOfRange(usize),

    /// The entry could not be decompressed.
    #[error("failed to read entry '{name}': {reason}")]
    Read { name: String, reason: String },

    /// The buffer for the entry could not be allocated.
    #[error("cannot allocate {size} bytes for entry '{name}'")]
    Allocation { name: String, size: u64 },
}

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Name and size of an archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntryInfo {
    /// Stored entry name, truncated to the maximum filename length.
    pub name: String,
    /// Declared uncompressed size in bytes.
    pub size: u64,
    /// Whether the archive marks this entry as a directory.
    pub is_dir: bool,
}

/// A fully decompressed archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry name and declared size.
    pub info: ArchiveEntryInfo,
    /// Decompressed content.
    pub content: Vec<u8>,
}

/// A package archive opened for reading.
pub struct ZipPackageArchive {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
    max_filename_len: usize,
}

impl ZipPackageArchive {
    /// Open the archive at `path`.
    pub fn open(path: &Path, limits: &RecordLimits) -> ArchiveResult<Self> {
        let open_error = |reason: String| ArchiveError::Open {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path).map_err(|e| open_error(e.to_string()))?;
        let archive = ZipArchive::new(BufReader::new(file)).map_err(|e| open_error(e.to_string()))?;

        Ok(Self {
            path: path.to_path_buf(),
            archive,
            max_filename_len: limits.max_filename_len,
        })
    }

    /// Path the archive was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries in the archive.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Whether the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Read the entry with exactly this name (case-sensitive).
    pub fn read_entry(&mut self, name: &str) -> ArchiveResult<Vec<u8>> {
        let file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => {
                return Err(ArchiveError::EntryNotFound(name.to_string()))
            }
            Err(e) => {
                return Err(ArchiveError::Read {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
            }
        };

        let size = file.size();
        read_sized(file, name, size)
    }

    /// Name and size of the entry at `index`, in archive order.
    pub fn entry_info(&mut self, index: usize) -> ArchiveResult<ArchiveEntryInfo> {
        self.check_index(index)?;
        let max_len = self.max_filename_len;
        let file = self
            .archive
            .by_index(index)
            .map_err(|e| index_error(index, e))?;

        Ok(ArchiveEntryInfo {
            name: truncate_to(file.name(), max_len).to_string(),
            size: file.size(),
            is_dir: file.is_dir(),
        })
    }

    /// Name, size and decompressed content of the entry at `index`.
    pub fn read_entry_at(&mut self, index: usize) -> ArchiveResult<ArchiveEntry> {
        let info = self.entry_info(index)?;
        let file = self
            .archive
            .by_index(index)
            .map_err(|e| index_error(index, e))?;
        let content = read_sized(file, &info.name, info.size)?;

        Ok(ArchiveEntry { info, content })
    }

    /// Names and sizes of every entry, in archive order.
    pub fn list_entries(&mut self) -> ArchiveResult<Vec<ArchiveEntryInfo>> {
        (0..self.len()).map(|i| self.entry_info(i)).collect()
    }

    fn check_index(&self, index: usize) -> ArchiveResult<()> {
        if index >= self.archive.len() {
            return Err(ArchiveError::IndexOutOfRange(index));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ZipPackageArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipPackageArchive")
            .field("path", &self.path)
            .field("entries", &self.archive.len())
            .finish()
    }
}

fn index_error(index: usize, e: ZipError) -> ArchiveError {
    ArchiveError::Read {
        name: format!("#{}", index),
        reason: e.to_string(),
    }
}

/// Decompress `reader` into a buffer reserved to exactly `size` bytes.
fn read_sized(reader: impl Read, name: &str, size: u64) -> ArchiveResult<Vec<u8>> {
    let mut buffer = Vec::new();
    usize::try_from(size)
        .ok()
        .and_then(|len| buffer.try_reserve_exact(len).ok())
        .ok_or_else(|| ArchiveError::Allocation {
            name: name.to_string(),
            size,
        })?;

    let read_error = |e: io::Error| ArchiveError::Read {
        name: name.to_string(),
        reason: e.to_string(),
    };

    // Never read past the declared size.
    reader
        .take(size)
        .read_to_end(&mut buffer)
        .map_err(read_error)?;

    if buffer.len() as u64 != size {
        return Err(ArchiveError::Read {
            name: name.to_string(),
            reason: format!("expected {} bytes, got {}", size, buffer.len()),
        });
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let mut writer = ZipWriter::new(File::create(path).unwrap());
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap();
    }

    fn open(path: &Path) -> ZipPackageArchive {
        ZipPackageArchive::open(path, &RecordLimits::default()).unwrap()
    }

    #[test]
    fn test_open_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = ZipPackageArchive::open(&temp.path().join("missing.pcs"), &RecordLimits::default());
        assert!(matches!(result, Err(ArchiveError::Open { .. })));
    }

    #[test]
    fn test_open_not_a_zip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bogus.pcs");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        let result = ZipPackageArchive::open(&path, &RecordLimits::default());
        assert!(matches!(result, Err(ArchiveError::Open { .. })));
    }

    #[test]
    fn test_read_entry_by_name() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pkg.pcs");
        write_zip(&path, &[("pkginfo.txt", b"name=foo"), ("data.bin", &[0, 1, 2])]);

        let mut archive = open(&path);
        assert_eq!(archive.read_entry("data.bin").unwrap(), vec![0, 1, 2]);
        assert_eq!(archive.read_entry("pkginfo.txt").unwrap(), b"name=foo");
    }

    #[test]
    fn test_read_entry_is_case_sensitive() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pkg.pcs");
        write_zip(&path, &[("PKGINFO.TXT", b"name=foo")]);

        let mut archive = open(&path);
        let result = archive.read_entry("pkginfo.txt");
        assert!(matches!(result, Err(ArchiveError::EntryNotFound(ref n)) if n == "pkginfo.txt"));
    }

    #[test]
    fn test_entries_in_archive_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pkg.pcs");
        write_zip(&path, &[("b.txt", b"bb"), ("a.txt", b"a"), ("c.txt", b"")]);

        let mut archive = open(&path);
        assert_eq!(archive.len(), 3);

        let names: Vec<_> = archive
            .list_entries()
            .unwrap()
            .into_iter()
            .map(|e| (e.name, e.size))
            .collect();
        assert_eq!(
            names,
            vec![
                ("b.txt".to_string(), 2),
                ("a.txt".to_string(), 1),
                ("c.txt".to_string(), 0)
            ]
        );

        let entry = archive.read_entry_at(0).unwrap();
        assert_eq!(entry.info.name, "b.txt");
        assert_eq!(entry.content, b"bb");
    }

    #[test]
    fn test_entry_name_truncated() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pkg.pcs");
        write_zip(&path, &[("a_rather_long_entry_name.bin", b"x")]);

        let limits = RecordLimits::default().with_max_filename_len(6);
        let mut archive = ZipPackageArchive::open(&path, &limits).unwrap();
        assert_eq!(archive.entry_info(0).unwrap().name, "a_rath");
    }

    #[test]
    fn test_index_out_of_range() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pkg.pcs");
        write_zip(&path, &[("a.txt", b"a")]);

        let mut archive = open(&path);
        assert!(matches!(
            archive.read_entry_at(1),
            Err(ArchiveError::IndexOutOfRange(1))
        ));
    }

    #[test]
    fn test_read_sized_short_content() {
        let result = read_sized(&b"abc"[..], "short", 10);
        assert!(matches!(result, Err(ArchiveError::Read { .. })));
    }
}
