//! Whole-file access to persistent storage.
//!
//! Three primitives used by the installer:
//! - [`read_whole_file`]: read an entire file into memory
//! - [`write_whole_file`]: create or truncate a file and write a buffer
//! - [`remove_tree`]: recursively delete a directory, failing fast
//!
//! None of these retry. A failed [`remove_tree`] can leave a partially
//! deleted directory behind.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from content store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file does not exist.
    #[error("{} not found", .path.display())]
    NotFound { path: PathBuf },

    /// Failed to stat a path.
    #[error("failed to stat {}: {source}", .path.display())]
    Stat { path: PathBuf, source: io::Error },

    /// Failed to open or read a file.
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// A non-empty file produced no bytes.
    #[error("short read from {}: expected {expected} bytes, got none", .path.display())]
    ShortRead { path: PathBuf, expected: u64 },

    /// The read buffer could not be allocated.
    #[error("cannot allocate {size} bytes to read {}", .path.display())]
    Allocation { path: PathBuf, size: u64 },

    /// Failed to create or write a file.
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// The path to remove is a symlink or a file, not a real directory.
    #[error("refusing to remove {}: not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    /// Failed to remove a file or directory.
    #[error("failed to remove {}: {source}", .path.display())]
    Remove { path: PathBuf, source: io::Error },
}

/// Result type for content store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Read an entire file into memory.
///
/// The buffer is reserved up front from the file's stat'd size; an
/// allocation failure is reported as [`StoreError::Allocation`].
pub fn read_whole_file(path: &Path) -> StoreResult<Vec<u8>> {
    let metadata = fs::metadata(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            StoreError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            StoreError::Stat {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let expected = metadata.len();

    let mut file = File::open(path).map_err(|e| StoreError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut buffer = Vec::new();
    usize::try_from(expected)
        .ok()
        .and_then(|size| buffer.try_reserve_exact(size).ok())
        .ok_or_else(|| StoreError::Allocation {
            path: path.to_path_buf(),
            size: expected,
        })?;

    let read = file
        .read_to_end(&mut buffer)
        .map_err(|e| StoreError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

    if read == 0 && expected > 0 {
        return Err(StoreError::ShortRead {
            path: path.to_path_buf(),
            expected,
        });
    }

    Ok(buffer)
}

/// Create or truncate `path` and write all of `bytes` to it.
///
/// On error the destination may hold a partial write and must be treated as
/// incomplete.
pub fn write_whole_file(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let mut file = File::create(path).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    file.write_all(bytes)
        .and_then(|_| file.flush())
        .map_err(|e| StoreError::Write {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Recursively delete a directory and everything below it.
///
/// Subdirectories are descended into, every other entry (including symlinks,
/// which are never followed) is unlinked, and finally the directory itself
/// is removed. Stops at the first failure.
///
/// `path` itself must be a real directory. A symlink at `path` is rejected
/// before anything is touched, so nothing outside the tree is deleted.
pub fn remove_tree(path: &Path) -> StoreResult<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| StoreError::Stat {
        path: path.to_path_buf(),
        source: e,
    })?;
    if !metadata.file_type().is_dir() {
        return Err(StoreError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    let entries = fs::read_dir(path).map_err(|e| StoreError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| StoreError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let entry_path = entry.path();

        let file_type = fs::symlink_metadata(&entry_path)
            .map_err(|e| StoreError::Stat {
                path: entry_path.clone(),
                source: e,
            })?
            .file_type();

        if file_type.is_dir() {
            remove_tree(&entry_path)?;
        } else {
            fs::remove_file(&entry_path).map_err(|e| StoreError::Remove {
                path: entry_path.clone(),
                source: e,
            })?;
        }
    }

    fs::remove_dir(path).map_err(|e| StoreError::Remove {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_whole_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.bin");
        fs::write(&path, b"hello world").unwrap();

        assert_eq!(read_whole_file(&path).unwrap(), b"hello world");
    }

    #[test]
    fn test_read_empty_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty");
        fs::write(&path, b"").unwrap();

        assert!(read_whole_file(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = read_whole_file(&temp.path().join("missing"));
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_read_directory_fails() {
        let temp = TempDir::new().unwrap();
        assert!(read_whole_file(temp.path()).is_err());
    }

    #[test]
    fn test_write_whole_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.bin");

        write_whole_file(&path, &[1, 2, 3, 4]).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_write_truncates_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.txt");
        fs::write(&path, "a much longer previous content").unwrap();

        write_whole_file(&path, b"short").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("no_such_dir").join("out.bin");

        let result = write_whole_file(&path, b"data");
        assert!(matches!(result, Err(StoreError::Write { .. })));
    }

    #[test]
    fn test_remove_tree_nested() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("pkg");
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::write(root.join("top.txt"), "1").unwrap();
        fs::write(root.join("a/mid.txt"), "2").unwrap();
        fs::write(root.join("a/b/c/deep.txt"), "3").unwrap();
        fs::create_dir(root.join("empty")).unwrap();

        remove_tree(&root).unwrap();

        assert!(!root.exists());
        assert!(temp.path().exists());
    }

    #[test]
    fn test_remove_tree_missing_dir_fails() {
        let temp = TempDir::new().unwrap();
        let result = remove_tree(&temp.path().join("missing"));
        assert!(matches!(result, Err(StoreError::Stat { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_tree_does_not_follow_symlinks() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("keep.txt"), "keep").unwrap();

        let root = temp.path().join("pkg");
        fs::create_dir(&root).unwrap();
        symlink(&outside, root.join("link")).unwrap();

        remove_tree(&root).unwrap();

        assert!(!root.exists());
        assert!(outside.join("keep.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_tree_rejects_symlinked_root() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("precious.dat"), "keep").unwrap();

        let root = temp.path().join("pkg");
        symlink(&outside, &root).unwrap();

        let result = remove_tree(&root);
        assert!(matches!(result, Err(StoreError::NotADirectory { .. })));
        assert!(outside.join("precious.dat").exists());
        assert!(fs::symlink_metadata(&root).is_ok());
    }

    #[test]
    fn test_remove_tree_rejects_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("file.txt");
        fs::write(&path, "data").unwrap();

        let result = remove_tree(&path);
        assert!(matches!(result, Err(StoreError::NotADirectory { .. })));
        assert!(path.exists());
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::NotFound {
            path: PathBuf::from("/x/pkginfo.txt"),
        };
        assert_eq!(err.to_string(), "/x/pkginfo.txt not found");
    }
}
