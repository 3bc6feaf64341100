//! Naming utilities for installed packages.
//!
//! Package names and archive entry names both become path components under
//! the install root, so they are checked here before any path is built.

use std::path::{Component, Path, PathBuf};

/// Name of the metadata file, both inside archives and in install directories.
pub const PKGINFO_FILENAME: &str = "pkginfo.txt";

/// Check that `name` is exactly one normal path component.
///
/// Rejects empty names, `.`, `..`, absolute paths, and anything containing a
/// path separator.
///
/// # Example
///
/// ```
/// use pacspire::package::is_single_component;
///
/// assert!(is_single_component("foo"));
/// assert!(!is_single_component("../foo"));
/// assert!(!is_single_component("a/b"));
/// ```
pub fn is_single_component(name: &str) -> bool {
    if name.is_empty() || name.contains('/') || name.contains('\\') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Install directory for a package: `<root>/<name>`.
///
/// Returns `None` when the name cannot be used as a single directory name.
pub fn install_target(root: &Path, name: &str) -> Option<PathBuf> {
    is_single_component(name).then(|| root.join(name))
}

/// Path of the metadata file inside an install directory.
pub fn pkginfo_path(install_dir: &Path) -> PathBuf {
    install_dir.join(PKGINFO_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_component() {
        assert!(is_single_component("foo"));
        assert!(is_single_component("foo.bin"));
        assert!(is_single_component(".hidden"));
        assert!(is_single_component("pkginfo.txt"));
    }

    #[test]
    fn test_rejects_special_components() {
        assert!(!is_single_component(""));
        assert!(!is_single_component("."));
        assert!(!is_single_component(".."));
        assert!(!is_single_component("/"));
        assert!(!is_single_component("/etc"));
    }

    #[test]
    fn test_rejects_nested_names() {
        assert!(!is_single_component("a/b"));
        assert!(!is_single_component("dir/"));
        assert!(!is_single_component("a\\b"));
    }

    #[test]
    fn test_install_target() {
        let root = Path::new("/documents/pacspire");
        assert_eq!(
            install_target(root, "foo"),
            Some(PathBuf::from("/documents/pacspire/foo"))
        );
        assert_eq!(install_target(root, ".."), None);
        assert_eq!(install_target(root, "a/b"), None);
    }

    #[test]
    fn test_pkginfo_path() {
        assert_eq!(
            pkginfo_path(Path::new("/root/foo")),
            PathBuf::from("/root/foo/pkginfo.txt")
        );
    }
}
