//! Directory tree enumeration
//!
//! Walks a tree and returns every directory and regular file beneath its
//! root as paths relative to that root. Files carry the modification time
//! read during the walk. Results are sorted, so a parent directory always
//! precedes its descendants. Symlinks and other special entries are never
//! followed; they are reported separately so a replica can be cleared of them.


use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Context;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{EnumerationError, Result};

/// Snapshot of one tree, produced fresh for every cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enumeration {
    /// Relative paths of all directories below the root (root excluded)
    pub directories: BTreeSet<PathBuf>,
    /// Relative paths of all regular files with their modification time
    pub files: BTreeMap<PathBuf, SystemTime>,
    /// Relative paths of symlinks, sockets, FIFOs and device nodes
    pub special: BTreeSet<PathBuf>,
}

impl Enumeration {
    /// Whether the tree has no entries below its root
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of entries below the root
    #[must_use]
    pub fn len(&self) -> usize {
        self.directories.len() + self.files.len() + self.special.len()
    }

    /// Modification time recorded for a relative file path
    #[must_use]
    pub fn modified(&self, relative: &Path) -> Option<SystemTime> {
        self.files.get(relative).copied()
    }
}

/// Tree walker
pub struct Scanner;

impl Scanner {
    /// Create a new scanner
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Enumerate every entry below `root`
    ///
    /// Symbolic links are not followed. A link, whatever it points to, lands
    /// in [`Enumeration::special`].
    ///
    /// # Errors
    ///
    /// Returns an [`EnumerationError`] if the root is missing, is not a
    /// directory, or any part of the tree cannot be read.
    pub fn enumerate(root: &Path) -> Result<Enumeration> {
        let metadata = match fs::metadata(root) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(EnumerationError::RootMissing {
                    root: root.to_path_buf(),
                }
                .into());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read metadata for: {}", root.display()));
            }
        };

        if !metadata.is_dir() {
            return Err(EnumerationError::NotADirectory {
                root: root.to_path_buf(),
            }
            .into());
        }

        let mut enumeration = Enumeration::default();

        for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
            let entry = entry.map_err(|source| EnumerationError::Walk {
                root: root.to_path_buf(),
                source,
            })?;
            let relative = entry
                .path()
                .strip_prefix(root)
                .with_context(|| format!("Failed to strip prefix from {}", entry.path().display()))?
                .to_path_buf();
            let file_type = entry.file_type();

            if file_type.is_dir() {
                enumeration.directories.insert(relative);
            } else if file_type.is_file() {
                let modified = entry
                    .metadata()
                    .map_err(|source| EnumerationError::Walk {
                        root: root.to_path_buf(),
                        source,
                    })?
                    .modified()
                    .with_context(|| {
                        format!("Failed to get modification time for: {}", entry.path().display())
                    })?;
                enumeration.files.insert(relative, modified);
            } else {
                debug!(path = %entry.path().display(), "non-regular entry");
                enumeration.special.insert(relative);
            }
        }

        debug!(
            root = %root.display(),
            directories = enumeration.directories.len(),
            files = enumeration.files.len(),
            special = enumeration.special.len(),
            entries = enumeration.len(),
            "enumerated tree"
        );

        Ok(enumeration)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_enumerate_empty_root() {
        let tmp = TempDir::new().unwrap();

        let enumeration = Scanner::enumerate(tmp.path()).unwrap();

        assert!(enumeration.is_empty());
        assert_eq!(enumeration.len(), 0);
    }

    #[test]
    fn test_enumerate_missing_root() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing");

        let err = Scanner::enumerate(&missing).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<EnumerationError>(),
            Some(EnumerationError::RootMissing { .. })
        ));
    }

    #[test]
    fn test_enumerate_file_as_root() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        fs::write(&file, "content").unwrap();

        let err = Scanner::enumerate(&file).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<EnumerationError>(),
            Some(EnumerationError::NotADirectory { .. })
        ));
    }

    #[test]
    fn test_enumerate_records_modified_time() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        fs::write(&file, "content").unwrap();
        let expected = fs::metadata(&file).unwrap().modified().unwrap();

        let enumeration = Scanner::enumerate(tmp.path()).unwrap();

        assert_eq!(enumeration.modified(Path::new("file.txt")), Some(expected));
        assert_eq!(enumeration.modified(Path::new("other.txt")), None);
    }
}
