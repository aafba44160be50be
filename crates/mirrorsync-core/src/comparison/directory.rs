//! Tree comparison
//!
//! Given two enumerations, compute which directories and files have to be
//! created, deleted or overwritten in the replica so it matches the source.
//! Symlinks and other special entries are never mirrored: those found in the
//! replica are scheduled for deletion like stray files.

use std::path::PathBuf;

use super::timestamp::TimestampComparator;
use crate::scanner::Enumeration;

/// Delta between a source and a replica tree, as tree-relative paths
///
/// Every list is sorted, so parent directories precede their descendants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeDiff {
    /// Directories present in the source but not in the replica
    pub create_dirs: Vec<PathBuf>,
    /// Files present in the source but not in the replica
    pub create_files: Vec<PathBuf>,
    /// Directories present in the replica but not in the source
    pub delete_dirs: Vec<PathBuf>,
    /// Files present in the replica but not in the source, plus every special
    /// entry in the replica
    pub delete_files: Vec<PathBuf>,
    /// Files present in both whose modification times differ
    pub modify_files: Vec<PathBuf>,
}

impl TreeDiff {
    /// Check if the trees already match (no changes)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.change_count() == 0
    }

    /// Count total number of changes
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.create_dirs.len()
            + self.create_files.len()
            + self.delete_dirs.len()
            + self.delete_files.len()
            + self.modify_files.len()
    }
}

/// Computes the delta between two enumerations
pub struct DiffEngine;

impl DiffEngine {
    /// Compare a source enumeration against a replica enumeration
    #[must_use]
    pub fn compute(source: &Enumeration, replica: &Enumeration) -> TreeDiff {
        let mut diff = TreeDiff::default();

        for dir in &source.directories {
            if !replica.directories.contains(dir) {
                diff.create_dirs.push(dir.clone());
            }
        }

        for dir in &replica.directories {
            if !source.directories.contains(dir) {
                diff.delete_dirs.push(dir.clone());
            }
        }

        for (file, source_time) in &source.files {
            match replica.modified(file) {
                None => diff.create_files.push(file.clone()),
                Some(replica_time) => {
                    if TimestampComparator::differs(*source_time, replica_time) {
                        diff.modify_files.push(file.clone());
                    }
                }
            }
        }

        for file in replica.files.keys() {
            if !source.files.contains_key(file) {
                diff.delete_files.push(file.clone());
            }
        }
        diff.delete_files.extend(replica.special.iter().cloned());
        diff.delete_files.sort();

        diff
    }
}
