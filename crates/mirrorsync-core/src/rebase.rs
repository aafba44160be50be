//! Mapping paths between the source tree and the replica tree
//!
//! Translation is done component-wise: a path is stripped of one root and
//! joined onto the other. Root names recurring deeper inside a path (a
//! subdirectory literally called `source`, say) are left untouched.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::Result;

/// Translates paths between a source root and a replica root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRebaser {
    source_root: PathBuf,
    replica_root: PathBuf,
}

impl PathRebaser {
    /// Create a rebaser for the given pair of roots
    #[must_use]
    pub fn new(source_root: impl Into<PathBuf>, replica_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            replica_root: replica_root.into(),
        }
    }

    /// Root of the source tree
    #[must_use]
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Root of the replica tree
    #[must_use]
    pub fn replica_root(&self) -> &Path {
        &self.replica_root
    }

    /// Absolute source path for a tree-relative path
    #[must_use]
    pub fn source_path(&self, relative: &Path) -> PathBuf {
        self.source_root.join(relative)
    }

    /// Absolute replica path for a tree-relative path
    #[must_use]
    pub fn replica_path(&self, relative: &Path) -> PathBuf {
        self.replica_root.join(relative)
    }

    /// Map a path under the source root to the same place under the replica root
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not inside the source root.
    pub fn to_replica(&self, path: &Path) -> Result<PathBuf> {
        let relative = path.strip_prefix(&self.source_root).with_context(|| {
            format!(
                "{} is not inside source root {}",
                path.display(),
                self.source_root.display()
            )
        })?;
        Ok(self.replica_path(relative))
    }

    /// Map a path under the replica root to the same place under the source root
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not inside the replica root.
    pub fn to_source(&self, path: &Path) -> Result<PathBuf> {
        let relative = path.strip_prefix(&self.replica_root).with_context(|| {
            format!(
                "{} is not inside replica root {}",
                path.display(),
                self.replica_root.display()
            )
        })?;
        Ok(self.source_path(relative))
    }
}
