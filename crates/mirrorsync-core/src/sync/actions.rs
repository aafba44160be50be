//! Sync action determination logic

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::comparison::TreeDiff;
use crate::error::Result;
use crate::rebase::PathRebaser;

/// Kind of change applied to the replica
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Create a directory
    CreateDir,
    /// Copy a new file
    CreateFile,
    /// Remove a directory and everything below it
    DeleteDir,
    /// Remove a file
    DeleteFile,
    /// Overwrite an existing file
    ModifyFile,
}

/// Sync action to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Create a directory (and missing parents) at destination
    CreateDir { source: PathBuf, dest: PathBuf },
    /// Copy a file that does not exist at destination yet
    CreateFile { source: PathBuf, dest: PathBuf },
    /// Recursively remove a directory that no longer exists in the source
    DeleteDir { dest: PathBuf },
    /// Remove a file that no longer exists in the source
    DeleteFile { dest: PathBuf },
    /// Overwrite a destination file whose timestamp differs from the source
    ModifyFile { source: PathBuf, dest: PathBuf },
}

impl SyncAction {
    /// Kind of this action
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::CreateDir { .. } => ActionKind::CreateDir,
            Self::CreateFile { .. } => ActionKind::CreateFile,
            Self::DeleteDir { .. } => ActionKind::DeleteDir,
            Self::DeleteFile { .. } => ActionKind::DeleteFile,
            Self::ModifyFile { .. } => ActionKind::ModifyFile,
        }
    }

    /// Source path, absent for deletions
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        match self {
            Self::CreateDir { source, .. }
            | Self::CreateFile { source, .. }
            | Self::ModifyFile { source, .. } => Some(source),
            Self::DeleteDir { .. } | Self::DeleteFile { .. } => None,
        }
    }

    /// Replica path the action applies to
    #[must_use]
    pub fn replica(&self) -> &Path {
        match self {
            Self::CreateDir { dest, .. }
            | Self::CreateFile { dest, .. }
            | Self::DeleteDir { dest }
            | Self::DeleteFile { dest }
            | Self::ModifyFile { dest, .. } => dest,
        }
    }
}

/// Resolves a tree diff into an ordered list of sync actions
pub struct SyncActionResolver;

impl SyncActionResolver {
    /// Create a new action resolver
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Turn a diff into actions in application order
    ///
    /// Deletions come first (files, then directories), so a path whose type
    /// changed is cleared before it is recreated. Directory creations precede
    /// file creations, and modifications come last.
    ///
    /// # Errors
    ///
    /// Returns an error if a path cannot be mapped between the two roots.
    pub fn resolve(diff: &TreeDiff, rebaser: &PathRebaser) -> Result<Vec<SyncAction>> {
        let mut actions = Vec::with_capacity(diff.change_count());

        for rel in &diff.delete_files {
            let dest = Self::orphan(rebaser, rel)?;
            actions.push(SyncAction::DeleteFile { dest });
        }
        for rel in &diff.delete_dirs {
            let dest = Self::orphan(rebaser, rel)?;
            actions.push(SyncAction::DeleteDir { dest });
        }
        for rel in &diff.create_dirs {
            let (source, dest) = Self::pair(rebaser, rel)?;
            actions.push(SyncAction::CreateDir { source, dest });
        }
        for rel in &diff.create_files {
            let (source, dest) = Self::pair(rebaser, rel)?;
            actions.push(SyncAction::CreateFile { source, dest });
        }
        for rel in &diff.modify_files {
            let (source, dest) = Self::pair(rebaser, rel)?;
            actions.push(SyncAction::ModifyFile { source, dest });
        }

        Ok(actions)
    }

    fn pair(rebaser: &PathRebaser, relative: &Path) -> Result<(PathBuf, PathBuf)> {
        let source = rebaser.source_path(relative);
        let dest = rebaser.to_replica(&source)?;
        Ok((source, dest))
    }

    fn orphan(rebaser: &PathRebaser, relative: &Path) -> Result<PathBuf> {
        let dest = rebaser.replica_path(relative);
        let source = rebaser.to_source(&dest)?;
        trace!(
            source = %source.display(),
            replica = %dest.display(),
            "no longer in source"
        );
        Ok(dest)
    }
}

impl Default for SyncActionResolver {
    fn default() -> Self {
        Self::new()
    }
}
