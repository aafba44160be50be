//! Reconciler: applies sync actions to the replica

use std::fs;
use std::io;
use std::path::Path;

use anyhow::Context;
use filetime::FileTime;
use tracing::{debug, info, warn};

use super::SyncResult;
use super::actions::SyncAction;
use crate::comparison::TimestampComparator;
use crate::error::Result;
use crate::journal::ActionLog;

/// Applies actions one by one, recording each outcome in the action log
pub struct Reconciler {
    dry_run: bool,
}

impl Reconciler {
    /// Create a new reconciler
    #[must_use]
    pub const fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Apply every action in order
    ///
    /// A failing action is logged as failed and does not stop the remaining
    /// ones; the next cycle will see it as pending again. In dry-run mode
    /// nothing is touched and nothing is written to the log.
    ///
    /// # Errors
    ///
    /// Returns an error only if the action log cannot be written.
    pub fn apply(&self, actions: &[SyncAction], log: &mut ActionLog) -> Result<SyncResult> {
        let mut result = SyncResult::default();

        for action in actions {
            if self.dry_run {
                info!(
                    kind = ?action.kind(),
                    replica = %action.replica().display(),
                    "[DRY RUN] would apply"
                );
                result.count(action.kind());
                continue;
            }

            match Self::execute(action) {
                Ok(()) => {
                    log.record(action)?;
                    result.count(action.kind());
                }
                Err(e) => {
                    warn!(
                        kind = ?action.kind(),
                        replica = %action.replica().display(),
                        "action failed: {e:#}"
                    );
                    log.record_failure(action)?;
                    result.failed += 1;
                    result.errors.push(format!("{e:#}"));
                }
            }
        }

        Ok(result)
    }

    /// Execute a single action against the filesystem
    ///
    /// Deleting something that is already gone succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if file operations fail.
    pub fn execute(action: &SyncAction) -> Result<()> {
        match action {
            SyncAction::CreateDir { dest, .. } => fs::create_dir_all(dest)
                .with_context(|| format!("Failed to create directory: {}", dest.display())),
            SyncAction::CreateFile { source, dest } | SyncAction::ModifyFile { source, dest } => {
                Self::copy_file(source, dest)
            }
            SyncAction::DeleteDir { dest } => Self::remove(dest, |p| fs::remove_dir_all(p)),
            SyncAction::DeleteFile { dest } => Self::remove(dest, |p| fs::remove_file(p)),
        }
    }

    /// Copy a file and stamp the copy with the source's modification time
    fn copy_file(source: &Path, dest: &Path) -> Result<()> {
        // Read before copying: if the source changes mid-copy the next cycle sees a mismatch
        let modified = FileTime::from_system_time(TimestampComparator::get_modified_time(source)?);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::copy(source, dest).with_context(|| {
            format!("Failed to copy {} to {}", source.display(), dest.display())
        })?;

        filetime::set_file_mtime(dest, modified).with_context(|| {
            format!("Failed to set modification time on: {}", dest.display())
        })?;

        Ok(())
    }

    fn remove(path: &Path, op: fn(&Path) -> io::Result<()>) -> Result<()> {
        match op(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "already absent");
                Ok(())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to remove: {}", path.display())),
        }
    }
}
