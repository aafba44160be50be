//! Sync orchestration - runs one enumerate, diff, apply pass

use std::fs;

use anyhow::Context;
use tracing::debug;

use super::SyncResult;
use super::actions::{SyncAction, SyncActionResolver};
use super::executor::Reconciler;
use crate::comparison::DiffEngine;
use crate::config::Settings;
use crate::error::Result;
use crate::journal::ActionLog;
use crate::rebase::PathRebaser;
use crate::scanner::{Enumeration, Scanner};

/// Main sync engine
///
/// Holds only the roots and options; every enumeration and diff lives for
/// the duration of one [`SyncEngine::sync`] call.
pub struct SyncEngine {
    rebaser: PathRebaser,
    reconciler: Reconciler,
    dry_run: bool,
}

impl SyncEngine {
    /// Create a new sync engine
    #[must_use]
    pub const fn new(rebaser: PathRebaser, dry_run: bool) -> Self {
        Self {
            rebaser,
            reconciler: Reconciler::new(dry_run),
            dry_run,
        }
    }

    /// Create a sync engine for resolved settings
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            PathRebaser::new(&settings.source, &settings.replica),
            settings.dry_run,
        )
    }

    /// Roots this engine mirrors between
    #[must_use]
    pub const fn rebaser(&self) -> &PathRebaser {
        &self.rebaser
    }

    /// Compute the actions one cycle would apply, without applying them
    ///
    /// The replica root is created if missing (except in dry-run mode, where a
    /// missing replica counts as empty).
    ///
    /// # Errors
    ///
    /// Returns an error if either tree cannot be enumerated or the replica
    /// root cannot be created.
    pub fn plan(&self) -> Result<Vec<SyncAction>> {
        let source = Scanner::enumerate(self.rebaser.source_root())?;
        let replica = self.enumerate_replica()?;

        let diff = DiffEngine::compute(&source, &replica);
        debug!(
            source_entries = source.len(),
            replica_entries = replica.len(),
            changes = diff.change_count(),
            "computed tree diff"
        );

        SyncActionResolver::resolve(&diff, &self.rebaser)
    }

    /// Execute one reconciliation pass
    ///
    /// # Errors
    ///
    /// Returns an error if enumeration fails or the action log cannot be
    /// written. Failures of individual actions are reported in the result.
    pub fn sync(&self, log: &mut ActionLog) -> Result<SyncResult> {
        let actions = self.plan()?;
        self.reconciler.apply(&actions, log)
    }

    fn enumerate_replica(&self) -> Result<Enumeration> {
        let root = self.rebaser.replica_root();

        if !root.exists() {
            if self.dry_run {
                return Ok(Enumeration::default());
            }
            fs::create_dir_all(root)
                .with_context(|| format!("Failed to create replica root: {}", root.display()))?;
        }

        Scanner::enumerate(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnumerationError;
    use tempfile::TempDir;

    #[test]
    fn test_plan_on_missing_source() {
        let tmp = TempDir::new().unwrap();
        let engine = SyncEngine::new(
            PathRebaser::new(tmp.path().join("missing"), tmp.path().join("replica")),
            false,
        );

        let err = engine.plan().unwrap_err();

        assert!(err.downcast_ref::<EnumerationError>().is_some());
        assert!(!tmp.path().join("replica").exists());
    }

    #[test]
    fn test_plan_creates_replica_root() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("source")).unwrap();
        let engine = SyncEngine::new(
            PathRebaser::new(tmp.path().join("source"), tmp.path().join("nested/replica")),
            false,
        );

        let actions = engine.plan().unwrap();

        assert!(actions.is_empty());
        assert!(tmp.path().join("nested/replica").is_dir());
    }

    #[test]
    fn test_dry_run_plan_leaves_replica_root_absent() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("source")).unwrap();
        fs::write(tmp.path().join("source/a.txt"), "a").unwrap();
        let engine = SyncEngine::new(
            PathRebaser::new(tmp.path().join("source"), tmp.path().join("replica")),
            true,
        );

        let actions = engine.plan().unwrap();

        assert_eq!(actions.len(), 1);
        assert!(!tmp.path().join("replica").exists());
    }
}
