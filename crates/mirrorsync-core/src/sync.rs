//! One-way mirror reconciliation
//!
//! Turns the delta between source and replica into actions and applies
//! them to the replica, recording each one in the action log. The source
//! always wins.

mod actions;
mod executor;
mod orchestrator;
mod reporting;

pub use actions::{ActionKind, SyncAction, SyncActionResolver};
pub use executor::Reconciler;
pub use orchestrator::SyncEngine;
pub use reporting::SyncReporter;

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct SyncResult {
    /// Directories and files created
    pub created: usize,
    /// Files overwritten
    pub modified: usize,
    /// Directories and files deleted, including ones already gone
    pub deleted: usize,
    /// Actions that could not be applied
    pub failed: usize,
    /// Errors encountered
    pub errors: Vec<String>,
}

impl SyncResult {
    /// Total operations performed
    #[must_use]
    pub const fn total_operations(&self) -> usize {
        self.created + self.modified + self.deleted
    }

    /// Whether sync was successful (no errors)
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Count one applied action of the given kind
    pub(crate) fn count(&mut self, kind: ActionKind) {
        match kind {
            ActionKind::CreateDir | ActionKind::CreateFile => self.created += 1,
            ActionKind::DeleteDir | ActionKind::DeleteFile => self.deleted += 1,
            ActionKind::ModifyFile => self.modified += 1,
        }
    }
}
