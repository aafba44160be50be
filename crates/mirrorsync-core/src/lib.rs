//! # mirrorsync-core
//!
//! Reconciliation engine for one-way directory mirroring.
//!
//! Each cycle enumerates a source tree and a replica tree, computes the
//! create/delete/modify delta between them, applies it to the replica and
//! records every applied action in an append-only action log. The source is
//! always authoritative; modification is detected by timestamp inequality only.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Core error types for the mirrorsync library
pub mod error;

/// Directory tree enumeration
pub mod scanner;

/// Source/replica path rebasing
pub mod rebase;

/// Delta computation between two enumerations
pub mod comparison;

/// Reconciliation: applying the delta to the replica
pub mod sync;

/// Append-only action log
pub mod journal;

/// Fixed-interval cycle driver
pub mod scheduler;

/// Configuration discovery, resolution and validation
pub mod config;

pub use comparison::{DiffEngine, TreeDiff};
pub use config::{ConfigManager, Settings};
pub use journal::{ActionLabel, ActionLog};
pub use rebase::PathRebaser;
pub use scanner::{Enumeration, Scanner};
pub use scheduler::{Scheduler, StopSignal};
pub use sync::{SyncAction, SyncEngine, SyncResult};
