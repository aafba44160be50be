//! Delta computation between a source and a replica enumeration
//!
//! This module is read-only: it decides what has to change, never changes
//! anything. Both enumerations are keyed by tree-relative paths, so they
//! already share one namespace. Modification is detected by exact
//! timestamp inequality; content changes that keep the timestamp are not
//! seen.

mod directory;
mod timestamp;


pub use directory::{DiffEngine, TreeDiff};
pub use timestamp::TimestampComparator;
