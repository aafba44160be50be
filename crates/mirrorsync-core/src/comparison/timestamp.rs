//! File timestamp reading and comparison

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use anyhow::Context;

use crate::error::Result;

/// Timestamp comparator
pub struct TimestampComparator;

impl TimestampComparator {
    /// Create a new timestamp comparator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Whether two modification times count as a change
    ///
    /// Exact inequality, with no tolerance window.
    #[must_use]
    pub fn differs(source: SystemTime, replica: SystemTime) -> bool {
        source != replica
    }

    /// Get the modification time of a file
    ///
    /// # Errors
    ///
    /// Returns an error if file metadata cannot be read.
    pub fn get_modified_time(path: &Path) -> Result<SystemTime> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to read metadata for: {}", path.display()))?;

        metadata
            .modified()
            .with_context(|| format!("Failed to get modification time for: {}", path.display()))
    }
}

impl Default for TimestampComparator {
    fn default() -> Self {
        Self::new()
    }
}
