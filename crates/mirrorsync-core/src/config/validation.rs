//! Configuration validation and error reporting

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::warn;

use super::types::Settings;
use crate::error::Result;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Create a new config validator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validate resolved settings
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid.
    pub fn validate(settings: &Settings) -> Result<()> {
        if settings.interval_secs == 0 {
            anyhow::bail!("Sync interval must be a positive number of seconds");
        }

        if !settings.source.is_dir() {
            anyhow::bail!(
                "Source directory does not exist or is not a directory: {}",
                settings.source.display()
            );
        }

        if settings.replica.exists() && !settings.replica.is_dir() {
            anyhow::bail!(
                "Replica path exists but is not a directory: {}",
                settings.replica.display()
            );
        }

        let source = Self::normalize(&settings.source)?;
        let replica = Self::normalize(&settings.replica)?;
        let log_file = Self::normalize(&settings.log_file)?;

        if source == replica {
            anyhow::bail!(
                "Source and replica are the same directory: {}",
                source.display()
            );
        }

        if replica.starts_with(&source) {
            anyhow::bail!(
                "Replica {} is inside source {}",
                replica.display(),
                source.display()
            );
        }

        if source.starts_with(&replica) {
            anyhow::bail!(
                "Source {} is inside replica {}",
                source.display(),
                replica.display()
            );
        }

        if log_file.starts_with(&replica) {
            anyhow::bail!(
                "Log file {} is inside replica {} and would be deleted by mirroring",
                log_file.display(),
                replica.display()
            );
        }

        if log_file.starts_with(&source) {
            warn!(
                log_file = %log_file.display(),
                "log file is inside the source tree and will be copied every cycle"
            );
        }

        Ok(())
    }

    /// Absolute, symlink-resolved form of a path that may not exist yet
    ///
    /// The longest existing ancestor is canonicalized and the missing tail
    /// appended to it.
    fn normalize(path: &Path) -> Result<PathBuf> {
        let absolute = std::path::absolute(path)
            .with_context(|| format!("Failed to resolve path: {}", path.display()))?;

        let mut existing = absolute.as_path();
        let mut tail = Vec::new();
        while !existing.exists() {
            match (existing.parent(), existing.file_name()) {
                (Some(parent), Some(name)) => {
                    tail.push(name.to_os_string());
                    existing = parent;
                }
                _ => break,
            }
        }

        let mut normalized = dunce::canonicalize(existing)
            .with_context(|| format!("Failed to canonicalize: {}", existing.display()))?;
        normalized.extend(tail.iter().rev());

        Ok(normalized)
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
