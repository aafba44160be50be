//! Configuration merging with precedence rules
//!
//! Precedence order (highest to lowest):
//! 1. Command-line values
//! 2. Config file given with `--config`
//! 3. Project config (`.mirrorsync.toml`)
//! 4. Global config
//! 5. Built-in defaults
//!
//! Every key is an `Option`, so a higher-precedence source only overrides
//! what it actually sets.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::discovery::ConfigFiles;
use super::types::{CliOverrides, DEFAULT_INTERVAL_SECS, DEFAULT_LOG_FILE, FileConfig, Settings};
use crate::error::Result;

/// Configuration merger
pub struct ConfigMerger;

impl ConfigMerger {
    /// Create a new config merger
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Merge all discovered config files
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be read or parsed.
    pub fn merge(files: &ConfigFiles) -> Result<FileConfig> {
        let mut merged = FileConfig::default();

        // Load and merge in reverse precedence order (lowest to highest)
        for path in [&files.global, &files.project, &files.cli]
            .into_iter()
            .flatten()
        {
            Self::merge_into(&mut merged, path)?;
        }

        Ok(merged)
    }

    /// Load and merge a single config file into the existing config
    fn merge_into(base: &mut FileConfig, path: &Path) -> Result<()> {
        let config = Self::load(path)?;

        if config.interval.is_some() {
            base.interval = config.interval;
        }
        if config.log_file.is_some() {
            base.log_file = config.log_file;
        }
        if config.dry_run.is_some() {
            base.dry_run = config.dry_run;
        }
        if config.quiet.is_some() {
            base.quiet = config.quiet;
        }

        Ok(())
    }

    /// Parse one config file
    ///
    /// A relative `log_file` is taken relative to the directory holding the
    /// config file, not the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<FileConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let Some(log_file) = &config.log_file
            && log_file.is_relative()
            && let Some(dir) = path.parent()
        {
            let resolved = dir.join(log_file);
            config.log_file = Some(resolved);
        }

        Ok(config)
    }

    /// Combine command-line values with merged file values and defaults
    #[must_use]
    pub fn resolve(cli: CliOverrides, file: FileConfig) -> Settings {
        Settings {
            source: cli.source,
            replica: cli.replica,
            interval_secs: cli
                .interval
                .or(file.interval)
                .unwrap_or(DEFAULT_INTERVAL_SECS),
            log_file: cli
                .log_file
                .or(file.log_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            dry_run: cli.dry_run || file.dry_run.unwrap_or(false),
            quiet: cli.quiet || file.quiet.unwrap_or(false),
        }
    }
}

impl Default for ConfigMerger {
    fn default() -> Self {
        Self::new()
    }
}
