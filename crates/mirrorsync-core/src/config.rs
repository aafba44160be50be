//! Configuration discovery, parsing, resolution and validation
//!
//! This module handles:
//! - Config file discovery (explicit path, project file, XDG global)
//! - TOML parsing with serde
//! - Merging file values with command-line values and defaults
//! - Validation of the resolved settings

mod discovery;
mod merge;
mod types;
mod validation;

#[cfg(test)]
mod integration_tests;

use std::path::Path;

use tracing::debug;

pub use discovery::{ConfigDiscovery, ConfigFiles, PROJECT_CONFIG_NAME};
pub use merge::ConfigMerger;
pub use types::{CliOverrides, DEFAULT_INTERVAL_SECS, DEFAULT_LOG_FILE, FileConfig, Settings};
pub use validation::ConfigValidator;

use crate::error::Result;

/// Configuration manager that coordinates discovery, parsing, merging, and validation
pub struct ConfigManager;

impl ConfigManager {
    /// Create a new configuration manager
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolve settings from command-line values and config files
    ///
    /// With `no_config` set, no config file is read at all.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is invalid or the resulting settings
    /// fail validation.
    pub fn load(
        cli: CliOverrides,
        cli_config_path: Option<&Path>,
        no_config: bool,
    ) -> Result<Settings> {
        let files = if no_config {
            ConfigFiles::default()
        } else {
            ConfigDiscovery::discover(cli_config_path)
        };
        debug!(?files, "config files");

        let file_config = ConfigMerger::merge(&files)?;
        let settings = ConfigMerger::resolve(cli, file_config);

        ConfigValidator::validate(&settings)?;

        Ok(settings)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
