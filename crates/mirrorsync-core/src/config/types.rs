//! Configuration types and structures

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Interval used when neither the command line nor a config file sets one
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Log file used when neither the command line nor a config file sets one
pub const DEFAULT_LOG_FILE: &str = "mirrorsync.log";

/// Contents of a TOML config file; every key is optional
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Seconds to wait after a cycle finishes before starting the next
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,

    /// Path of the action log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// Report changes without applying them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,

    /// Do not mirror action log entries to stdout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiet: Option<bool>,
}

/// Values taken from the command line
///
/// Flags are `true` only when given; `false` defers to config files.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct CliOverrides {
    /// Source tree root
    pub source: PathBuf,
    /// Replica tree root
    pub replica: PathBuf,
    /// Interval in seconds, if given
    pub interval: Option<u64>,
    /// Log file path, if given
    pub log_file: Option<PathBuf>,
    /// `--dry-run`
    pub dry_run: bool,
    /// `--quiet`
    pub quiet: bool,
}

/// Fully resolved settings for a mirror run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Source tree root
    pub source: PathBuf,
    /// Replica tree root
    pub replica: PathBuf,
    /// Seconds between the end of one cycle and the start of the next
    pub interval_secs: u64,
    /// Path of the action log
    pub log_file: PathBuf,
    /// Report changes without applying them
    pub dry_run: bool,
    /// Do not mirror action log entries to stdout
    pub quiet: bool,
}

impl Settings {
    /// Wait between cycles
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}
