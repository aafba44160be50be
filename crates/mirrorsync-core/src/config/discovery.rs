//! Configuration file discovery from multiple locations

use std::path::{Path, PathBuf};

/// Name of the project config file looked up from the working directory upwards
pub const PROJECT_CONFIG_NAME: &str = ".mirrorsync.toml";

/// Configuration file locations in order of precedence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFiles {
    /// Config from CLI flag (highest precedence)
    pub cli: Option<PathBuf>,
    /// Project config (.mirrorsync.toml)
    pub project: Option<PathBuf>,
    /// Global XDG config
    pub global: Option<PathBuf>,
}

/// Config file discovery
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Create a new config discovery instance
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Discover all available configuration files
    ///
    /// An explicit CLI path is returned as given, even if it does not exist,
    /// so that loading it reports the problem.
    #[must_use]
    pub fn discover(cli_path: Option<&Path>) -> ConfigFiles {
        ConfigFiles {
            cli: cli_path.map(Path::to_path_buf),
            project: Self::find_file(PROJECT_CONFIG_NAME),
            global: Self::find_global_config(),
        }
    }

    /// Find a config file in the current directory or parent directories
    fn find_file(name: &str) -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }

            // Move to parent directory
            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Find global config in XDG config directory
    fn find_global_config() -> Option<PathBuf> {
        let config_dir = dirs::config_dir()?;
        let global_config = config_dir.join("mirrorsync").join("config.toml");

        global_config.is_file().then_some(global_config)
    }
}

impl Default for ConfigDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_without_cli_config() {
        let files = ConfigDiscovery::discover(None);

        assert!(files.cli.is_none());
        // project and global may or may not exist depending on test environment
    }

    #[test]
    fn test_discover_cli_config() {
        let tmp = TempDir::new().unwrap();
        let cli_config = tmp.path().join("custom.toml");
        std::fs::write(&cli_config, "# config").unwrap();

        let files = ConfigDiscovery::discover(Some(&cli_config));

        assert_eq!(files.cli, Some(cli_config));
    }

    #[test]
    fn test_discover_cli_config_nonexistent_is_kept() {
        let tmp = TempDir::new().unwrap();
        let cli_config = tmp.path().join("nonexistent.toml");

        let files = ConfigDiscovery::discover(Some(&cli_config));

        assert_eq!(files.cli, Some(cli_config));
    }
}
