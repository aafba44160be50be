use clap::Parser;
use std::path::PathBuf;

use mirrorsync_core::config::CliOverrides;

/// One-way directory mirroring
///
/// Keeps REPLICA identical to SOURCE, re-checking every INTERVAL seconds and
/// recording each change in an append-only log file
#[derive(Parser, Debug)]
#[command(name = "mirrorsync")]
#[command(about, long_about = None, version)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory to mirror from
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Directory to mirror into (created if missing)
    #[arg(value_name = "REPLICA")]
    pub replica: PathBuf,

    /// Seconds to wait after each cycle [default: 60]
    #[arg(value_name = "INTERVAL", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Action log file [default: mirrorsync.log]
    #[arg(value_name = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not echo log entries to stdout
    #[arg(short, long)]
    pub quiet: bool,

    /// Preview changes without executing (dry-run)
    #[arg(long)]
    pub dry_run: bool,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Use specific config file
    #[arg(long, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore all config files
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,
}

impl Cli {
    /// Command-line values to resolve against config files
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            source: self.source.clone(),
            replica: self.replica.clone(),
            interval: self.interval,
            log_file: self.log_file.clone(),
            dry_run: self.dry_run,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_all_positionals() {
        let cli = Cli::try_parse_from(["mirrorsync", "src", "dst", "30", "sync.log"]).unwrap();

        assert_eq!(cli.source, PathBuf::from("src"));
        assert_eq!(cli.replica, PathBuf::from("dst"));
        assert_eq!(cli.interval, Some(30));
        assert_eq!(cli.log_file, Some(PathBuf::from("sync.log")));
    }

    #[test]
    fn test_optional_positionals() {
        let cli = Cli::try_parse_from(["mirrorsync", "src", "dst"]).unwrap();

        assert_eq!(cli.interval, None);
        assert_eq!(cli.log_file, None);
        assert!(!cli.once);
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(Cli::try_parse_from(["mirrorsync", "src", "dst", "0"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from(["mirrorsync", "--dry-run", "-q", "src", "dst", "5"]).unwrap();
        let overrides = cli.overrides();

        assert!(overrides.dry_run);
        assert!(overrides.quiet);
        assert_eq!(overrides.interval, Some(5));
    }
}
