mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use mirrorsync_core::config::ConfigManager;
use mirrorsync_core::sync::SyncReporter;
use mirrorsync_core::{Scheduler, StopSignal};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    info!("Starting mirrorsync v{}", env!("CARGO_PKG_VERSION"));

    let settings = ConfigManager::load(cli.overrides(), cli.config.as_deref(), cli.no_config)
        .context("Failed to load configuration")?;

    let mut scheduler =
        Scheduler::from_settings(&settings).context("Failed to start scheduler")?;

    if cli.once {
        let result = scheduler.run_cycle().context("Sync cycle failed")?;
        if cli.verbose || settings.dry_run {
            eprintln!("{}", SyncReporter::generate_summary(&result));
        }
        if !result.is_success() {
            anyhow::bail!("{} action(s) failed", result.failed);
        }
        return Ok(());
    }

    // Stop at the next cycle boundary on Ctrl+C
    let stop = StopSignal::new();
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupted, stopping after the current cycle...");
        handler_stop.request_stop();
    })
    .context("Failed to set Ctrl+C handler")?;

    scheduler.run(&stop);

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
