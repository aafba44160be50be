//! Fixed-interval cycle driver
//!
//! Runs one reconciliation cycle, waits the configured interval, and
//! repeats until a stop is requested. The interval is measured from the end
//! of a cycle, so the effective period is cycle duration plus interval.
//! A stop request is honoured between cycles only; a running cycle always
//! completes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::error::Result;
use crate::journal::ActionLog;
use crate::sync::{SyncEngine, SyncReporter, SyncResult};

/// Longest single sleep while idle, bounding how late a stop is noticed
const POLL_SLICE: Duration = Duration::from_millis(100);

/// Cooperative stop flag shared between the scheduler and a signal handler
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    /// Create a signal that has not been raised
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the scheduler to stop at the next cycle boundary
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What the scheduler is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Waiting for the next cycle
    Idle,
    /// A cycle is in progress
    RunningCycle,
}

/// Drives reconciliation cycles forever, one at a time
pub struct Scheduler {
    engine: SyncEngine,
    log: ActionLog,
    interval: Duration,
    state: SchedulerState,
    cycles: u64,
}

impl Scheduler {
    /// Create a scheduler around an engine and its action log
    #[must_use]
    pub const fn new(engine: SyncEngine, log: ActionLog, interval: Duration) -> Self {
        Self {
            engine,
            log,
            interval,
            state: SchedulerState::Idle,
            cycles: 0,
        }
    }

    /// Build a scheduler for resolved settings, opening the action log
    ///
    /// # Errors
    ///
    /// Returns an error if the action log cannot be opened.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let log = ActionLog::open(&settings.log_file)?.with_echo(!settings.quiet);
        Ok(Self::new(
            SyncEngine::from_settings(settings),
            log,
            settings.interval(),
        ))
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    /// Number of cycles started so far
    #[must_use]
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run a single cycle and write its boundary marker
    ///
    /// A completed cycle ends with a `Successfully synced` entry, even if some
    /// individual actions failed (those carry their own `Failed` entries). A
    /// cycle aborted by an enumeration or log error ends with `Sync failed`.
    ///
    /// # Errors
    ///
    /// Returns the error that aborted the cycle.
    pub fn run_cycle(&mut self) -> Result<SyncResult> {
        self.state = SchedulerState::RunningCycle;
        self.cycles += 1;
        debug!(cycle = self.cycles, "cycle started");

        let outcome = self
            .engine
            .sync(&mut self.log)
            .and_then(|result| self.log.cycle_completed().map(|()| result));

        if outcome.is_err()
            && let Err(e) = self.log.cycle_failed()
        {
            warn!("could not record failed cycle: {e:#}");
        }

        self.state = SchedulerState::Idle;
        outcome
    }

    /// Run cycles until `stop` is raised, returning the number of cycles run
    ///
    /// A failed cycle is logged and retried after the normal interval.
    pub fn run(&mut self, stop: &StopSignal) -> u64 {
        info!(
            source = %self.engine.rebaser().source_root().display(),
            replica = %self.engine.rebaser().replica_root().display(),
            interval_secs = self.interval.as_secs(),
            "starting mirror scheduler"
        );

        let mut completed = 0;
        while !stop.is_stopped() {
            match self.run_cycle() {
                Ok(result) => {
                    debug!("{}", SyncReporter::generate_summary(&result));
                }
                Err(e) => {
                    error!("sync cycle failed, retrying in {:?}: {e:#}", self.interval);
                }
            }
            completed += 1;

            Self::idle(self.interval, stop);
        }

        info!(cycles = completed, "stop requested, scheduler exiting");
        completed
    }

    /// Sleep for `interval`, waking early if a stop is requested
    ///
    /// An interval too large to represent as a deadline waits until stopped.
    fn idle(interval: Duration, stop: &StopSignal) {
        let deadline = Instant::now().checked_add(interval);
        loop {
            if stop.is_stopped() {
                return;
            }
            let slice = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return;
                    }
                    POLL_SLICE.min(deadline - now)
                }
                None => POLL_SLICE,
            };
            thread::sleep(slice);
        }
    }
}
