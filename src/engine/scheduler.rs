// src/engine/scheduler.rs

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, info, trace, warn};

use crate::engine::stop::StopController;
use crate::exec::{CommandSpec, Runner};
use crate::sink::RecordSink;

/// Where the scheduling loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Sleeping,
    Stopped,
}

/// Counters reported when the loop stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerSummary {
    /// Invocations started (and completed).
    pub runs: u64,
    /// Invocations whose `RunResult` carried a failure.
    pub failed_runs: u64,
    /// Invocations that took at least the full interval.
    pub overruns: u64,
}

/// Time left to sleep after a run, or `None` if the run used up the whole
/// interval.
///
/// Only the immediately preceding run is compensated for; drift does not
/// accumulate across runs.
pub fn remaining_sleep(interval: Duration, elapsed: Duration) -> Option<Duration> {
    interval.checked_sub(elapsed).filter(|d| !d.is_zero())
}

/// Drives a [`Runner`] at a fixed cadence until stopped.
pub struct IntervalScheduler<R: Runner> {
    spec: CommandSpec,
    runner: R,
    state: SchedulerState,
}

impl<R: Runner> std::fmt::Debug for IntervalScheduler<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntervalScheduler")
            .field("spec", &self.spec)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<R: Runner> IntervalScheduler<R> {
    pub fn new(spec: CommandSpec, runner: R) -> Self {
        Self {
            spec,
            runner,
            state: SchedulerState::Idle,
        }
    }

    pub fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Main scheduling loop. Returns only once `stop` is observed.
    ///
    /// - The stop flag is checked at the top of every iteration; once set,
    ///   no new process is launched.
    /// - A run in progress is always allowed to finish, so records it emits
    ///   still reach the sink.
    /// - The inter-run sleep wakes immediately on stop.
    pub async fn run(&mut self, sink: &dyn RecordSink, stop: &StopController) -> SchedulerSummary {
        let mut summary = SchedulerSummary::default();

        info!(
            command = %self.spec.command,
            interval = ?self.spec.interval,
            "scheduler started"
        );

        loop {
            if stop.is_stopped() {
                self.transition(SchedulerState::Stopped);
                break;
            }

            self.transition(SchedulerState::Running);
            let started = Instant::now();
            let result = self.runner.run_once(&self.spec, sink).await;
            let elapsed = started.elapsed();

            summary.runs += 1;
            if result.is_failure() {
                summary.failed_runs += 1;
            }

            self.transition(SchedulerState::Sleeping);
            match remaining_sleep(self.spec.interval, elapsed) {
                Some(remaining) => {
                    debug!(command = %self.spec.command, ?remaining, "sleeping until next run");
                    tokio::select! {
                        _ = sleep(remaining) => {}
                        _ = stop.stopped() => {
                            debug!(command = %self.spec.command, "sleep interrupted by stop");
                        }
                    }
                }
                None => {
                    summary.overruns += 1;
                    warn!(
                        command = %self.spec.command,
                        elapsed = ?elapsed,
                        interval = ?self.spec.interval,
                        "execution took longer than the interval; running again immediately"
                    );
                }
            }

            self.transition(SchedulerState::Idle);
        }

        info!(
            command = %self.spec.command,
            runs = summary.runs,
            failed_runs = summary.failed_runs,
            overruns = summary.overruns,
            "scheduler stopped"
        );
        summary
    }

    fn transition(&mut self, next: SchedulerState) {
        trace!(from = ?self.state, to = ?next, "scheduler state");
        self.state = next;
    }
}
