// src/input.rs

//! Host-facing lifecycle: `register`, `run`, `stop`.

use tracing::info;

use crate::config::{ConfigFile, ExecSettings};
use crate::engine::{IntervalScheduler, SchedulerSummary, StopController};
use crate::errors::{ExecError, Result};
use crate::exec::{ExecContext, ProcessRunner, RunResult, Runner, resolve_host};
use crate::sink::RecordSink;

/// A periodically executed command, as seen by the owning pipeline.
#[derive(Debug)]
pub struct ExecInput {
    settings: ExecSettings,
    spec: crate::exec::CommandSpec,
    stop: StopController,
    scheduler: Option<IntervalScheduler<ProcessRunner>>,
}

impl ExecInput {
    pub fn new(config: ConfigFile) -> Self {
        Self {
            spec: config.command_spec(),
            settings: config.exec,
            stop: StopController::new(),
            scheduler: None,
        }
    }

    /// One-time setup: resolve the host name and build the runner.
    ///
    /// Calling it again rebuilds the runner with a freshly resolved host.
    pub fn register(&mut self) -> Result<()> {
        let host = resolve_host(self.settings.host.as_deref());
        let ctx = ExecContext::new(
            host.clone(),
            self.settings.shell.clone(),
            self.settings.decoder.build(),
        );

        info!(
            command = %self.spec.command,
            interval = ?self.spec.interval,
            decoder = %self.settings.decoder,
            host = %host,
            "exec input registered"
        );

        self.scheduler = Some(IntervalScheduler::new(
            self.spec.clone(),
            ProcessRunner::new(ctx),
        ));
        Ok(())
    }

    /// Enter the scheduling loop. Returns after [`stop`](Self::stop).
    pub async fn run(&mut self, sink: &dyn RecordSink) -> Result<SchedulerSummary> {
        let scheduler = self.scheduler.as_mut().ok_or(ExecError::NotRegistered)?;
        Ok(scheduler.run(sink, &self.stop).await)
    }

    /// Execute the command a single time, outside the scheduling loop.
    pub async fn run_once(&self, sink: &dyn RecordSink) -> Result<RunResult> {
        let scheduler = self.scheduler.as_ref().ok_or(ExecError::NotRegistered)?;
        Ok(scheduler.runner().run_once(scheduler.spec(), sink).await)
    }

    pub fn stop(&self) {
        self.stop.signal_stop();
    }

    /// A handle that can stop this input from another task.
    pub fn stop_handle(&self) -> StopController {
        self.stop.clone()
    }

    pub fn settings(&self) -> &ExecSettings {
        &self.settings
    }

    /// Host stamped on records, once registered.
    pub fn host(&self) -> Option<&str> {
        self.scheduler
            .as_ref()
            .map(|s| s.runner().context().host.as_str())
    }
}
