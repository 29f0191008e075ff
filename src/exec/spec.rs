// src/exec/spec.rs

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::errors::RunFailure;

/// What to run and how often. Immutable once built from config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Opaque command string, passed to the launcher shell as-is.
    pub command: String,
    /// Target time between the start of successive runs.
    pub interval: Duration,
    /// Surface stderr lines as info logs (otherwise drained and discarded).
    pub log_stderr: bool,
}

impl CommandSpec {
    pub fn new(command: impl Into<String>, interval: Duration) -> Self {
        Self {
            command: command.into(),
            interval,
            log_stderr: true,
        }
    }

    pub fn with_log_stderr(mut self, log_stderr: bool) -> Self {
        self.log_stderr = log_stderr;
        self
    }
}

/// Outcome of one invocation, consumed by the scheduler.
#[derive(Debug)]
pub struct RunResult {
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    /// `None` if the process never started, or was ended by a signal.
    pub exit_code: Option<i32>,
    pub records_emitted: usize,
    pub decode_failures: usize,
    pub failure: Option<RunFailure>,
}

impl RunResult {
    /// A result with nothing recorded yet; the runner fills it in.
    pub fn started(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            elapsed: Duration::ZERO,
            exit_code: None,
            records_emitted: 0,
            decode_failures: 0,
            failure: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none() && self.exit_code == Some(0)
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }

    /// Keep the first failure; later ones are only logged.
    pub(crate) fn record_failure(&mut self, failure: RunFailure) {
        if self.failure.is_none() {
            self.failure = Some(failure);
        }
    }
}
