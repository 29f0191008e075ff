// src/exec/runner.rs

//! One subprocess lifecycle: launch, drain, wait, release.

use std::backtrace::Backtrace;
use std::process::Stdio;

use chrono::Utc;
use tokio::process::Command;
use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::errors::{RunFailure, StreamKind};
use crate::exec::context::{ExecContext, default_shell};
use crate::exec::drain::{DrainReport, drain_stderr, drain_stdout};
use crate::exec::spec::{CommandSpec, RunResult};
use crate::record::EventContext;
use crate::sink::RecordSink;

/// Shell exit status for "command not found".
const EXIT_NOT_FOUND: i32 = 127;
/// Shell exit status for "found but not executable".
const EXIT_NOT_EXECUTABLE: i32 = 126;

/// Runs the configured command through the launcher shell.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    ctx: ExecContext,
}

impl ProcessRunner {
    pub fn new(ctx: ExecContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &ExecContext {
        &self.ctx
    }

    /// Run the command once and report what happened.
    ///
    /// Never returns an error: launch, stream and wait problems are logged
    /// and folded into [`RunResult::failure`]. All pipe and process handles
    /// are owned by this future and released when it completes; if the
    /// future is dropped mid-run the child is killed (`kill_on_drop`).
    pub async fn execute(&self, spec: &CommandSpec, sink: &dyn RecordSink) -> RunResult {
        let started = Instant::now();
        let mut result = RunResult::started(Utc::now());

        let mut child = match self.build_command(&spec.command).spawn() {
            Ok(child) => child,
            Err(source) => {
                let failure = RunFailure::Launch {
                    command: spec.command.clone(),
                    source,
                };
                log_failure(&spec.command, &failure);
                result.record_failure(failure);
                result.elapsed = started.elapsed();
                return result;
            }
        };

        info!(command = %spec.command, pid = ?child.id(), "command started");

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let events = EventContext::new(self.ctx.host.clone(), spec.command.clone());

        let stdout_drain = async {
            match stdout {
                Some(out) => drain_stdout(out, &events, self.ctx.decoder.as_ref(), sink).await,
                None => DrainReport::default(),
            }
        };
        let stderr_drain = async {
            match stderr {
                Some(err) => drain_stderr(err, &spec.command, spec.log_stderr).await,
                None => DrainReport::default(),
            }
        };

        // The invocation is complete only once the process has exited AND
        // both pipes reached end-of-stream.
        let (status, out_report, err_report) = tokio::join!(child.wait(), stdout_drain, stderr_drain);

        result.records_emitted = out_report.records;
        result.decode_failures = out_report.decode_failures;

        for (stream, report) in [(StreamKind::Stdout, out_report), (StreamKind::Stderr, err_report)] {
            if let Some(source) = report.error {
                let failure = RunFailure::Stream {
                    command: spec.command.clone(),
                    stream,
                    source,
                };
                log_failure(&spec.command, &failure);
                result.record_failure(failure);
            }
        }

        match status {
            Ok(status) => {
                result.exit_code = status.code();
                if let Some(failure) = classify_exit(&spec.command, status.code()) {
                    log_failure(&spec.command, &failure);
                    result.record_failure(failure);
                } else if !status.success() {
                    warn!(
                        command = %spec.command,
                        exit_code = ?status.code(),
                        "command exited unsuccessfully"
                    );
                }
            }
            Err(source) => {
                let failure = RunFailure::Wait {
                    command: spec.command.clone(),
                    source,
                };
                log_failure(&spec.command, &failure);
                result.record_failure(failure);
            }
        }

        result.elapsed = started.elapsed();

        info!(
            command = %spec.command,
            elapsed = ?result.elapsed,
            exit_code = ?result.exit_code,
            records = result.records_emitted,
            "command completed"
        );

        result
    }

    fn build_command(&self, command: &str) -> Command {
        let shell = if self.ctx.shell.is_empty() {
            default_shell()
        } else {
            self.ctx.shell.clone()
        };

        let mut cmd = Command::new(&shell[0]);
        cmd.args(&shell[1..])
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

/// Map the shell's reserved exit statuses to failures.
fn classify_exit(command: &str, code: Option<i32>) -> Option<RunFailure> {
    match code {
        Some(EXIT_NOT_FOUND) => Some(RunFailure::CommandNotFound {
            command: command.to_string(),
        }),
        Some(EXIT_NOT_EXECUTABLE) => Some(RunFailure::NotExecutable {
            command: command.to_string(),
        }),
        _ => None,
    }
}

fn log_failure(command: &str, failure: &RunFailure) {
    error!(
        command,
        error = %failure,
        diagnostic = ?failure,
        backtrace = %Backtrace::capture(),
        "command run failed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_exit_codes_are_failures() {
        assert!(matches!(
            classify_exit("x", Some(127)),
            Some(RunFailure::CommandNotFound { .. })
        ));
        assert!(matches!(
            classify_exit("x", Some(126)),
            Some(RunFailure::NotExecutable { .. })
        ));
        assert!(classify_exit("x", Some(1)).is_none());
        assert!(classify_exit("x", Some(0)).is_none());
        assert!(classify_exit("x", None).is_none());
    }
}
