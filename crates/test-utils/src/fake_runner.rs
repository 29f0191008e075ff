use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;

use periodic_exec::errors::RunFailure;
use periodic_exec::exec::{CommandSpec, RunResult, Runner};
use periodic_exec::record::Record;
use periodic_exec::sink::RecordSink;

/// A fake runner that:
/// - records the (tokio) instant at which each run starts
/// - "runs" for a scripted duration using `tokio::time::sleep`, so paused-time
///   tests are deterministic
/// - appends one record per run (`message = "run <n>"`)
///
/// Durations are taken in order; the last one repeats.
pub struct FakeRunner {
    durations: Vec<Duration>,
    fail: bool,
    starts: Arc<Mutex<Vec<Instant>>>,
}

impl FakeRunner {
    pub fn new(durations: Vec<Duration>) -> Self {
        assert!(!durations.is_empty(), "FakeRunner needs at least one duration");
        Self {
            durations,
            fail: false,
            starts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every run reports a launch failure (after its scripted duration).
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Shared view of run start instants, usable after the runner has been
    /// moved into a scheduler.
    pub fn starts_handle(&self) -> Arc<Mutex<Vec<Instant>>> {
        Arc::clone(&self.starts)
    }

    fn duration_for(&self, run: usize) -> Duration {
        self.durations
            .get(run)
            .copied()
            .unwrap_or_else(|| *self.durations.last().unwrap())
    }
}

impl Runner for FakeRunner {
    fn run_once<'a>(
        &'a self,
        spec: &'a CommandSpec,
        sink: &'a dyn RecordSink,
    ) -> Pin<Box<dyn Future<Output = RunResult> + Send + 'a>> {
        Box::pin(async move {
            let run = {
                let mut starts = self.starts.lock().unwrap();
                starts.push(Instant::now());
                starts.len() - 1
            };

            let started = Instant::now();
            let mut result = RunResult::started(Utc::now());
            tokio::time::sleep(self.duration_for(run)).await;

            if self.fail {
                result.failure = Some(RunFailure::Launch {
                    command: spec.command.clone(),
                    source: io::Error::new(io::ErrorKind::NotFound, "fake launch failure"),
                });
            } else {
                sink.append(Record::with_message(format!("run {run}")));
                result.exit_code = Some(0);
                result.records_emitted = 1;
            }

            result.elapsed = started.elapsed();
            result
        })
    }
}
