// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`spec`] holds the per-run inputs and outputs (`CommandSpec`, `RunResult`).
//! - [`context`] holds the per-input collaborators (host, shell, decoder).
//! - [`drain`] contains the stdout/stderr drain loops.
//! - [`runner`] owns one subprocess lifecycle via `tokio::process::Command`.
//!
//! The scheduler talks to a [`Runner`] rather than to `ProcessRunner`
//! directly, so tests can swap in a fake that never spawns processes.

use std::future::Future;
use std::pin::Pin;

pub mod context;
pub mod drain;
pub mod runner;
pub mod spec;

pub use context::{ExecContext, default_shell, resolve_host};
pub use runner::ProcessRunner;
pub use spec::{CommandSpec, RunResult};

use crate::sink::RecordSink;

/// Trait abstracting how a single invocation is executed.
pub trait Runner: Send + Sync {
    /// Execute `spec.command` once, emitting records into `sink`.
    ///
    /// Implementations must not fail: problems are reported through
    /// [`RunResult::failure`].
    fn run_once<'a>(
        &'a self,
        spec: &'a CommandSpec,
        sink: &'a dyn RecordSink,
    ) -> Pin<Box<dyn Future<Output = RunResult> + Send + 'a>>;
}

impl Runner for ProcessRunner {
    fn run_once<'a>(
        &'a self,
        spec: &'a CommandSpec,
        sink: &'a dyn RecordSink,
    ) -> Pin<Box<dyn Future<Output = RunResult> + Send + 'a>> {
        Box::pin(self.execute(spec, sink))
    }
}
