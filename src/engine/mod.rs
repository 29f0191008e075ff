// src/engine/mod.rs

//! Scheduling engine.
//!
//! - [`stop`]: the shared cooperative stop flag.
//! - [`scheduler`]: the interval loop that repeatedly invokes a
//!   [`Runner`](crate::exec::Runner), compensates for run time and sleeps
//!   interruptibly.

pub mod scheduler;
pub mod stop;

pub use scheduler::{IntervalScheduler, SchedulerState, SchedulerSummary, remaining_sleep};
pub use stop::StopController;
