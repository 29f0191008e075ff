#![allow(dead_code)]

pub use periodic_exec_test_utils::builders::{ConfigFileBuilder, command_spec};
pub use periodic_exec_test_utils::fake_runner::FakeRunner;
pub use periodic_exec_test_utils::log_capture::LogCapture;
pub use periodic_exec_test_utils::memory_sink::MemorySink;
pub use periodic_exec_test_utils::{init_tracing, with_timeout};

use std::time::Duration;

/// Poll `cond` every 10ms until it holds, panicking after `limit`.
pub async fn wait_until(limit: Duration, mut cond: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + limit;
    while !cond() {
        if tokio::time::Instant::now() >= deadline {
            panic!("condition not met within {limit:?}");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
