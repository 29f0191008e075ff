// src/engine/stop.rs

use tokio_util::sync::CancellationToken;
use tracing::info;

/// Shared, cooperative stop flag.
///
/// Clones observe the same state. Polling is a single atomic load, and
/// [`stopped`](Self::stopped) wakes every waiter as soon as
/// [`signal_stop`](Self::signal_stop) is called.
#[derive(Debug, Clone, Default)]
pub struct StopController {
    token: CancellationToken,
}

impl StopController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop. Safe to call any number of times, from anywhere.
    pub fn signal_stop(&self) {
        if !self.token.is_cancelled() {
            info!("stop requested");
        }
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once a stop has been signalled (immediately if it already was).
    pub async fn stopped(&self) {
        self.token.cancelled().await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn starts_running_and_stop_is_idempotent() {
        let stop = StopController::new();
        assert!(!stop.is_stopped());
        stop.signal_stop();
        stop.signal_stop();
        assert!(stop.is_stopped());
    }

    #[test]
    fn clones_share_state() {
        let stop = StopController::new();
        let handle = stop.clone();
        handle.signal_stop();
        assert!(stop.is_stopped());
    }

    #[tokio::test]
    async fn waiters_wake_promptly() {
        let stop = StopController::new();
        let waiter = {
            let stop = stop.clone();
            tokio::spawn(async move { stop.stopped().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        stop.signal_stop();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter did not wake")
            .unwrap();
    }

    #[tokio::test]
    async fn stopped_resolves_immediately_after_signal() {
        let stop = StopController::new();
        stop.signal_stop();
        tokio::time::timeout(Duration::from_millis(50), stop.stopped())
            .await
            .expect("already-stopped controller should resolve at once");
    }
}
