//! Periodic liveness sweep task.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::engine::PresenceEngine;

/// Owns the running sweep task. Dropping the handle leaves the task running;
/// call [`SweeperHandle::shutdown`] to stop it.
pub struct SweeperHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the sweep loop and wait for the task to exit.
    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Liveness sweeper exited abnormally");
        }
    }
}

impl PresenceEngine {
    /// Spawn the sweep loop on the current runtime: every `interval`, flip
    /// participants whose last heartbeat is older than `timeout`.
    pub fn spawn_sweeper(&self, interval: Duration, timeout: Duration) -> SweeperHandle {
        let token = CancellationToken::new();
        let engine = self.clone();
        let cancelled = token.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        let flipped = engine.sweep(timeout).await;
                        tracing::debug!(flipped, "Sweeper tick");
                    }
                }
            }
            tracing::debug!("Liveness sweeper stopped");
        });

        tracing::info!(
            interval_secs = interval.as_secs(),
            timeout_secs = timeout.as_secs(),
            "Liveness sweeper started"
        );

        SweeperHandle { token, task }
    }
}
