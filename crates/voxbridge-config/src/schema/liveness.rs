//! Heartbeat expiry settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LivenessConfig {
    /// How often the sweeper runs.
    pub sweep_interval_secs: u64,
    /// Silence after which a connected participant is marked disconnected.
    pub heartbeat_timeout_secs: u64,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: 5,
            heartbeat_timeout_secs: 20,
        }
    }
}

impl LivenessConfig {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn heartbeat_timeout(&self) -> Duration {
        Duration::from_secs(self.heartbeat_timeout_secs)
    }
}
