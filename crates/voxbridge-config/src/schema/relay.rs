use serde::{Deserialize, Serialize};

/// Broadcast relay of world snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Channel snapshots are published on.
    pub channel: String,
    /// `type` tag on relayed messages.
    pub message_type: String,
    /// Per-channel buffer; slower subscribers skip messages past this.
    pub capacity: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            channel: "minecraft-global".into(),
            message_type: "minecraft-update".into(),
            capacity: 256,
        }
    }
}
