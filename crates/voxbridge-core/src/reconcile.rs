//! Merge of roster, voice state, and connection state.

use serde::{Deserialize, Serialize};

use crate::key::normalize;
use crate::liveness::ConnectionLivenessStore;
use crate::voice::VoiceStateStore;

/// Per-player status returned to the world process.
///
/// `display_name` is serialized as `gamertag`, the field name game clients
/// key players by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedStatus {
    #[serde(rename = "gamertag")]
    pub display_name: String,
    pub is_talking: bool,
    pub is_muted: bool,
    pub is_disconnected: bool,
}

/// One status per roster entry, in roster order. Display casing comes from
/// the roster; lookups go through the normalized key.
pub fn reconcile(
    roster: &[String],
    voice: &VoiceStateStore,
    liveness: &ConnectionLivenessStore,
) -> Vec<UnifiedStatus> {
    roster
        .iter()
        .map(|display_name| {
            let key = normalize(display_name);
            let state = voice.state_for(&key);
            UnifiedStatus {
                display_name: display_name.clone(),
                is_talking: state.is_talking,
                is_muted: state.is_muted,
                is_disconnected: !liveness.is_connected(&key),
            }
        })
        .collect()
}
