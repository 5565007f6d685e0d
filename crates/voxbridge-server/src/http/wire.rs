//! JSON bodies of the HTTP ingress, in the field names game and voice
//! clients already send.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use voxbridge_core::UnifiedStatus;

/// Accept any JSON value for an identifier, keeping it only if it is a
/// string. Anything else is treated as missing.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => Some(id),
        _ => None,
    })
}

/// Accept any JSON value for a flag. Only a boolean counts; anything else
/// reads as unset.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool())
}

/// Accept any JSON value for a roster. An array keeps its string entries;
/// anything else is treated as no roster at all.
fn lenient_roster<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(entries) => Some(
            entries
                .into_iter()
                .filter_map(|entry| match entry {
                    Value::String(name) => Some(name),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// `POST /voice-status`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceStatusReport {
    #[serde(default, deserialize_with = "lenient_id")]
    pub gamertag: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_talking: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_muted: Option<bool>,
}

/// `POST /heartbeat`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatReport {
    #[serde(default, deserialize_with = "lenient_id")]
    pub gamertag: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub in_voice: Option<bool>,
}

/// `POST /minecraft-data`
#[derive(Debug, Deserialize)]
pub struct WorldReport {
    /// Player positions, relayed as-is.
    #[serde(default)]
    pub data: Value,
    /// World-side settings, relayed as-is.
    #[serde(default)]
    pub config: Value,
    /// Explicit roster. Non-string entries are dropped.
    #[serde(default, deserialize_with = "lenient_roster")]
    pub players: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceStatesResponse {
    pub success: bool,
    pub voice_states: Vec<UnifiedStatus>,
}

impl VoiceStatesResponse {
    pub fn new(voice_states: Vec<UnifiedStatus>) -> Self {
        Self {
            success: true,
            voice_states,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub rostered: usize,
    pub participants: usize,
    pub connected: usize,
}
