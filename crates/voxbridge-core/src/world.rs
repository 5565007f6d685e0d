//! Latest world snapshot reported by the game.

use serde::Serialize;
use serde_json::Value;
use voxbridge_common::PublishError;

/// One full world report: who is present, plus the positions and config
/// blobs that are relayed to subscribers untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldSnapshot {
    roster: Vec<String>,
    positions: Value,
    config: Value,
}

/// Wire form of a snapshot on the broadcast channel.
#[derive(Debug, Serialize)]
struct RelayEnvelope<'a> {
    #[serde(rename = "type")]
    message_type: &'a str,
    #[serde(skip_serializing_if = "is_null")]
    data: &'a Value,
    #[serde(skip_serializing_if = "is_null")]
    config: &'a Value,
}

impl WorldSnapshot {
    pub fn new(roster: Vec<String>, positions: Value, config: Value) -> Self {
        Self {
            roster,
            positions,
            config,
        }
    }

    /// Build a snapshot from a world report.
    ///
    /// An explicit `players` list is the roster. Without one, the roster is
    /// read from the `name` (or `gamertag`) field of each object in a
    /// `positions` array; anything else yields an empty roster.
    pub fn from_report(players: Option<Vec<String>>, positions: Value, config: Value) -> Self {
        let roster = players.unwrap_or_else(|| roster_from_positions(&positions));
        Self::new(roster, positions, config)
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn positions(&self) -> &Value {
        &self.positions
    }

    pub fn config(&self) -> &Value {
        &self.config
    }

    /// Serialize positions and config into a relay message tagged with
    /// `message_type`.
    pub fn relay_payload(&self, message_type: &str) -> Result<Vec<u8>, PublishError> {
        let envelope = RelayEnvelope {
            message_type,
            data: &self.positions,
            config: &self.config,
        };
        serde_json::to_vec(&envelope).map_err(|e| PublishError::Encode(e.to_string()))
    }
}

fn is_null(value: &&Value) -> bool {
    value.is_null()
}

fn roster_from_positions(positions: &Value) -> Vec<String> {
    let Some(entries) = positions.as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            entry
                .get("name")
                .or_else(|| entry.get("gamertag"))
                .and_then(Value::as_str)
        })
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Holder for the current snapshot. Each `replace` discards the previous
/// one entirely.
#[derive(Debug, Default)]
pub struct WorldPresence {
    current: WorldSnapshot,
}

impl WorldPresence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, snapshot: WorldSnapshot) {
        self.current = snapshot;
    }

    pub fn current(&self) -> &WorldSnapshot {
        &self.current
    }

    pub fn roster(&self) -> &[String] {
        self.current.roster()
    }
}
