//! Heartbeat-driven connection state.
//!
//! Heartbeats carry the participant's current level ("in voice" or not), so
//! each one both refreshes liveness and overwrites `connected`. The sweep
//! only detects silence: a client that stops sending is converged to
//! disconnected without needing an explicit leave message.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::key::ParticipantKey;

/// Connection level plus the time of the heartbeat that set it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub connected: bool,
    pub last_heartbeat_at: Instant,
}

/// Connection records keyed by participant. Records are never removed.
#[derive(Debug, Default)]
pub struct ConnectionLivenessStore {
    records: HashMap<ParticipantKey, ConnectionRecord>,
}

impl ConnectionLivenessStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a heartbeat received at `now`. Returns false when the
    /// identifier is empty.
    pub fn report_heartbeat(&mut self, id: &str, in_voice: bool, now: Instant) -> bool {
        let Some(key) = ParticipantKey::from_reported(id) else {
            return false;
        };
        self.records.insert(
            key,
            ConnectionRecord {
                connected: in_voice,
                last_heartbeat_at: now,
            },
        );
        true
    }

    /// Flip every connected record whose last heartbeat is more than
    /// `timeout` before `now` to disconnected. Returns the flipped keys.
    pub fn sweep(&mut self, now: Instant, timeout: Duration) -> Vec<ParticipantKey> {
        let mut flipped = Vec::new();
        for (key, record) in self.records.iter_mut() {
            if record.connected && now.saturating_duration_since(record.last_heartbeat_at) > timeout {
                record.connected = false;
                flipped.push(key.clone());
            }
        }
        flipped
    }

    pub fn get(&self, key: &ParticipantKey) -> Option<ConnectionRecord> {
        self.records.get(key).copied()
    }

    /// Unknown participants are reported as disconnected.
    pub fn is_connected(&self, key: &ParticipantKey) -> bool {
        self.get(key).is_some_and(|record| record.connected)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn connected_count(&self) -> usize {
        self.records.values().filter(|r| r.connected).count()
    }
}
