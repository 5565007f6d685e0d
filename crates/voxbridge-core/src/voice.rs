//! Last reported talking/muted flags per participant.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::key::ParticipantKey;

/// Voice activity flags as last reported by the voice client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceState {
    pub is_talking: bool,
    pub is_muted: bool,
}

/// Last-write-wins voice state. Entries never expire.
#[derive(Debug, Default)]
pub struct VoiceStateStore {
    states: HashMap<ParticipantKey, VoiceState>,
}

impl VoiceStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a voice report. Returns false (and stores nothing) when the
    /// identifier is empty.
    pub fn report(&mut self, id: &str, is_talking: bool, is_muted: bool) -> bool {
        let Some(key) = ParticipantKey::from_reported(id) else {
            return false;
        };
        self.states.insert(
            key,
            VoiceState {
                is_talking,
                is_muted,
            },
        );
        true
    }

    pub fn get(&self, key: &ParticipantKey) -> Option<VoiceState> {
        self.states.get(key).copied()
    }

    /// Voice state for `key`, or the silent/unmuted default when unknown.
    pub fn state_for(&self, key: &ParticipantKey) -> VoiceState {
        self.get(key).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::normalize;

    #[test]
    fn report_then_get() {
        let mut store = VoiceStateStore::new();
        assert!(store.report("Steve", true, false));

        let state = store.get(&normalize("steve")).unwrap();
        assert!(state.is_talking);
        assert!(!state.is_muted);
    }

    #[test]
    fn later_report_overwrites() {
        let mut store = VoiceStateStore::new();
        store.report("Steve", true, false);
        store.report("STEVE", false, true);

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.state_for(&normalize("Steve")),
            VoiceState {
                is_talking: false,
                is_muted: true,
            }
        );
    }

    #[test]
    fn empty_identifier_is_ignored() {
        let mut store = VoiceStateStore::new();
        assert!(!store.report("", true, true));
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_participant_defaults_to_silent() {
        let store = VoiceStateStore::new();
        assert!(store.get(&normalize("nobody")).is_none());
        assert_eq!(store.state_for(&normalize("nobody")), VoiceState::default());
    }

    #[test]
    fn serializes_in_camel_case() {
        let json = serde_json::to_string(&VoiceState {
            is_talking: true,
            is_muted: false,
        })
        .unwrap();
        assert_eq!(json, r#"{"isTalking":true,"isMuted":false}"#);
    }
}
