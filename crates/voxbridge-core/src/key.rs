//! Canonical participant keys.

use std::fmt;

/// Case-folded participant identifier used for every store lookup.
///
/// The display form is never recovered from a key; output always takes its
/// casing from the world roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantKey(String);

impl ParticipantKey {
    /// Normalize a reported identifier, rejecting empty ones.
    pub fn from_reported(id: &str) -> Option<Self> {
        if id.trim().is_empty() {
            return None;
        }
        Some(normalize(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lower-case an identifier into its lookup key.
pub fn normalize(id: &str) -> ParticipantKey {
    ParticipantKey(id.to_lowercase())
}
