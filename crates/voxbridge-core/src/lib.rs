//! Presence reconciliation engine.
//!
//! Three feeds describe the same participants: voice activity pushed by the
//! voice client, connection heartbeats from the same client, and periodic
//! world snapshots listing who is present in the game. The stores in this
//! crate hold the latest value of each feed, and [`PresenceEngine`] merges
//! them into one [`UnifiedStatus`] per rostered participant on demand.

pub mod engine;
pub mod key;
pub mod liveness;
pub mod publish;
pub mod reconcile;
pub mod sweeper;
pub mod voice;
pub mod world;

pub use engine::{PresenceEngine, PresenceStats, RelaySettings};
pub use key::{normalize, ParticipantKey};
pub use liveness::{ConnectionLivenessStore, ConnectionRecord};
pub use publish::Publisher;
pub use reconcile::{reconcile, UnifiedStatus};
pub use sweeper::SweeperHandle;
pub use voice::{VoiceState, VoiceStateStore};
pub use world::{WorldPresence, WorldSnapshot};
