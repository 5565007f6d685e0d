//! Shared engine handle: owns the three stores and the relay seam.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use voxbridge_common::PublishError;

use crate::liveness::ConnectionLivenessStore;
use crate::publish::Publisher;
use crate::reconcile::{reconcile, UnifiedStatus};
use crate::voice::VoiceStateStore;
use crate::world::{WorldPresence, WorldSnapshot};


/// Where and how world snapshots are relayed.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// Broadcast channel the snapshot is published on.
    pub channel: String,
    /// Value of the `type` tag on relayed messages.
    pub message_type: String,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            channel: "minecraft-global".into(),
            message_type: "minecraft-update".into(),
        }
    }
}

/// Point-in-time counters for health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceStats {
    pub rostered: usize,
    pub tracked: usize,
    pub connected: usize,
}

/// Cloneable handle to the process-wide presence state.
///
/// Each store sits behind its own lock. Locks are always taken in the order
/// world, voice, liveness, and none is held across a publish.
#[derive(Clone)]
pub struct PresenceEngine {
    voice: Arc<RwLock<VoiceStateStore>>,
    liveness: Arc<RwLock<ConnectionLivenessStore>>,
    world: Arc<RwLock<WorldPresence>>,
    publisher: Arc<dyn Publisher>,
    relay: Arc<RelaySettings>,
}

impl PresenceEngine {
    pub fn new(publisher: Arc<dyn Publisher>, relay: RelaySettings) -> Self {
        Self {
            voice: Arc::new(RwLock::new(VoiceStateStore::new())),
            liveness: Arc::new(RwLock::new(ConnectionLivenessStore::new())),
            world: Arc::new(RwLock::new(WorldPresence::new())),
            publisher,
            relay: Arc::new(relay),
        }
    }

    pub fn relay_settings(&self) -> &RelaySettings {
        &self.relay
    }

    pub async fn report_voice_state(&self, id: &str, is_talking: bool, is_muted: bool) {
        let recorded = self.voice.write().await.report(id, is_talking, is_muted);
        if recorded {
            debug!(participant = %id, is_talking, is_muted, "Voice state reported");
        } else {
            debug!("Ignoring voice report without an identifier");
        }
    }

    pub async fn report_heartbeat(&self, id: &str, in_voice: bool) {
        self.report_heartbeat_at(id, in_voice, Instant::now()).await;
    }

    pub async fn report_heartbeat_at(&self, id: &str, in_voice: bool, now: Instant) {
        let recorded = self
            .liveness
            .write()
            .await
            .report_heartbeat(id, in_voice, now);
        if recorded {
            debug!(participant = %id, in_voice, "Heartbeat");
        } else {
            debug!("Ignoring heartbeat without an identifier");
        }
    }

    /// Replace the world snapshot, relay it, and return the reconciled
    /// statuses for its roster.
    ///
    /// Relay failures are logged and dropped; the statuses are returned
    /// regardless.
    pub async fn submit_world_snapshot(&self, snapshot: WorldSnapshot) -> Vec<UnifiedStatus> {
        let payload = snapshot.relay_payload(&self.relay.message_type);
        let roster = {
            let mut world = self.world.write().await;
            world.replace(snapshot);
            world.roster().to_vec()
        };

        let statuses = self.reconcile_roster(&roster).await;

        let relayed = match payload {
            Ok(bytes) => self.relay(bytes).await,
            Err(e) => Err(e),
        };
        if let Err(e) = relayed {
            warn!(channel = %self.relay.channel, error = %e, "World snapshot relay failed");
        }

        statuses
    }

    /// Publish a payload on the configured relay channel.
    pub async fn relay(&self, payload: Vec<u8>) -> Result<(), PublishError> {
        self.publisher.publish(&self.relay.channel, payload).await
    }

    /// Statuses for the current roster, recomputed on every call.
    pub async fn reconcile(&self) -> Vec<UnifiedStatus> {
        let roster = self.world.read().await.roster().to_vec();
        self.reconcile_roster(&roster).await
    }

    async fn reconcile_roster(&self, roster: &[String]) -> Vec<UnifiedStatus> {
        let voice = self.voice.read().await;
        let liveness = self.liveness.read().await;
        reconcile(roster, &voice, &liveness)
    }

    /// Run one liveness sweep at `now`. Returns how many participants were
    /// flipped to disconnected.
    pub async fn sweep_at(&self, now: Instant, timeout: Duration) -> usize {
        let flipped = self.liveness.write().await.sweep(now, timeout);
        for key in &flipped {
            info!(participant = %key, "Heartbeat overdue, marking disconnected");
        }
        flipped.len()
    }

    pub async fn sweep(&self, timeout: Duration) -> usize {
        self.sweep_at(Instant::now(), timeout).await
    }

    pub async fn stats(&self) -> PresenceStats {
        let rostered = self.world.read().await.roster().len();
        let liveness = self.liveness.read().await;
        PresenceStats {
            rostered,
            tracked: liveness.len(),
            connected: liveness.connected_count(),
        }
    }
}
