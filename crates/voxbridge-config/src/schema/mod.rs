//! Configuration schema types for voxbridge.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod liveness;
mod logging;
mod relay;
mod server;

pub use liveness::*;
pub use logging::*;
pub use relay::*;
pub use server::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub server: ServerConfig,
    pub liveness: LivenessConfig,
    pub relay: RelayConfig,
    pub logging: LoggingConfig,
}
