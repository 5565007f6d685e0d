use std::path::PathBuf;

use clap::Parser;
use voxbridge_config::BridgeConfig;

/// voxbridge: reconciles voice activity, heartbeats, and game world
/// presence into per-player status.
#[derive(Parser, Debug)]
#[command(name = "voxbridge", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// HTTP port for voice, heartbeat, and world reports.
    #[arg(short, long)]
    pub port: Option<u16>,

    /// WebSocket port for broadcast subscribers.
    #[arg(long)]
    pub ws_port: Option<u16>,

    /// Seconds of heartbeat silence before a player is marked disconnected.
    #[arg(long)]
    pub heartbeat_timeout: Option<u64>,

    /// Seconds between liveness sweeps.
    #[arg(long)]
    pub sweep_interval: Option<u64>,

    /// Log level override (debug, info, warn, error) or a full filter directive.
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Overwrite config values with any flags given on the command line.
    pub fn apply(&self, config: &mut BridgeConfig) {
        if let Some(port) = self.port {
            config.server.http_port = port;
        }
        if let Some(port) = self.ws_port {
            config.server.ws_port = port;
        }
        if let Some(secs) = self.heartbeat_timeout {
            config.liveness.heartbeat_timeout_secs = secs;
        }
        if let Some(secs) = self.sweep_interval {
            config.liveness.sweep_interval_secs = secs;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
