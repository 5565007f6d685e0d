//! voxbridge: presence bridge between a voice client and a game world.
//!
//! Voice clients report talking/muted flags and heartbeats over HTTP. The
//! game world posts periodic snapshots and gets back per-player status; each
//! snapshot is also relayed to WebSocket subscribers of the relay channel.

mod cli;
mod http;
mod hub;


use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;
use voxbridge_common::{BridgeError, ConfigError};
use voxbridge_config::BridgeConfig;
use voxbridge_core::{PresenceEngine, RelaySettings};

use crate::hub::ChannelHub;

const DEFAULT_LOG_FILTER: &str = "voxbridge=info";

/// Filter used when `RUST_LOG` is unset: `--log-level`, then the config
/// file, then the built-in default.
fn fallback_filter(log_level: Option<&str>, config: Option<&BridgeConfig>) -> String {
    log_level
        .map(str::to_string)
        .or_else(|| config.map(|c| c.logging.filter.clone()))
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn env_filter(log_level: Option<&str>, config: Option<&BridgeConfig>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_filter(log_level, config)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Load the config under a provisional subscriber so loader messages are
/// not lost before the configured filter is known.
fn load_config_logged<W>(args: &cli::Args, writer: W) -> Result<BridgeConfig, ConfigError>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let provisional = tracing_subscriber::fmt()
        .with_env_filter(env_filter(args.log_level.as_deref(), None))
        .with_writer(writer)
        .finish();
    tracing::subscriber::with_default(provisional, || {
        voxbridge_config::load_config(args.config.as_deref())
    })
}

/// `RUST_LOG` wins, then `--log-level`, then the config file.
fn init_logging(log_level: Option<&str>, config: Option<&BridgeConfig>) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(log_level, config))
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

/// Bind both listeners and serve until Ctrl-C.
async fn run(config: BridgeConfig) -> voxbridge_common::Result<()> {
    let channels = ChannelHub::new(config.relay.capacity);
    let engine = PresenceEngine::new(
        Arc::new(channels.clone()),
        RelaySettings {
            channel: config.relay.channel.clone(),
            message_type: config.relay.message_type.clone(),
        },
    );

    let ws_addr = config.server.ws_addr();
    let ws_listener = TcpListener::bind(&ws_addr).await?;
    let http_addr = config.server.http_addr();
    let http_listener = TcpListener::bind(&http_addr).await?;

    let sweeper = engine.spawn_sweeper(
        config.liveness.sweep_interval(),
        config.liveness.heartbeat_timeout(),
    );

    tracing::info!(
        channel = %engine.relay_settings().channel,
        message_type = %engine.relay_settings().message_type,
        "Broadcast hub listening on {}",
        ws_addr
    );
    let hub_task = tokio::spawn(hub::serve(ws_listener, channels));

    tracing::info!("HTTP ingress listening on {}", http_addr);
    let served = http::serve(http_listener, engine, shutdown_signal()).await;

    hub_task.abort();
    sweeper.shutdown().await;
    served.map_err(|e| BridgeError::Network(format!("http server: {e}")))
}

#[tokio::main]
async fn main() {
    let args = cli::parse();

    let loaded = load_config_logged(&args, std::io::stdout);
    init_logging(args.log_level.as_deref(), loaded.as_ref().ok());

    tracing::info!("voxbridge v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        let mut config = BridgeConfig::default();
        voxbridge_config::apply_env_overrides(&mut config);
        config
    });
    args.apply(&mut config);

    let result = match voxbridge_config::validation::validate(&config) {
        Ok(()) => run(config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("voxbridge failed: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
