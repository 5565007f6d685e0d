//! Per-section validators.

use super::helpers::{validate_non_empty, validate_range};
use crate::schema::BridgeConfig;

pub(crate) fn validate_server(errors: &mut Vec<String>, config: &BridgeConfig) {
    let server = &config.server;
    validate_non_empty(errors, "server.bind", &server.bind);
    if server.http_port == 0 {
        errors.push("server.http_port must be non-zero".into());
    }
    if server.ws_port == 0 {
        errors.push("server.ws_port must be non-zero".into());
    }
    if server.http_port != 0 && server.http_port == server.ws_port {
        errors.push(format!(
            "server.http_port and server.ws_port must differ (both {})",
            server.http_port
        ));
    }
}

pub(crate) fn validate_liveness(errors: &mut Vec<String>, config: &BridgeConfig) {
    let liveness = &config.liveness;
    validate_range(
        errors,
        "liveness.sweep_interval_secs",
        liveness.sweep_interval_secs,
        1,
        3600,
    );
    validate_range(
        errors,
        "liveness.heartbeat_timeout_secs",
        liveness.heartbeat_timeout_secs,
        1,
        86_400,
    );
    if liveness.heartbeat_timeout_secs <= liveness.sweep_interval_secs {
        errors.push(format!(
            "liveness.heartbeat_timeout_secs ({}) must exceed liveness.sweep_interval_secs ({})",
            liveness.heartbeat_timeout_secs, liveness.sweep_interval_secs
        ));
    }
}

pub(crate) fn validate_relay(errors: &mut Vec<String>, config: &BridgeConfig) {
    let relay = &config.relay;
    validate_non_empty(errors, "relay.channel", &relay.channel);
    validate_non_empty(errors, "relay.message_type", &relay.message_type);
    validate_range(errors, "relay.capacity", relay.capacity as u64, 1, 65_536);
}

pub(crate) fn validate_logging(errors: &mut Vec<String>, config: &BridgeConfig) {
    validate_non_empty(errors, "logging.filter", &config.logging.filter);
}
