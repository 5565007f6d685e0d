//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    let config = BridgeConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_zero_ports() {
    let mut config = BridgeConfig::default();
    config.server.http_port = 0;
    config.server.ws_port = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("server.http_port must be non-zero"));
    assert!(err.contains("server.ws_port must be non-zero"));
    assert!(!err.contains("must differ"));
}

#[test]
fn catches_shared_port() {
    let mut config = BridgeConfig::default();
    config.server.ws_port = config.server.http_port;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("must differ"));
}

#[test]
fn catches_zero_sweep_interval() {
    let mut config = BridgeConfig::default();
    config.liveness.sweep_interval_secs = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("liveness.sweep_interval_secs"));
}

#[test]
fn catches_timeout_not_exceeding_interval() {
    let mut config = BridgeConfig::default();
    config.liveness.sweep_interval_secs = 30;
    config.liveness.heartbeat_timeout_secs = 30;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("must exceed"));
}

#[test]
fn catches_empty_relay_fields() {
    let mut config = BridgeConfig::default();
    config.relay.channel = "  ".into();
    config.relay.message_type = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("relay.channel must not be empty"));
    assert!(err.contains("relay.message_type must not be empty"));
}

#[test]
fn catches_zero_capacity() {
    let mut config = BridgeConfig::default();
    config.relay.capacity = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("relay.capacity"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = BridgeConfig::default();
    config.server.bind = String::new();
    config.logging.filter = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("server.bind"));
    assert!(err.contains("logging.filter"));
    assert!(err.contains("; "));
}
