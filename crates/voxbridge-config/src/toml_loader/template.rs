//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# voxbridge configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[server]
# bind = "0.0.0.0"
# http_port = 3000       # voice/heartbeat/world reports; PORT env var overrides
# ws_port = 3001         # broadcast subscribers

[liveness]
# sweep_interval_secs = 5
# heartbeat_timeout_secs = 20   # must exceed sweep_interval_secs

[relay]
# channel = "minecraft-global"
# message_type = "minecraft-update"
# capacity = 256

[logging]
# filter = "voxbridge=info"     # RUST_LOG and --log-level take precedence
"##
    .to_string()
}
