//! Environment variable overrides applied after the file is loaded.

use crate::schema::BridgeConfig;

/// Environment variable that overrides `server.http_port`.
pub const PORT_VAR: &str = "PORT";

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: &mut BridgeConfig) {
    apply_overrides_from(config, |name| std::env::var(name).ok());
}

/// Apply overrides using `lookup` to read variables. Unparseable values are
/// logged and ignored.
pub fn apply_overrides_from<F>(config: &mut BridgeConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(PORT_VAR) {
        match raw.trim().parse::<u16>() {
            Ok(port) if port != 0 => config.server.http_port = port,
            _ => tracing::warn!("ignoring invalid {PORT_VAR}={raw:?}"),
        }
    }
}
