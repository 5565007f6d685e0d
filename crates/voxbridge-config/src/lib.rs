//! voxbridge configuration.
//!
//! TOML-based configuration with full validation. Every section uses
//! serde defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voxbridge_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod overrides;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use overrides::apply_env_overrides;
pub use schema::{BridgeConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use voxbridge_common::ConfigError;

/// Load config from `path`, or from the platform default location when no
/// path is given, then apply environment overrides and validate.
pub fn load_config(path: Option<&Path>) -> Result<BridgeConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &BridgeConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
