use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failure to hand a payload to the broadcast transport.
///
/// Callers on the reporting path log these and move on; they never reach
/// the client that submitted the data.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("no subscribers on channel '{0}'")]
    NoSubscribers(String),

    #[error("channel '{0}' is closed")]
    ChannelClosed(String),

    #[error("payload encode error: {0}")]
    Encode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("network error: {0}")]
    Network(String),
}
