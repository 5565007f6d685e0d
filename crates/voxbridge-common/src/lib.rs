pub mod errors;

pub use errors::{BridgeError, ConfigError, PublishError};

pub type Result<T> = std::result::Result<T, BridgeError>;
