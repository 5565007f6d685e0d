//! Outbound broadcast seam.

use async_trait::async_trait;
use voxbridge_common::PublishError;

/// Transport that fans a payload out to whoever listens on `channel`.
///
/// Delivery is best effort. Implementations report failures (including
/// "nobody is listening") as errors; the engine logs and drops them.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, channel: &str, payload: Vec<u8>) -> Result<(), PublishError>;
}
