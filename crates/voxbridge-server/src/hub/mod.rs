//! WebSocket broadcast hub: subscribers pick a channel with their first
//! message and then receive every payload published on it.

mod connection;
mod protocol;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, RwLock};
use tokio_tungstenite::accept_async;
use voxbridge_common::PublishError;
use voxbridge_core::Publisher;

use self::connection::handle_connection;

/// Thread-safe map of channel name to its broadcast sender.
#[derive(Clone)]
pub struct ChannelHub {
    channels: Arc<RwLock<HashMap<String, broadcast::Sender<String>>>>,
    capacity: usize,
}

impl ChannelHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Join `channel`, creating it on first use.
    pub async fn subscribe(&self, channel: &str) -> broadcast::Receiver<String> {
        let mut map = self.channels.write().await;
        map.entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Drop `channel` once its last receiver is gone. Callers must drop
    /// their receiver first.
    pub async fn release(&self, channel: &str) {
        let mut map = self.channels.write().await;
        if map.get(channel).is_some_and(|tx| tx.receiver_count() == 0) {
            map.remove(channel);
            tracing::debug!(channel = %channel, "Channel released");
        }
    }

    pub async fn subscriber_count(&self, channel: &str) -> usize {
        self.channels
            .read()
            .await
            .get(channel)
            .map_or(0, |tx| tx.receiver_count())
    }

    pub async fn channel_count(&self) -> usize {
        self.channels.read().await.len()
    }
}

/// A channel that was never joined reports `NoSubscribers`. One whose last
/// receiver has gone but that has not been released yet reports
/// `ChannelClosed`.
#[async_trait]
impl Publisher for ChannelHub {
    async fn publish(&self, channel: &str, payload: Vec<u8>) -> Result<(), PublishError> {
        let text = String::from_utf8(payload).map_err(|e| PublishError::Encode(e.to_string()))?;

        let map = self.channels.read().await;
        let tx = map
            .get(channel)
            .ok_or_else(|| PublishError::NoSubscribers(channel.to_string()))?;
        let delivered = tx
            .send(text)
            .map_err(|_| PublishError::ChannelClosed(channel.to_string()))?;

        tracing::trace!(channel = %channel, delivered, "Published");
        Ok(())
    }
}

/// Accept subscribers on `listener` until the task is dropped.
pub async fn serve(listener: TcpListener, hub: ChannelHub) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let hub = hub.clone();
                tokio::spawn(async move {
                    match accept_async(stream).await {
                        Ok(ws) => handle_connection(ws, addr, hub).await,
                        Err(e) => {
                            tracing::warn!(peer = %addr, error = %e, "WS handshake failed");
                        }
                    }
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "TCP accept error");
            }
        }
    }
}
