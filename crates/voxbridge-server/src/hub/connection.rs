//! Per-subscriber handler: read the subscribe hello, then forward channel
//! traffic until either side goes away.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::broadcast::error::RecvError;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

use super::protocol::{HubResponse, SubscriberHello};
use super::ChannelHub;

const HELLO_TIMEOUT: Duration = Duration::from_secs(10);

type WsSink = SplitSink<WebSocketStream<TcpStream>, Message>;
type WsStream = SplitStream<WebSocketStream<TcpStream>>;

/// Handle a single subscriber connection.
pub async fn handle_connection(ws: WebSocketStream<TcpStream>, addr: SocketAddr, hub: ChannelHub) {
    let (mut sink, mut stream) = ws.split();

    let channel = match read_hello(&mut stream, addr).await {
        Ok(channel) => channel,
        Err(message) => {
            let _ = send_response(&mut sink, &HubResponse::Error { message }).await;
            return;
        }
    };

    let mut rx = hub.subscribe(&channel).await;
    let subscribers = hub.subscriber_count(&channel).await;
    tracing::info!(peer = %addr, channel = %channel, subscribers, "Subscriber joined");

    if send_response(
        &mut sink,
        &HubResponse::Subscribed {
            channel: channel.clone(),
        },
    )
    .await
    .is_err()
    {
        drop(rx);
        hub.release(&channel).await;
        return;
    }

    loop {
        tokio::select! {
            outgoing = rx.recv() => {
                match outgoing {
                    Ok(payload) => {
                        if sink.send(Message::Text(payload.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(peer = %addr, channel = %channel, skipped, "Subscriber lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            frame = stream.next() => {
                match frame {
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(peer = %addr, error = %e, "WS error");
                        break;
                    }
                    Some(Ok(_)) => {
                        tracing::debug!(peer = %addr, "Ignoring frame from subscriber");
                    }
                }
            }
        }
    }

    drop(rx);
    hub.release(&channel).await;
    let channels = hub.channel_count().await;
    tracing::info!(peer = %addr, channel = %channel, channels, "Subscriber left");
}

/// Read and parse the first message as a subscribe hello.
async fn read_hello(stream: &mut WsStream, addr: SocketAddr) -> Result<String, String> {
    let frame = tokio::time::timeout(HELLO_TIMEOUT, stream.next()).await;

    match frame {
        Ok(Some(Ok(Message::Text(text)))) => match serde_json::from_str::<SubscriberHello>(&text) {
            Ok(SubscriberHello::Subscribe { channel }) if !channel.trim().is_empty() => Ok(channel),
            Ok(SubscriberHello::Subscribe { .. }) => {
                tracing::warn!(peer = %addr, "Subscribe with empty channel");
                Err("channel must not be empty".into())
            }
            Err(e) => {
                tracing::warn!(peer = %addr, error = %e, "Invalid hello message");
                Err(format!("invalid hello: {e}"))
            }
        },
        Ok(Some(Ok(_))) => {
            tracing::warn!(peer = %addr, "Expected text hello, got binary");
            Err("expected text hello".into())
        }
        Ok(Some(Err(e))) => {
            tracing::warn!(peer = %addr, error = %e, "WS error during hello");
            Err("connection error".into())
        }
        Ok(None) => {
            tracing::debug!(peer = %addr, "Connection closed before hello");
            Err("connection closed".into())
        }
        Err(_) => {
            tracing::warn!(peer = %addr, "Hello timeout (10s)");
            Err("hello timeout".into())
        }
    }
}

/// Send a HubResponse as a JSON text frame.
async fn send_response(
    sink: &mut WsSink,
    response: &HubResponse,
) -> Result<(), tokio_tungstenite::tungstenite::Error> {
    let json = serde_json::to_string(response)
        .unwrap_or_else(|_| r#"{"type":"error","message":"encode failure"}"#.to_string());
    sink.send(Message::Text(json.into())).await
}
