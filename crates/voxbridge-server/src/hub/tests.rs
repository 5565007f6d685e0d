//! Hub tests: channel bookkeeping and real WebSocket subscribers.

use std::time::Duration;

use futures_util::{SinkExt, Stream, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use super::*;

async fn start_hub() -> (ChannelHub, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hub = ChannelHub::new(16);
    tokio::spawn(serve(listener, hub.clone()));
    (hub, format!("ws://{addr}"))
}

fn text_frame(text: &str) -> Message {
    Message::Text(text.to_string().into())
}

async fn next_text<S>(stream: &mut S) -> String
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    let frame = tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .expect("timed out waiting for frame")
        .expect("stream ended")
        .expect("ws error");
    match frame {
        Message::Text(text) => text.to_string(),
        other => panic!("expected text frame, got {other:?}"),
    }
}

#[tokio::test]
async fn publish_without_subscribers_fails() {
    let hub = ChannelHub::new(16);
    let result = hub.publish("minecraft-global", b"{}".to_vec()).await;
    assert!(matches!(result, Err(PublishError::NoSubscribers(ref c)) if c == "minecraft-global"));
}

#[tokio::test]
async fn publish_after_last_receiver_left_reports_closed() {
    let hub = ChannelHub::new(16);
    let rx = hub.subscribe("lobby").await;
    drop(rx);

    let result = hub.publish("lobby", b"{}".to_vec()).await;
    assert!(matches!(result, Err(PublishError::ChannelClosed(ref c)) if c == "lobby"));

    hub.release("lobby").await;
    let result = hub.publish("lobby", b"{}".to_vec()).await;
    assert!(matches!(result, Err(PublishError::NoSubscribers(_))));
}

#[tokio::test]
async fn publish_rejects_non_utf8_payload() {
    let hub = ChannelHub::new(16);
    let _rx = hub.subscribe("lobby").await;
    let result = hub.publish("lobby", vec![0xff, 0xfe]).await;
    assert!(matches!(result, Err(PublishError::Encode(_))));
}

#[tokio::test]
async fn subscribers_receive_published_payloads() {
    let hub = ChannelHub::new(16);
    let mut rx1 = hub.subscribe("lobby").await;
    let mut rx2 = hub.subscribe("lobby").await;
    assert_eq!(hub.subscriber_count("lobby").await, 2);

    hub.publish("lobby", b"hello".to_vec()).await.unwrap();
    assert_eq!(rx1.recv().await.unwrap(), "hello");
    assert_eq!(rx2.recv().await.unwrap(), "hello");
}

#[tokio::test]
async fn channels_are_isolated() {
    let hub = ChannelHub::new(16);
    let mut lobby = hub.subscribe("lobby").await;
    let _other = hub.subscribe("other").await;

    hub.publish("other", b"not for lobby".to_vec()).await.unwrap();
    assert!(lobby.try_recv().is_err());
}

#[tokio::test]
async fn release_removes_empty_channels_only() {
    let hub = ChannelHub::new(16);
    let rx1 = hub.subscribe("lobby").await;
    let rx2 = hub.subscribe("lobby").await;

    drop(rx1);
    hub.release("lobby").await;
    assert_eq!(hub.channel_count().await, 1);

    drop(rx2);
    hub.release("lobby").await;
    assert_eq!(hub.channel_count().await, 0);
    assert!(hub.publish("lobby", b"x".to_vec()).await.is_err());
}

#[tokio::test]
async fn websocket_subscriber_receives_relay() {
    let (hub, url) = start_hub().await;
    let (mut ws, _) = connect_async(url.as_str()).await.unwrap();

    ws.send(text_frame(r#"{"type":"subscribe","channel":"minecraft-global"}"#))
        .await
        .unwrap();
    assert_eq!(
        next_text(&mut ws).await,
        r#"{"type":"subscribed","channel":"minecraft-global"}"#
    );

    hub.publish("minecraft-global", br#"{"type":"minecraft-update"}"#.to_vec())
        .await
        .unwrap();
    assert_eq!(next_text(&mut ws).await, r#"{"type":"minecraft-update"}"#);
}

#[tokio::test]
async fn invalid_hello_gets_error_response() {
    let (hub, url) = start_hub().await;
    let (mut ws, _) = connect_async(url.as_str()).await.unwrap();

    ws.send(text_frame(r#"{"type":"nope"}"#)).await.unwrap();
    let reply = next_text(&mut ws).await;
    assert!(reply.contains(r#""type":"error""#));
    assert_eq!(hub.channel_count().await, 0);
}

#[tokio::test]
async fn disconnect_releases_channel() {
    let (hub, url) = start_hub().await;
    let (mut ws, _) = connect_async(url.as_str()).await.unwrap();

    ws.send(text_frame(r#"{"type":"subscribe","channel":"lobby"}"#))
        .await
        .unwrap();
    next_text(&mut ws).await;
    assert_eq!(hub.subscriber_count("lobby").await, 1);

    ws.close(None).await.unwrap();
    drop(ws);

    for _ in 0..50 {
        if hub.channel_count().await == 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("channel was not released after disconnect");
}
