//! Subscriber wire protocol. Only the first message is parsed; after that
//! the hub only writes.

use serde::{Deserialize, Serialize};

/// First message a subscriber sends to pick its channel.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum SubscriberHello {
    #[serde(rename = "subscribe")]
    Subscribe { channel: String },
}

/// Control messages the hub sends back to subscribers.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum HubResponse {
    #[serde(rename = "subscribed")]
    Subscribed { channel: String },

    #[serde(rename = "error")]
    Error { message: String },
}
