use serde::{Deserialize, Serialize};

/// Listening addresses for the HTTP ingress and the broadcast hub.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface both listeners bind to.
    pub bind: String,
    /// Port for voice/heartbeat/world reports.
    pub http_port: u16,
    /// Port for broadcast subscribers (WebSocket).
    pub ws_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            http_port: 3000,
            ws_port: 3001,
        }
    }
}

impl ServerConfig {
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.bind, self.http_port)
    }

    pub fn ws_addr(&self) -> String {
        format!("{}:{}", self.bind, self.ws_port)
    }
}
