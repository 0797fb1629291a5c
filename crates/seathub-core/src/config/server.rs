//! WebSocket listener configuration.

use serde::{Deserialize, Serialize};

/// Settings for the terminal-facing WebSocket listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Capacity of each connection's outbound message buffer.
    #[serde(default = "default_send_buffer")]
    pub send_buffer_size: usize,
}

impl ServerConfig {
    /// Return the `host:port` bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9100
}

fn default_send_buffer() -> usize {
    32
}
