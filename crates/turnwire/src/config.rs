//! Client configuration.

use serde::{Deserialize, Serialize};

/// Default game server endpoint.
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:9797";

/// Settings for connecting to a game server.
///
/// Build one with [`ClientConfig::default()`] and override the fields you
/// care about, or go through
/// [`TurnwireClient::builder()`](crate::TurnwireClient::builder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// `host:port` of the game server.
    pub server_addr: String,

    /// Maximum bytes read from the transport per receive call.
    pub read_buffer_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
            read_buffer_size: turnwire_transport::DEFAULT_READ_BUFFER_SIZE,
        }
    }
}
