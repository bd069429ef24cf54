/// Why a byte-stream operation failed.
///
/// Every variant means the link is unusable; the client never retries.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The stream was already shut down, by us or by the peer.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// Writing to the socket failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Reading from the socket failed (reset, timeout, ...).
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// The game server could not be reached.
    #[error("connect to game server failed: {0}")]
    ConnectFailed(#[source] std::io::Error),
}
