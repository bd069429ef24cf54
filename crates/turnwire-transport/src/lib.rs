//! Transport abstraction layer for Turnwire.
//!
//! Provides the [`Connection`] trait: a reliable, ordered byte stream that
//! the client core reads from and writes to. The core never touches
//! sockets directly, so anything that can move bytes (a TCP stream, a TLS
//! stream wrapped by the caller, an in-process channel) can drive it.
//!
//! # Feature Flags
//!
//! - `tcp` (default): plain TCP transport via `tokio::net`

#![allow(async_fn_in_trait)]

mod error;
mod memory;
#[cfg(feature = "tcp")]
mod tcp;

pub use error::TransportError;
pub use memory::MemoryConnection;
#[cfg(feature = "tcp")]
pub use tcp::{DEFAULT_READ_BUFFER_SIZE, TcpConnection};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-local label for a connection, used only to tell links apart in
/// log output (`conn=conn-3`). It never goes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Wraps a fixed value. Mostly for hand-written connections in tests.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocates a fresh label. Never returns the same value twice in one
    /// process.
    pub fn next() -> Self {
        Self(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// A reliable, ordered, bidirectional byte stream to the game server.
///
/// Implementations move bytes and nothing else: they don't know where one
/// message ends and the next begins. Both methods take `&self` so the
/// receive loop and the input path can share one connection; an
/// implementation serializes concurrent calls internally.
pub trait Connection: Send + Sync + 'static {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync;

    /// Writes all of `data` to the peer before returning.
    ///
    /// The peer may see the bytes split or merged with neighbouring sends;
    /// only their order is guaranteed.
    async fn send(&self, data: &[u8]) -> Result<(), Self::Error>;

    /// Waits for the next chunk of bytes.
    ///
    /// Chunk boundaries are arbitrary: a chunk may end in the middle of a
    /// message, inside its length field, or hold several messages back to
    /// back. Callers feed every chunk to a frame assembler and never
    /// assume a chunk is a message.
    ///
    /// Returns `Ok(None)` once the peer has closed its side; every later
    /// call returns `Ok(None)` too. An `Err` means the link is broken.
    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Stops sending. The peer's `recv` sees end of stream; our own `recv`
    /// keeps working until the peer closes too.
    async fn close(&self) -> Result<(), Self::Error>;

    /// The label used in log lines about this connection.
    fn id(&self) -> ConnectionId;
}
