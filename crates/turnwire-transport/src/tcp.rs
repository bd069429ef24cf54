//! TCP transport implementation using `tokio::net`.
//!
//! TLS is not handled here. Callers that need it wrap the stream
//! themselves and implement [`Connection`] for the wrapper.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use crate::{Connection, ConnectionId, TransportError};

/// Default size of the buffer used for a single `recv` call.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4096;

/// A single TCP connection to a game server.
///
/// The stream is split into independently locked halves so a pending
/// `recv` never blocks a concurrent `send`.
pub struct TcpConnection {
    id: ConnectionId,
    peer: SocketAddr,
    reader: Mutex<OwnedReadHalf>,
    writer: Mutex<OwnedWriteHalf>,
    read_buffer_size: usize,
}

impl TcpConnection {
    /// Connects to `addr` with the default read buffer size.
    pub async fn connect(addr: &str) -> Result<Self, TransportError> {
        Self::connect_with_buffer(addr, DEFAULT_READ_BUFFER_SIZE).await
    }

    /// Connects to `addr`, reading at most `read_buffer_size` bytes per
    /// `recv` call.
    pub async fn connect_with_buffer(
        addr: &str,
        read_buffer_size: usize,
    ) -> Result<Self, TransportError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(TransportError::ConnectFailed)?;
        let conn = Self::from_stream(stream, read_buffer_size)?;
        tracing::info!(id = %conn.id, peer = %conn.peer, "TCP connection established");
        Ok(conn)
    }

    /// Wraps an already connected stream.
    pub fn from_stream(
        stream: TcpStream,
        read_buffer_size: usize,
    ) -> Result<Self, TransportError> {
        let peer = stream.peer_addr().map_err(TransportError::ConnectFailed)?;
        let (reader, writer) = stream.into_split();
        Ok(Self {
            id: ConnectionId::next(),
            peer,
            reader: Mutex::new(reader),
            writer: Mutex::new(writer),
            read_buffer_size: read_buffer_size.max(1),
        })
    }

    /// Returns the address of the remote peer.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }
}

impl Connection for TcpConnection {
    type Error = TransportError;

    async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
        let mut writer = self.writer.lock().await;
        writer.write_all(data).await.map_err(TransportError::SendFailed)?;
        writer.flush().await.map_err(TransportError::SendFailed)
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error> {
        let mut buf = vec![0u8; self.read_buffer_size];
        let n = self
            .reader
            .lock()
            .await
            .read(&mut buf)
            .await
            .map_err(TransportError::ReceiveFailed)?;
        if n == 0 {
            tracing::debug!(id = %self.id, "peer closed the stream");
            return Ok(None);
        }
        buf.truncate(n);
        Ok(Some(buf))
    }

    async fn close(&self) -> Result<(), Self::Error> {
        self.writer
            .lock()
            .await
            .shutdown()
            .await
            .map_err(TransportError::SendFailed)
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
