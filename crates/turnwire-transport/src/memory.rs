//! In-process transport: two connected endpoints backed by channels.
//!
//! Useful for tests and for embedding the client next to a server in the
//! same process. Each `send` delivers exactly the bytes given as one chunk
//! to the peer's `recv`.

use tokio::sync::{mpsc, Mutex};

use crate::{Connection, ConnectionId, TransportError};

/// One end of an in-memory byte pipe. Create both ends with
/// [`MemoryConnection::pair`].
pub struct MemoryConnection {
    id: ConnectionId,
    outbound: Mutex<Option<mpsc::UnboundedSender<Vec<u8>>>>,
    inbound: Mutex<mpsc::UnboundedReceiver<Vec<u8>>>,
}

impl MemoryConnection {
    /// Creates two connected endpoints. Bytes sent on one are received on
    /// the other. Closing (or dropping) one end makes the other's `recv`
    /// return `Ok(None)`.
    pub fn pair() -> (Self, Self) {
        let (a_tx, b_rx) = mpsc::unbounded_channel();
        let (b_tx, a_rx) = mpsc::unbounded_channel();

        let a = Self {
            id: ConnectionId::next(),
            outbound: Mutex::new(Some(a_tx)),
            inbound: Mutex::new(a_rx),
        };
        let b = Self {
            id: ConnectionId::next(),
            outbound: Mutex::new(Some(b_tx)),
            inbound: Mutex::new(b_rx),
        };
        tracing::debug!(a = %a.id, b = %b.id, "memory connection pair created");
        (a, b)
    }
}

impl Connection for MemoryConnection {
    type Error = TransportError;

    async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
        let outbound = self.outbound.lock().await;
        match outbound.as_ref() {
            Some(tx) => tx.send(data.to_vec()).map_err(|_| {
                TransportError::ConnectionClosed("peer dropped".into())
            }),
            None => Err(TransportError::ConnectionClosed(
                "closed locally".into(),
            )),
        }
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.inbound.lock().await.recv().await)
    }

    async fn close(&self) -> Result<(), Self::Error> {
        // Dropping the sender ends the peer's receive side.
        self.outbound.lock().await.take();
        Ok(())
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
