//! `TurnwireClient` builder and connection setup.
//!
//! This is the entry point for talking to a game server over TCP. It ties
//! the layers together: transport → protocol → session → controller.

use std::sync::Arc;

use tokio::task::JoinHandle;
use turnwire_transport::TcpConnection;

use crate::{ClientConfig, ClientError, SessionController};

/// Builder for configuring and connecting a client.
///
/// # Example
///
/// ```rust,ignore
/// use turnwire::prelude::*;
///
/// let client = TurnwireClient::builder()
///     .server_addr("127.0.0.1:9797")
///     .connect()
///     .await?;
/// client.controller().submit_user_name("alice").await?;
/// ```
pub struct TurnwireClientBuilder {
    config: ClientConfig,
}

impl TurnwireClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Sets the `host:port` to connect to.
    pub fn server_addr(mut self, addr: &str) -> Self {
        self.config.server_addr = addr.to_string();
        self
    }

    /// Sets how many bytes are read from the socket at a time.
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.config.read_buffer_size = size;
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Connects to the server and starts the receive task.
    pub async fn connect(self) -> Result<TurnwireClient, ClientError> {
        let conn = TcpConnection::connect_with_buffer(
            &self.config.server_addr,
            self.config.read_buffer_size,
        )
        .await?;
        tracing::info!(peer = %conn.peer_addr(), "connected to game server");

        let controller = Arc::new(SessionController::new(conn));
        let receiver = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.run().await })
        };

        Ok(TurnwireClient {
            controller,
            receiver: Some(receiver),
        })
    }
}

impl Default for TurnwireClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A connected client.
///
/// Inbound messages are applied in the background; watch them with
/// [`SessionController::subscribe`] and send user intents through
/// [`controller()`](Self::controller).
pub struct TurnwireClient {
    controller: Arc<SessionController<TcpConnection>>,
    receiver: Option<JoinHandle<()>>,
}

impl TurnwireClient {
    /// Creates a new builder.
    pub fn builder() -> TurnwireClientBuilder {
        TurnwireClientBuilder::new()
    }

    /// The controller driving this session.
    pub fn controller(&self) -> &Arc<SessionController<TcpConnection>> {
        &self.controller
    }

    /// Returns `true` once the receive task has stopped, which happens
    /// when the server closes the connection or it fails.
    pub fn is_finished(&self) -> bool {
        self.receiver.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Waits until the receive task stops.
    pub async fn closed(mut self) {
        if let Some(receiver) = self.receiver.take() {
            if let Err(e) = receiver.await {
                tracing::error!(error = %e, "receive task failed");
            }
        }
    }
}

impl Drop for TurnwireClient {
    fn drop(&mut self) {
        if let Some(receiver) = &self.receiver {
            receiver.abort();
        }
    }
}
