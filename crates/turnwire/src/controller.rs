//! The session controller: the one object the presentation layer talks to.
//!
//! It owns the session state behind a lock, routes inbound bytes through
//! the frame assembler and the dispatcher, turns user intents into
//! outbound messages, and publishes a [`Snapshot`] after every change.
//!
//! Inbound data reaches the controller in one of two ways:
//!
//! - [`run`](SessionController::run) pulls frames from the connection
//!   until it closes. This is what [`TurnwireClient`](crate::TurnwireClient)
//!   spawns.
//! - [`on_bytes_received`](SessionController::on_bytes_received) and
//!   friends let an external event loop push data in.
//!
//! Use one or the other for a given connection, not both.

use std::fmt;
use std::pin::pin;
use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::{Mutex, watch};
use turnwire_game::GameData;
use turnwire_protocol::{Frame, FrameAssembler, Message, PlayerId, frame_stream};
use turnwire_session::{LinkState, SessionState, Snapshot, dispatch};
use turnwire_transport::{Connection, TransportError};

use crate::ClientError;

/// Serializes every state change for one game session.
///
/// Callers typically hold it in an `Arc` so the receive task and the
/// input loop can share it.
pub struct SessionController<C> {
    state: Mutex<SessionState>,
    assembler: Mutex<FrameAssembler>,
    conn: Option<Arc<C>>,
    updates: watch::Sender<Snapshot>,
}

impl<C> SessionController<C>
where
    C: Connection<Error = TransportError>,
{
    /// Creates a controller bound to an open connection.
    pub fn new(conn: C) -> Self {
        let mut state = SessionState::new();
        state.set_link(LinkState::Connected);
        tracing::debug!(conn = %conn.id(), "session controller attached");
        Self::with_state(state, Some(Arc::new(conn)))
    }

    /// Creates a controller with no transport. Outbound messages are
    /// dropped; inbound data can still be pushed in by hand.
    pub fn detached() -> Self {
        Self::with_state(SessionState::new(), None)
    }

    fn with_state(state: SessionState, conn: Option<Arc<C>>) -> Self {
        let (updates, _) = watch::channel(state.snapshot());
        Self {
            state: Mutex::new(state),
            assembler: Mutex::new(FrameAssembler::new()),
            conn,
            updates,
        }
    }

    /// Returns the underlying connection, if any.
    pub fn connection(&self) -> Option<&C> {
        self.conn.as_deref()
    }

    // -- Queries --------------------------------------------------------

    /// The name the user entered, or `None` before they entered one.
    pub async fn current_user_name(&self) -> Option<String> {
        self.state.lock().await.user_name().map(str::to_string)
    }

    /// A copy of the current game, or `None` before the first `GameData`.
    pub async fn current_game_data(&self) -> Option<GameData> {
        self.state.lock().await.game().cloned()
    }

    /// The id the server assigned us, or [`PlayerId::UNASSIGNED`].
    pub async fn local_user_id(&self) -> PlayerId {
        self.state.lock().await.user_id()
    }

    /// A point-in-time copy of everything the presentation layer renders.
    pub async fn snapshot(&self) -> Snapshot {
        self.state.lock().await.snapshot()
    }

    /// Returns a receiver that sees a fresh [`Snapshot`] after every
    /// state change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.updates.subscribe()
    }

    // -- Inbound --------------------------------------------------------

    /// Feeds a chunk of raw bytes from the transport. Every frame it
    /// completes is applied in order.
    ///
    /// Ignored once the link is closed or failed.
    pub async fn on_bytes_received(&self, bytes: &[u8]) {
        if self.state.lock().await.link().is_down() {
            tracing::debug!(len = bytes.len(), "link is down, inbound bytes dropped");
            return;
        }

        let frames: Vec<Frame> = {
            let mut assembler = self.assembler.lock().await;
            assembler.push(bytes);
            assembler.drain().collect()
        };
        if frames.is_empty() {
            return;
        }

        let mut state = self.state.lock().await;
        if state.link().is_down() {
            return;
        }
        for frame in &frames {
            dispatch::apply_frame(frame, &mut state);
        }
        self.publish(&state);
    }

    /// Applies one complete frame. Ignored once the link is closed or
    /// failed.
    pub async fn on_frame(&self, frame: &Frame) {
        let mut state = self.state.lock().await;
        if state.link().is_down() {
            tracing::debug!(tag = frame.tag, "link is down, inbound frame dropped");
            return;
        }
        dispatch::apply_frame(frame, &mut state);
        self.publish(&state);
    }

    /// The peer closed the stream.
    pub async fn on_stream_closed(&self) {
        tracing::info!("connection closed by server");
        self.set_link(LinkState::Closed).await;
        self.discard_partial_frame().await;
    }

    /// The transport failed.
    pub async fn on_stream_error(&self, error: impl fmt::Display) {
        tracing::warn!(error = %error, "connection failed");
        self.set_link(LinkState::Failed(error.to_string())).await;
        self.discard_partial_frame().await;
    }

    /// Reads frames from the connection and applies them until the
    /// connection closes or fails. Returns immediately for a detached
    /// controller.
    pub async fn run(&self) {
        let Some(conn) = self.conn.as_deref() else {
            return;
        };

        let mut frames = pin!(frame_stream(conn));
        while let Some(item) = frames.next().await {
            match item {
                Ok(frame) => self.on_frame(&frame).await,
                Err(e) => {
                    self.on_stream_error(&e).await;
                    return;
                }
            }
        }
        self.on_stream_closed().await;
    }

    // -- Outbound -------------------------------------------------------

    /// Records `name` as the local user's name and sends it to the
    /// server.
    ///
    /// The name is kept locally even when the link is down; only the
    /// send is skipped.
    ///
    /// # Errors
    /// - [`ClientError::Protocol`] if the name doesn't fit in a frame.
    ///   Nothing is recorded in that case.
    /// - [`ClientError::Transport`] if the send fails.
    pub async fn submit_user_name(&self, name: impl Into<String>) -> Result<(), ClientError> {
        let name = name.into();
        let message = Message::UserName { name: name.clone() };
        let bytes = message.encode()?;

        let connected = {
            let mut state = self.state.lock().await;
            state.set_user_name(name);
            self.publish(&state);
            state.link().is_connected()
        };

        self.send_bytes(connected, &bytes).await
    }

    /// Sends the user's chosen move to the server.
    ///
    /// The server decides whether it is legal; local state changes only
    /// when the server broadcasts the resulting `MovePlayer`.
    ///
    /// # Errors
    /// Returns [`ClientError::Transport`] if the send fails.
    pub async fn submit_move(&self, value: u8) -> Result<(), ClientError> {
        let bytes = Message::PlayerMove { value }.encode()?;
        let connected = self.state.lock().await.link().is_connected();
        self.send_bytes(connected, &bytes).await
    }

    /// Shuts down our sending side. The receive loop keeps going until the
    /// server closes its side.
    pub async fn close(&self) -> Result<(), ClientError> {
        if let Some(conn) = &self.conn {
            conn.close().await?;
        }
        Ok(())
    }

    // -- Internals ------------------------------------------------------

    async fn send_bytes(&self, connected: bool, bytes: &[u8]) -> Result<(), ClientError> {
        let Some(conn) = self.conn.as_deref() else {
            tracing::debug!("no transport, outbound message dropped");
            return Ok(());
        };
        if !connected {
            tracing::debug!(conn = %conn.id(), "link is down, outbound message dropped");
            return Ok(());
        }
        conn.send(bytes).await?;
        Ok(())
    }

    async fn set_link(&self, link: LinkState) {
        let mut state = self.state.lock().await;
        state.set_link(link);
        self.publish(&state);
    }

    async fn discard_partial_frame(&self) {
        let mut assembler = self.assembler.lock().await;
        if assembler.buffered_len() > 0 {
            tracing::debug!(
                leftover = assembler.buffered_len(),
                "discarding partial frame"
            );
            assembler.clear();
        }
    }

    fn publish(&self, state: &SessionState) {
        self.updates.send_replace(state.snapshot());
    }
}
