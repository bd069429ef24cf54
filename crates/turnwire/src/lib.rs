//! # Turnwire
//!
//! Client core for a turn-based, server-authoritative number game played
//! over a plain byte stream.
//!
//! The server owns the rules. This crate keeps the client's mirror of the
//! game in sync with the server's broadcasts and turns user input into
//! protocol messages. It does not draw anything; a presentation layer
//! subscribes to [`Snapshot`]s and calls back into the
//! [`SessionController`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use turnwire::prelude::*;
//!
//! # async fn demo() -> Result<(), ClientError> {
//! let client = TurnwireClient::builder()
//!     .server_addr("127.0.0.1:9797")
//!     .connect()
//!     .await?;
//!
//! let mut updates = client.controller().subscribe();
//! client.controller().submit_user_name("alice").await?;
//!
//! while updates.changed().await.is_ok() {
//!     let status = updates.borrow_and_update().status();
//!     if status == Status::YourTurn {
//!         client.controller().submit_move(2).await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod controller;
mod error;
mod input;

pub use client::{TurnwireClient, TurnwireClientBuilder};
pub use config::{ClientConfig, DEFAULT_SERVER_ADDR};
pub use controller::SessionController;
pub use error::ClientError;
pub use input::{InputError, parse_move, parse_user_name};

pub use turnwire_game::{BoardEntry, GameBoard, GameData, Outcome, Phase, PlayerEntry};
pub use turnwire_protocol::{Message, PlayerId};
pub use turnwire_session::{LinkState, Snapshot, Status};

/// Common imports for building a Turnwire front end.
pub mod prelude {
    pub use crate::{
        ClientConfig, ClientError, GameData, LinkState, Outcome, Phase, PlayerId,
        SessionController, Snapshot, Status, TurnwireClient, parse_move, parse_user_name,
    };
    pub use turnwire_transport::{Connection, MemoryConnection, TcpConnection, TransportError};
}
