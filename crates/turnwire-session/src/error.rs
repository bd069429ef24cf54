//! Error types for the session layer.

use turnwire_game::GameError;
use turnwire_protocol::{DecodeError, MessageTag};

/// Reasons an inbound message could not be applied to the session.
///
/// The receive loop never stops for one of these; they exist so tests
/// and logs can say *why* a message was ignored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The frame could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A game message arrived before any `GameData`.
    #[error("{0:?} received before any game data")]
    NoGame(MessageTag),

    /// The game rejected the change (out of turn, board full, ...).
    #[error(transparent)]
    Game(#[from] GameError),

    /// A message that only ever travels client → server came inbound.
    #[error("unexpected inbound {0:?}")]
    UnexpectedMessage(MessageTag),
}
