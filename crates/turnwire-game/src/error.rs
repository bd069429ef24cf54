//! Error types for the game layer.

use turnwire_protocol::PlayerId;

use crate::Phase;

/// Reasons a move reported by the server is not applied to the board.
///
/// None of these are fatal. The client trusts the server, so a rejected
/// move usually means the two have drifted apart; the dispatcher logs it
/// and carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The game is not in a phase that takes moves.
    #[error("moves are not accepted in phase {0}")]
    NotInTurn(Phase),

    /// The mover is not the player whose turn it is.
    #[error("player {player} moved out of turn (active: {active})")]
    NotActivePlayer { player: PlayerId, active: PlayerId },

    /// The board already holds `capacity` moves.
    #[error("board is full ({capacity} moves)")]
    BoardFull { capacity: u8 },
}
