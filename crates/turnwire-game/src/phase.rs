//! Game phase state machine.

use serde::{Deserialize, Serialize};

/// The lifecycle phase of the local game mirror.
///
/// ```text
/// NoSession → AwaitingPlayers → InTurn → GameOver
///      ↑             ↑                      │
///      │             └────── GameData ──────┘
///   (no GameData received yet)
/// ```
///
/// - **NoSession**: The server hasn't sent game parameters yet.
/// - **AwaitingPlayers**: Parameters received, board empty, nobody has
///   been given the turn yet. Players may still be joining.
/// - **InTurn**: An active player is set and the board has room.
/// - **GameOver**: The board is full.
///
/// A `GameData` message resets to `AwaitingPlayers` from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Phase {
    #[default]
    NoSession,
    AwaitingPlayers,
    InTurn,
    GameOver,
}

impl Phase {
    /// Returns `true` if a game exists (anything but `NoSession`).
    pub fn has_game(&self) -> bool {
        !matches!(self, Self::NoSession)
    }

    /// Returns `true` if board moves are currently accepted.
    pub fn accepts_moves(&self) -> bool {
        matches!(self, Self::InTurn)
    }

    /// Returns `true` once the game has ended.
    pub fn is_over(&self) -> bool {
        matches!(self, Self::GameOver)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSession => write!(f, "NoSession"),
            Self::AwaitingPlayers => write!(f, "AwaitingPlayers"),
            Self::InTurn => write!(f, "InTurn"),
            Self::GameOver => write!(f, "GameOver"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_default_is_no_session() {
        assert_eq!(Phase::default(), Phase::NoSession);
    }

    #[test]
    fn test_phase_has_game() {
        assert!(!Phase::NoSession.has_game());
        assert!(Phase::AwaitingPlayers.has_game());
        assert!(Phase::InTurn.has_game());
        assert!(Phase::GameOver.has_game());
    }

    #[test]
    fn test_only_in_turn_accepts_moves() {
        assert!(!Phase::NoSession.accepts_moves());
        assert!(!Phase::AwaitingPlayers.accepts_moves());
        assert!(Phase::InTurn.accepts_moves());
        assert!(!Phase::GameOver.accepts_moves());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::AwaitingPlayers.to_string(), "AwaitingPlayers");
        assert_eq!(Phase::GameOver.to_string(), "GameOver");
    }
}
