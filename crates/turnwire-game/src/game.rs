//! `GameData`: the client's mirror of one server-run game.
//!
//! The server is authoritative. This type only enforces what the client
//! can check cheaply and must never get wrong locally: the board never
//! exceeds its capacity, and a move is only recorded for the player whose
//! turn it is. Move values are not checked against `max_move`.

use serde::{Deserialize, Serialize};
use turnwire_protocol::PlayerId;

use crate::{BoardEntry, GameBoard, GameError, Phase};

/// A player who joined the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub id: PlayerId,
    pub name: String,
}

/// How the game ended for the local user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Parameters and progress of the current game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameData {
    max_players: u8,
    max_move: u8,
    board_size: u8,
    active_player: PlayerId,
    /// Join order is preserved; a rename keeps the original slot.
    players: Vec<PlayerEntry>,
    board: GameBoard,
    phase: Phase,
}

impl GameData {
    /// Starts a fresh game: empty board, no players, no active player.
    pub fn new(max_players: u8, max_move: u8, board_size: u8) -> Self {
        Self {
            max_players,
            max_move,
            board_size,
            active_player: PlayerId::UNASSIGNED,
            players: Vec::new(),
            board: GameBoard::new(board_size),
            phase: Phase::AwaitingPlayers,
        }
    }

    // -- Accessors --

    pub fn max_players(&self) -> u8 {
        self.max_players
    }

    pub fn max_move(&self) -> u8 {
        self.max_move
    }

    pub fn board_size(&self) -> u8 {
        self.board_size
    }

    pub fn active_player(&self) -> PlayerId {
        self.active_player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    /// Players in join order.
    pub fn players(&self) -> &[PlayerEntry] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Looks up a player's name by id.
    pub fn player_name(&self, id: PlayerId) -> Option<&str> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }

    /// `true` once `max_players` players have joined.
    pub fn is_lobby_full(&self) -> bool {
        self.players.len() >= usize::from(self.max_players)
    }

    /// Moves left before the board fills.
    pub fn moves_remaining(&self) -> usize {
        self.board.remaining()
    }

    // -- Transitions --

    /// Records a player joining, or renames an existing one.
    ///
    /// Returns the previous name if the id was already known. Never
    /// changes the phase.
    pub fn add_player(&mut self, id: PlayerId, name: impl Into<String>) -> Option<String> {
        let name = name.into();
        if let Some(existing) = self.players.iter_mut().find(|p| p.id == id) {
            return Some(std::mem::replace(&mut existing.name, name));
        }
        tracing::info!(player_id = %id, %name, "player joined");
        self.players.push(PlayerEntry { id, name });
        None
    }

    /// Hands the turn to `id`.
    ///
    /// The phase becomes `InTurn` while the board has room, and
    /// `GameOver` once it is full.
    pub fn set_active_player(&mut self, id: PlayerId) {
        self.active_player = id;
        self.phase = if self.board.is_full() {
            Phase::GameOver
        } else {
            Phase::InTurn
        };
    }

    /// Applies a move reported by the server.
    ///
    /// # Errors
    /// - [`GameError::BoardFull`] if the board is at capacity.
    /// - [`GameError::NotInTurn`] if no turn is in progress.
    /// - [`GameError::NotActivePlayer`] if `id` is not the active player.
    ///
    /// On error the game is left untouched.
    pub fn move_player(&mut self, id: PlayerId, value: u8) -> Result<(), GameError> {
        if self.board.is_full() {
            return Err(GameError::BoardFull {
                capacity: self.board_size,
            });
        }
        if !self.phase.accepts_moves() {
            return Err(GameError::NotInTurn(self.phase));
        }
        if id != self.active_player {
            return Err(GameError::NotActivePlayer {
                player: id,
                active: self.active_player,
            });
        }

        self.board.push(BoardEntry {
            player_id: id,
            value,
        })?;

        if self.board.is_full() {
            self.phase = Phase::GameOver;
            tracing::info!(
                moves = self.board.len(),
                last_mover = %id,
                "board full, game over"
            );
        }
        Ok(())
    }

    /// `true` exactly when the board holds `board_size` moves.
    pub fn is_game_over(&self) -> bool {
        self.board.is_full()
    }

    /// The result for `local`, once the game is over.
    ///
    /// The local user has won when they are *not* the active player: the
    /// player left holding the turn on a full board is the one who lost.
    pub fn outcome_for(&self, local: PlayerId) -> Option<Outcome> {
        if !self.is_game_over() {
            return None;
        }
        Some(if self.active_player != local {
            Outcome::Won
        } else {
            Outcome::Lost
        })
    }

    /// `true` when the game is running and it is `local`'s move.
    pub fn is_turn_of(&self, local: PlayerId) -> bool {
        self.phase.accepts_moves() && self.active_player == local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(board_size: u8) -> GameData {
        let mut game = GameData::new(2, 3, board_size);
        game.set_active_player(PlayerId(1));
        game
    }

    #[test]
    fn test_new_game_awaits_players() {
        let game = GameData::new(2, 3, 9);
        assert_eq!(game.phase(), Phase::AwaitingPlayers);
        assert_eq!(game.active_player(), PlayerId::UNASSIGNED);
        assert!(game.board().is_empty());
        assert_eq!(game.player_count(), 0);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_add_player_keeps_join_order() {
        let mut game = GameData::new(3, 3, 9);
        assert_eq!(game.add_player(PlayerId(2), "bob"), None);
        assert_eq!(game.add_player(PlayerId(1), "alice"), None);

        let ids: Vec<_> = game.players().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PlayerId(2), PlayerId(1)]);
        assert_eq!(game.player_name(PlayerId(1)), Some("alice"));
        assert_eq!(game.player_name(PlayerId(3)), None);
    }

    #[test]
    fn test_add_player_overwrites_in_place() {
        let mut game = GameData::new(2, 3, 9);
        game.add_player(PlayerId(1), "alice");
        game.add_player(PlayerId(2), "bob");

        let previous = game.add_player(PlayerId(1), "alicia");
        assert_eq!(previous.as_deref(), Some("alice"));
        assert_eq!(game.player_count(), 2);
        assert_eq!(game.players()[0].name, "alicia");
    }

    #[test]
    fn test_add_player_does_not_change_phase() {
        let mut game = GameData::new(2, 3, 9);
        game.add_player(PlayerId(1), "a");
        assert_eq!(game.phase(), Phase::AwaitingPlayers);

        game.set_active_player(PlayerId(1));
        game.add_player(PlayerId(2), "b");
        assert_eq!(game.phase(), Phase::InTurn);
    }

    #[test]
    fn test_lobby_full() {
        let mut game = GameData::new(2, 3, 9);
        game.add_player(PlayerId(1), "a");
        assert!(!game.is_lobby_full());
        game.add_player(PlayerId(2), "b");
        assert!(game.is_lobby_full());
    }

    #[test]
    fn test_set_active_player_starts_turn_on_empty_board() {
        let game = started(9);
        assert_eq!(game.phase(), Phase::InTurn);
        assert_eq!(game.active_player(), PlayerId(1));
    }

    #[test]
    fn test_move_before_any_turn_is_rejected() {
        let mut game = GameData::new(2, 3, 9);
        let err = game.move_player(PlayerId::UNASSIGNED, 1).unwrap_err();
        assert_eq!(err, GameError::NotInTurn(Phase::AwaitingPlayers));
        assert!(game.board().is_empty());
    }

    #[test]
    fn test_move_by_active_player_is_recorded() {
        let mut game = started(9);
        game.move_player(PlayerId(1), 2).unwrap();
        assert_eq!(game.board().len(), 1);
        assert_eq!(game.moves_remaining(), 8);
    }

    #[test]
    fn test_move_out_of_turn_is_rejected() {
        let mut game = started(9);
        let err = game.move_player(PlayerId(2), 1).unwrap_err();
        assert_eq!(
            err,
            GameError::NotActivePlayer {
                player: PlayerId(2),
                active: PlayerId(1)
            }
        );
        assert!(game.board().is_empty());
    }

    #[test]
    fn test_move_value_is_not_checked_against_max_move() {
        let mut game = started(9);
        game.move_player(PlayerId(1), 200).unwrap();
        assert_eq!(game.board().moves()[0].value, 200);
    }

    #[test]
    fn test_filling_move_ends_game() {
        let mut game = started(2);
        game.move_player(PlayerId(1), 1).unwrap();
        assert_eq!(game.phase(), Phase::InTurn);
        game.move_player(PlayerId(1), 1).unwrap();
        assert_eq!(game.phase(), Phase::GameOver);
        assert!(game.is_game_over());

        let err = game.move_player(PlayerId(1), 1).unwrap_err();
        assert_eq!(err, GameError::BoardFull { capacity: 2 });
    }

    #[test]
    fn test_set_active_player_on_full_board_stays_over() {
        let mut game = started(1);
        game.move_player(PlayerId(1), 3).unwrap();
        game.set_active_player(PlayerId(2));
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.active_player(), PlayerId(2));
    }

    #[test]
    fn test_outcome_uses_current_active_player() {
        let mut game = started(1);
        assert_eq!(game.outcome_for(PlayerId(1)), None);

        game.move_player(PlayerId(1), 3).unwrap();
        // Player 1 still holds the turn on a full board.
        assert_eq!(game.outcome_for(PlayerId(1)), Some(Outcome::Lost));
        assert_eq!(game.outcome_for(PlayerId(2)), Some(Outcome::Won));

        game.set_active_player(PlayerId(2));
        assert_eq!(game.outcome_for(PlayerId(1)), Some(Outcome::Won));
        assert_eq!(game.outcome_for(PlayerId(2)), Some(Outcome::Lost));
    }

    #[test]
    fn test_is_turn_of() {
        let mut game = started(1);
        assert!(game.is_turn_of(PlayerId(1)));
        assert!(!game.is_turn_of(PlayerId(2)));
        game.move_player(PlayerId(1), 1).unwrap();
        assert!(!game.is_turn_of(PlayerId(1)));
    }

    #[test]
    fn test_game_data_serializes_for_presentation() {
        let mut game = started(9);
        game.add_player(PlayerId(1), "alice");
        game.move_player(PlayerId(1), 2).unwrap();

        let json = serde_json::to_value(&game).unwrap();
        assert_eq!(json["board_size"], 9);
        assert_eq!(json["active_player"], 1);
        assert_eq!(json["phase"], "InTurn");
        assert_eq!(json["players"][0]["name"], "alice");
        assert_eq!(json["board"]["moves"][0]["value"], 2);
    }
}
