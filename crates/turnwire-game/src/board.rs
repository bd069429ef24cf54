//! The game board: an append-only, capacity-bounded list of moves.

use serde::{Deserialize, Serialize};
use turnwire_protocol::PlayerId;

use crate::GameError;

/// One applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardEntry {
    /// Who made the move.
    pub player_id: PlayerId,
    /// The value the player chose.
    pub value: u8,
}

/// Ordered moves, never more than `capacity` of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameBoard {
    capacity: u8,
    moves: Vec<BoardEntry>,
}

impl GameBoard {
    /// Creates an empty board that holds up to `capacity` moves.
    pub fn new(capacity: u8) -> Self {
        Self {
            capacity,
            moves: Vec::with_capacity(usize::from(capacity)),
        }
    }

    /// Appends a move.
    ///
    /// # Errors
    /// Returns [`GameError::BoardFull`] if the board is at capacity; the
    /// board is left unchanged.
    pub fn push(&mut self, entry: BoardEntry) -> Result<(), GameError> {
        if self.is_full() {
            return Err(GameError::BoardFull {
                capacity: self.capacity,
            });
        }
        self.moves.push(entry);
        Ok(())
    }

    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// `true` when the board holds exactly `capacity` moves.
    pub fn is_full(&self) -> bool {
        self.moves.len() == usize::from(self.capacity)
    }

    /// Moves still available before the board fills.
    pub fn remaining(&self) -> usize {
        usize::from(self.capacity) - self.moves.len()
    }

    /// The moves in the order they were applied.
    pub fn moves(&self) -> &[BoardEntry] {
        &self.moves
    }

    /// The most recent move, if any.
    pub fn last(&self) -> Option<&BoardEntry> {
        self.moves.last()
    }
}
