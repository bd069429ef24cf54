//! Turn-based game state for Turnwire.
//!
//! The client keeps a local mirror of the game the server is running.
//! This crate holds that mirror and the rules for changing it.
//!
//! # Key types
//!
//! - [`GameData`]: parameters, players, active player and board
//! - [`GameBoard`]: the capacity-bounded list of applied moves
//! - [`Phase`]: lifecycle state machine
//! - [`GameError`]: why a reported move was not applied

mod board;
mod error;
mod game;
mod phase;

pub use board::{BoardEntry, GameBoard};
pub use error::GameError;
pub use game::{GameData, Outcome, PlayerEntry};
pub use phase::Phase;
