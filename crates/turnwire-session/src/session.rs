//! Session types: everything the client knows about its own connection.
//!
//! A session tracks:
//! - WHO the local user is (`user_id` from the server, `user_name` typed
//!   by the user)
//! - WHAT game is running (`GameData`, replaced on every `GameData`
//!   message)
//! - WHETHER the transport is still up (`LinkState`)
//!
//! Identity outlives games: a new `GameData` message throws away the
//! board and player list but keeps `user_id` and `user_name`.

use serde::{Deserialize, Serialize};
use turnwire_game::{GameData, Outcome, Phase};
use turnwire_protocol::PlayerId;

// ---------------------------------------------------------------------------
// LinkState
// ---------------------------------------------------------------------------

/// The state of the transport as seen by the session.
///
/// ```text
///   Offline ──(attach)──→ Connected ──(EOF)───→ Closed
///                              └──────(error)──→ Failed
/// ```
///
/// There is no way back from `Closed` or `Failed`: the client does not
/// reconnect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LinkState {
    /// No transport attached.
    #[default]
    Offline,
    /// Transport attached and receiving.
    Connected,
    /// The peer closed the stream.
    Closed,
    /// The transport failed; the reason is kept for display.
    Failed(String),
}

impl LinkState {
    /// Returns `true` if outbound messages can be sent.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Returns `true` once the transport has gone away for good.
    pub fn is_down(&self) -> bool {
        matches!(self, Self::Closed | Self::Failed(_))
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// What the presentation layer should tell the user right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The connection is gone.
    Disconnected,
    /// Ask the user for a name.
    NeedUserName,
    /// Name sent, no game parameters from the server yet.
    WaitingForGame,
    /// It is the local user's move.
    YourTurn,
    /// A game is running and someone else is expected to act.
    WaitingForOpponent,
    /// The board is full.
    GameOver(Outcome),
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Mutable session state, owned by the session controller.
///
/// Not synchronized by itself; the controller keeps it behind a single
/// mutex so the network task and the input task never mutate it at the
/// same time.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    user_id: PlayerId,
    user_name: Option<String>,
    game: Option<GameData>,
    link: LinkState,
}

impl SessionState {
    /// Creates a session with no identity, no game and no transport.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_id(&self) -> PlayerId {
        self.user_id
    }

    pub fn set_user_id(&mut self, id: PlayerId) {
        self.user_id = id;
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn set_user_name(&mut self, name: impl Into<String>) {
        self.user_name = Some(name.into());
    }

    pub fn game(&self) -> Option<&GameData> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut GameData> {
        self.game.as_mut()
    }

    /// Discards any current game and starts a fresh one.
    pub fn reset_game(&mut self, max_players: u8, max_move: u8, board_size: u8) -> &mut GameData {
        self.game.insert(GameData::new(max_players, max_move, board_size))
    }

    /// The game phase, `NoSession` when there is no game.
    pub fn phase(&self) -> Phase {
        self.game.as_ref().map_or(Phase::NoSession, GameData::phase)
    }

    pub fn link(&self) -> &LinkState {
        &self.link
    }

    pub fn set_link(&mut self, link: LinkState) {
        self.link = link;
    }

    /// Copies the state out for the presentation layer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            user_id: self.user_id,
            user_name: self.user_name.clone(),
            game: self.game.clone(),
            link: self.link.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A read-only copy of the session, handed to the presentation layer
/// after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Snapshot {
    pub user_id: PlayerId,
    pub user_name: Option<String>,
    pub game: Option<GameData>,
    pub link: LinkState,
}

impl Snapshot {
    /// Decides what the user should be told.
    ///
    /// Checked in order: link down, missing name, missing game, game over,
    /// whose turn.
    pub fn status(&self) -> Status {
        if self.link.is_down() {
            return Status::Disconnected;
        }
        if self.user_name.is_none() {
            return Status::NeedUserName;
        }
        let Some(game) = &self.game else {
            return Status::WaitingForGame;
        };
        if let Some(outcome) = game.outcome_for(self.user_id) {
            return Status::GameOver(outcome);
        }
        if game.is_turn_of(self.user_id) {
            Status::YourTurn
        } else {
            Status::WaitingForOpponent
        }
    }

    /// The game phase, `NoSession` when there is no game.
    pub fn phase(&self) -> Phase {
        self.game.as_ref().map_or(Phase::NoSession, GameData::phase)
    }
}
