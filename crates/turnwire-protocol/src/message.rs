//! Message types and the binary wire codec.
//!
//! Every message on the wire is a one-byte tag followed by a payload.
//! Most payloads are a handful of single bytes, so there is no endianness
//! to worry about and no self-describing format like JSON. The only
//! variable-size payloads are the ones carrying a player name; those get a
//! length field in the frame envelope (see [`frame`](crate::frame)).
//!
//! ```text
//! tag  variant          payload
//! ---  ---------------  ------------------------------------------
//!  0   UserName         name (UTF-8)
//!  1   ServerWelcome    player_id
//!  2   AddPlayer        player_id, name (UTF-8)
//!  3   SetActivePlayer  player_id
//!  4   GameData         max_players, max_move, board_size
//!  5   MovePlayer       player_id, value
//!  6   PlayerMove       value                       (client → server)
//! ```

use std::fmt;

use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::{DecodeError, Frame, ProtocolError};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A player identifier assigned by the server.
///
/// Newtype over the single wire byte so a player id can't be mixed up
/// with a move value or a board size, which are also bare `u8`s.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Sentinel meaning "no player assigned yet". Used for the local user
    /// before `ServerWelcome` arrives and for the active player before the
    /// first `SetActivePlayer`.
    pub const UNASSIGNED: PlayerId = PlayerId(u8::MAX);

    /// Returns `true` unless this is [`PlayerId::UNASSIGNED`].
    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// MessageTag
// ---------------------------------------------------------------------------

/// How the payload length of a frame is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadLayout {
    /// The payload is always exactly this many bytes.
    Fixed(usize),
    /// The payload length is carried in a big-endian `u16` after the tag.
    Prefixed,
}

/// The type byte at the start of every frame.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageTag {
    UserName = 0,
    ServerWelcome = 1,
    AddPlayer = 2,
    SetActivePlayer = 3,
    GameData = 4,
    MovePlayer = 5,
    PlayerMove = 6,
}

impl MessageTag {
    /// Converts from the wire byte, returning `None` for unknown tags.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::UserName),
            1 => Some(Self::ServerWelcome),
            2 => Some(Self::AddPlayer),
            3 => Some(Self::SetActivePlayer),
            4 => Some(Self::GameData),
            5 => Some(Self::MovePlayer),
            6 => Some(Self::PlayerMove),
            _ => None,
        }
    }

    /// The payload layout for this message type.
    pub fn layout(self) -> PayloadLayout {
        match self {
            Self::UserName | Self::AddPlayer => PayloadLayout::Prefixed,
            Self::ServerWelcome | Self::SetActivePlayer | Self::PlayerMove => {
                PayloadLayout::Fixed(1)
            }
            Self::MovePlayer => PayloadLayout::Fixed(2),
            Self::GameData => PayloadLayout::Fixed(3),
        }
    }

    /// Smallest payload that decodes successfully.
    pub fn min_payload_len(self) -> usize {
        match self {
            Self::UserName => 0,
            Self::AddPlayer => 1,
            other => match other.layout() {
                PayloadLayout::Fixed(n) => n,
                PayloadLayout::Prefixed => 0,
            },
        }
    }
}

/// The payload layout for a raw tag byte.
///
/// Unknown tags are treated as length-prefixed. That keeps the frame
/// assembler in step with the stream when a newer server sends a message
/// type this client doesn't know; the frame is then dropped at decode time.
pub fn layout_for(tag: u8) -> PayloadLayout {
    MessageTag::from_u8(tag).map_or(PayloadLayout::Prefixed, MessageTag::layout)
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A typed application message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Client → server: "this is my name". The server may echo it back.
    UserName { name: String },

    /// Server → client: the id the server assigned to this client.
    ServerWelcome { player_id: PlayerId },

    /// Server → client: a player joined (or was renamed).
    AddPlayer { player_id: PlayerId, name: String },

    /// Server → client: whose move is expected next.
    SetActivePlayer { player_id: PlayerId },

    /// Server → client: parameters of a new game. Resets all game state.
    GameData {
        max_players: u8,
        max_move: u8,
        board_size: u8,
    },

    /// Server → client: a player made a move.
    MovePlayer { player_id: PlayerId, value: u8 },

    /// Client → server: the local player's move.
    PlayerMove { value: u8 },
}

impl Message {
    /// The tag this message is sent under.
    pub fn tag(&self) -> MessageTag {
        match self {
            Self::UserName { .. } => MessageTag::UserName,
            Self::ServerWelcome { .. } => MessageTag::ServerWelcome,
            Self::AddPlayer { .. } => MessageTag::AddPlayer,
            Self::SetActivePlayer { .. } => MessageTag::SetActivePlayer,
            Self::GameData { .. } => MessageTag::GameData,
            Self::MovePlayer { .. } => MessageTag::MovePlayer,
            Self::PlayerMove { .. } => MessageTag::PlayerMove,
        }
    }

    /// The bare payload bytes, without tag or length field.
    pub fn payload(&self) -> Vec<u8> {
        match self {
            Self::UserName { name } => name.as_bytes().to_vec(),
            Self::ServerWelcome { player_id }
            | Self::SetActivePlayer { player_id } => vec![player_id.0],
            Self::AddPlayer { player_id, name } => {
                let mut out = Vec::with_capacity(1 + name.len());
                out.push(player_id.0);
                out.extend_from_slice(name.as_bytes());
                out
            }
            Self::GameData {
                max_players,
                max_move,
                board_size,
            } => vec![*max_players, *max_move, *board_size],
            Self::MovePlayer { player_id, value } => vec![player_id.0, *value],
            Self::PlayerMove { value } => vec![*value],
        }
    }

    /// Wraps this message in a [`Frame`].
    pub fn to_frame(&self) -> Frame {
        Frame::new(self.tag() as u8, self.payload())
    }

    /// Encodes this message as one complete frame, ready to hand to the
    /// transport.
    ///
    /// # Errors
    /// Returns [`ProtocolError::PayloadTooLarge`] if a name is longer than
    /// the length field can describe.
    pub fn encode(&self) -> Result<Bytes, ProtocolError> {
        let mut buf = BytesMut::new();
        self.encode_into(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Appends this message's frame to `buf`.
    pub fn encode_into(&self, buf: &mut BytesMut) -> Result<(), ProtocolError> {
        self.to_frame().encode_into(buf)
    }

    /// Decodes a payload received under `tag`.
    ///
    /// Bytes past the end of a fixed-size layout are ignored. Names are
    /// decoded lossily: invalid UTF-8 becomes U+FFFD rather than failing
    /// the whole message.
    ///
    /// # Errors
    /// - [`DecodeError::UnknownTag`] if `tag` is not a known message type.
    /// - [`DecodeError::Truncated`] if `payload` is too short.
    pub fn decode(tag: u8, payload: &[u8]) -> Result<Self, DecodeError> {
        let kind = MessageTag::from_u8(tag).ok_or(DecodeError::UnknownTag(tag))?;

        let expected = kind.min_payload_len();
        if payload.len() < expected {
            return Err(DecodeError::Truncated {
                tag,
                expected,
                actual: payload.len(),
            });
        }

        let message = match kind {
            MessageTag::UserName => Self::UserName {
                name: String::from_utf8_lossy(payload).into_owned(),
            },
            MessageTag::ServerWelcome => Self::ServerWelcome {
                player_id: PlayerId(payload[0]),
            },
            MessageTag::AddPlayer => Self::AddPlayer {
                player_id: PlayerId(payload[0]),
                name: String::from_utf8_lossy(&payload[1..]).into_owned(),
            },
            MessageTag::SetActivePlayer => Self::SetActivePlayer {
                player_id: PlayerId(payload[0]),
            },
            MessageTag::GameData => Self::GameData {
                max_players: payload[0],
                max_move: payload[1],
                board_size: payload[2],
            },
            MessageTag::MovePlayer => Self::MovePlayer {
                player_id: PlayerId(payload[0]),
                value: payload[1],
            },
            MessageTag::PlayerMove => Self::PlayerMove { value: payload[0] },
        };
        Ok(message)
    }
}

// =========================================================================
// Tests
// =========================================================================
