//! Wire protocol for Turnwire.
//!
//! This crate defines the "language" the client and the game server speak:
//!
//! - **Messages** ([`Message`], [`MessageTag`], [`PlayerId`]): the typed
//!   application messages and their binary payloads.
//! - **Frames** ([`Frame`], [`FrameAssembler`], [`frame_stream`]): how
//!   messages are delimited on a byte stream and put back together when
//!   the transport splits them.
//! - **Errors** ([`DecodeError`], [`ProtocolError`]).
//!
//! # Architecture
//!
//! ```text
//! Transport (byte chunks) → FrameAssembler (Frame) → Message::decode (Message)
//! ```
//!
//! The protocol layer knows nothing about game rules or sessions; it only
//! turns bytes into messages and back.

mod error;
pub mod frame;
mod message;
mod stream;

pub use error::{DecodeError, ProtocolError};
pub use frame::{Frame, FrameAssembler};
pub use message::{layout_for, Message, MessageTag, PayloadLayout, PlayerId};
pub use stream::frame_stream;
