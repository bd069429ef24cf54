//! Error types for the protocol layer.
//!
//! Decoding and encoding fail for different reasons and are handled at
//! different places, so they get separate enums. A [`DecodeError`] is
//! never fatal: the receive loop logs it, drops the frame, and keeps
//! going. A [`ProtocolError`] is returned to whoever tried to send.

/// Errors produced while turning a `(tag, payload)` frame into a
/// [`Message`](crate::Message).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The payload is shorter than the message type's minimum size.
    #[error("truncated payload for tag {tag}: expected at least {expected} bytes, got {actual}")]
    Truncated {
        tag: u8,
        expected: usize,
        actual: usize,
    },

    /// The tag byte does not name any known message type.
    #[error("unknown message tag 0x{0:02X}")]
    UnknownTag(u8),
}

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A variable-length payload does not fit the 16-bit length field.
    #[error("payload for tag {tag} is {len} bytes (max {max})", max = u16::MAX)]
    PayloadTooLarge { tag: u8, len: usize },

    /// A frame for a fixed-size message type carries the wrong number of
    /// payload bytes.
    #[error("payload for tag {tag} must be {expected} bytes, got {actual}")]
    LengthMismatch {
        tag: u8,
        expected: usize,
        actual: usize,
    },

    /// Decoding a frame failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
