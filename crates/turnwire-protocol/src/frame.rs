//! Frame envelope and streaming reassembly.
//!
//! Frame format:
//! ```text
//! fixed-size tags:     +-----+---------------------------+
//!                      | tag | payload (fixed for tag)   |
//!                      +-----+---------------------------+
//!
//! variable-size tags:  +-----+--------------+-------------------+
//!                      | tag | len (u16 BE) | payload (len)     |
//!                      +-----+--------------+-------------------+
//! ```
//!
//! A stream transport delivers bytes in arbitrary chunks, so a frame may
//! arrive split at any byte or glued to its neighbours. [`FrameAssembler`]
//! buffers input and only hands out frames whose bytes have all arrived.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::message::{layout_for, PayloadLayout};
use crate::{DecodeError, Message, ProtocolError};

/// Size of the length field used by variable-size frames.
pub const LENGTH_FIELD_SIZE: usize = 2;

/// One complete `(tag, payload)` unit extracted from the byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub tag: u8,
    pub payload: Bytes,
}

impl Frame {
    /// Creates a frame with the given tag and payload.
    pub fn new(tag: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            tag,
            payload: payload.into(),
        }
    }

    /// Total bytes this frame occupies on the wire.
    pub fn encoded_size(&self) -> usize {
        match layout_for(self.tag) {
            PayloadLayout::Fixed(_) => 1 + self.payload.len(),
            PayloadLayout::Prefixed => 1 + LENGTH_FIELD_SIZE + self.payload.len(),
        }
    }

    /// Appends the wire form of this frame to `buf`.
    ///
    /// # Errors
    /// - [`ProtocolError::LengthMismatch`] if a fixed-size tag carries the
    ///   wrong number of payload bytes.
    /// - [`ProtocolError::PayloadTooLarge`] if a variable-size payload is
    ///   longer than `u16::MAX`.
    pub fn encode_into(&self, buf: &mut BytesMut) -> Result<(), ProtocolError> {
        match layout_for(self.tag) {
            PayloadLayout::Fixed(expected) => {
                if self.payload.len() != expected {
                    return Err(ProtocolError::LengthMismatch {
                        tag: self.tag,
                        expected,
                        actual: self.payload.len(),
                    });
                }
                buf.reserve(self.encoded_size());
                buf.put_u8(self.tag);
            }
            PayloadLayout::Prefixed => {
                let len = u16::try_from(self.payload.len()).map_err(|_| {
                    ProtocolError::PayloadTooLarge {
                        tag: self.tag,
                        len: self.payload.len(),
                    }
                })?;
                buf.reserve(self.encoded_size());
                buf.put_u8(self.tag);
                buf.put_u16(len);
            }
        }
        buf.put_slice(&self.payload);
        Ok(())
    }

    /// Decodes the payload into a typed [`Message`].
    pub fn decode(&self) -> Result<Message, DecodeError> {
        Message::decode(self.tag, &self.payload)
    }
}

// ---------------------------------------------------------------------------
// FrameAssembler
// ---------------------------------------------------------------------------

/// Reassembles frames from a fragmented byte stream.
///
/// Feed it with [`push`](Self::push) whenever the transport delivers
/// bytes, then pull frames with [`next_frame`](Self::next_frame) (or
/// iterate with [`drain`](Self::drain)) until it returns `None`. Leftover
/// bytes of an incomplete frame stay buffered for the next push.
#[derive(Debug, Default)]
pub struct FrameAssembler {
    buffer: BytesMut,
}

impl FrameAssembler {
    /// Creates an empty assembler.
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Creates an empty assembler with the given initial buffer capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Appends newly received bytes.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Removes and returns the next complete frame, or `None` if more data
    /// is needed.
    pub fn next_frame(&mut self) -> Option<Frame> {
        let tag = *self.buffer.first()?;

        let (header_len, payload_len) = match layout_for(tag) {
            PayloadLayout::Fixed(n) => (1, n),
            PayloadLayout::Prefixed => {
                let header_len = 1 + LENGTH_FIELD_SIZE;
                if self.buffer.len() < header_len {
                    return None;
                }
                let len = u16::from_be_bytes([self.buffer[1], self.buffer[2]]);
                (header_len, usize::from(len))
            }
        };

        if self.buffer.len() < header_len + payload_len {
            return None;
        }

        self.buffer.advance(header_len);
        let payload = self.buffer.split_to(payload_len).freeze();
        Some(Frame { tag, payload })
    }

    /// Returns an iterator that yields every complete frame currently
    /// buffered.
    pub fn drain(&mut self) -> Drain<'_> {
        Drain { assembler: self }
    }

    /// Number of bytes buffered but not yet returned as frames.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Discards all buffered bytes.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

/// Iterator returned by [`FrameAssembler::drain`].
pub struct Drain<'a> {
    assembler: &'a mut FrameAssembler,
}

impl Iterator for Drain<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        self.assembler.next_frame()
    }
}
