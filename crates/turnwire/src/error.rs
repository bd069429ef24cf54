//! Unified error type for the Turnwire client.

use turnwire_protocol::ProtocolError;
use turnwire_transport::TransportError;

use crate::InputError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `turnwire` crate you deal with this single error type
/// instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant generates the `From` impl, so `?` converts
/// sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A transport-level error (connect, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The user typed something that isn't valid here.
    #[error(transparent)]
    Input(#[from] InputError),
}
