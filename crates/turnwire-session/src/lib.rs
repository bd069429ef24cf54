//! Session state and message dispatch for Turnwire.
//!
//! This crate owns the client's view of the world:
//!
//! 1. **Identity**: the id the server assigned and the name the user typed
//! 2. **Game**: the current [`GameData`](turnwire_game::GameData), if any
//! 3. **Link**: whether the transport is still up ([`LinkState`])
//!
//! and the [`dispatch`] functions that apply inbound messages to it.
//!
//! # How it fits in the stack
//!
//! ```text
//! Controller (above)  ← locks SessionState, feeds it frames, publishes snapshots
//!     ↕
//! Session Layer (this crate)  ← applies messages to identity and game state
//!     ↕
//! Protocol + Game (below)  ← provide Message/Frame and GameData
//! ```

pub mod dispatch;
mod error;
mod session;

pub use error::SessionError;
pub use session::{LinkState, SessionState, Snapshot, Status};
