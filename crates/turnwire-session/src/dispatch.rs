//! Message dispatcher: applies inbound messages to the session.
//!
//! Every inbound frame goes through here in arrival order. Nothing in
//! this module is fatal. A frame that can't be decoded or a message that
//! can't be applied is logged at debug level and dropped, and the caller
//! moves on to the next frame.

use turnwire_protocol::{Frame, Message, MessageTag};

use crate::{SessionError, SessionState};

/// Applies `message` to `state`, reporting why it was ignored if it was.
///
/// # Errors
/// - [`SessionError::NoGame`] for game messages that arrive before any
///   `GameData`.
/// - [`SessionError::Game`] when the game rejects a move.
/// - [`SessionError::UnexpectedMessage`] for client-only messages.
///
/// The state is unchanged whenever an error is returned.
pub fn try_apply(message: Message, state: &mut SessionState) -> Result<(), SessionError> {
    match message {
        Message::UserName { name } => {
            tracing::info!(%name, "server acknowledged user name");
        }
        Message::ServerWelcome { player_id } => {
            tracing::info!(%player_id, "server welcome");
            state.set_user_id(player_id);
        }
        Message::GameData {
            max_players,
            max_move,
            board_size,
        } => {
            tracing::info!(max_players, max_move, board_size, "new game");
            state.reset_game(max_players, max_move, board_size);
        }
        Message::AddPlayer { player_id, name } => {
            game_mut(state, MessageTag::AddPlayer)?.add_player(player_id, name);
        }
        Message::SetActivePlayer { player_id } => {
            tracing::debug!(%player_id, "active player");
            game_mut(state, MessageTag::SetActivePlayer)?.set_active_player(player_id);
        }
        Message::MovePlayer { player_id, value } => {
            tracing::debug!(%player_id, value, "move");
            game_mut(state, MessageTag::MovePlayer)?.move_player(player_id, value)?;
        }
        Message::PlayerMove { .. } => {
            return Err(SessionError::UnexpectedMessage(MessageTag::PlayerMove));
        }
    }
    Ok(())
}

/// Applies `message` to `state`, logging and dropping it if it doesn't
/// apply.
pub fn apply(message: Message, state: &mut SessionState) {
    let tag = message.tag();
    if let Err(e) = try_apply(message, state) {
        tracing::debug!(?tag, error = %e, "message ignored");
    }
}

/// Decodes `frame` and applies the message. Undecodable frames (unknown
/// tag, truncated payload) are logged and dropped.
pub fn apply_frame(frame: &Frame, state: &mut SessionState) {
    match frame.decode() {
        Ok(message) => apply(message, state),
        Err(e) => {
            tracing::debug!(
                tag = frame.tag,
                len = frame.payload.len(),
                error = %e,
                "dropping undecodable frame"
            );
        }
    }
}

fn game_mut(
    state: &mut SessionState,
    tag: MessageTag,
) -> Result<&mut turnwire_game::GameData, SessionError> {
    state.game_mut().ok_or(SessionError::NoGame(tag))
}
