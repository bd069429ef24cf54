//! Integration tests: raw bytes through the frame assembler and the
//! dispatcher into session state.

use turnwire_game::{Outcome, Phase};
use turnwire_protocol::{FrameAssembler, Message, PlayerId};
use turnwire_session::{dispatch, SessionState, Status};

// =========================================================================
// Helpers
// =========================================================================

fn wire(messages: &[Message]) -> Vec<u8> {
    messages
        .iter()
        .flat_map(|m| m.encode().unwrap().to_vec())
        .collect()
}

/// Feeds `bytes` to a fresh assembler in `chunk`-sized pieces, applying
/// every completed frame.
fn feed(state: &mut SessionState, bytes: &[u8], chunk: usize) {
    let mut assembler = FrameAssembler::new();
    for piece in bytes.chunks(chunk) {
        assembler.push(piece);
        for frame in assembler.drain() {
            dispatch::apply_frame(&frame, state);
        }
    }
}

fn game_data(max_players: u8, max_move: u8, board_size: u8) -> Message {
    Message::GameData {
        max_players,
        max_move,
        board_size,
    }
}

// =========================================================================
// Tests
// =========================================================================

#[test]
fn test_full_game_scenario_local_player_wins() {
    let mut messages = vec![
        Message::ServerWelcome { player_id: PlayerId(1) },
        game_data(2, 3, 9),
        Message::AddPlayer {
            player_id: PlayerId(1),
            name: "alice".into(),
        },
        Message::AddPlayer {
            player_id: PlayerId(2),
            name: "bob".into(),
        },
    ];
    for i in 0..9u8 {
        let mover = PlayerId(1 + i % 2);
        messages.push(Message::SetActivePlayer { player_id: mover });
        messages.push(Message::MovePlayer {
            player_id: mover,
            value: 1 + i % 3,
        });
    }
    // Player 1 made the ninth move; the server hands the turn to 2.
    messages.push(Message::SetActivePlayer { player_id: PlayerId(2) });

    let mut state = SessionState::new();
    state.set_user_name("alice");
    feed(&mut state, &wire(&messages), 3);

    let game = state.game().expect("game should exist");
    assert_eq!(game.board().len(), 9);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.active_player(), PlayerId(2));
    assert_eq!(game.outcome_for(state.user_id()), Some(Outcome::Won));
    assert_eq!(state.snapshot().status(), Status::GameOver(Outcome::Won));
}

#[test]
fn test_scenario_phases_step_by_step() {
    let mut state = SessionState::new();

    dispatch::apply(game_data(2, 3, 9), &mut state);
    assert_eq!(state.phase(), Phase::AwaitingPlayers);
    assert!(state.game().unwrap().board().is_empty());

    dispatch::apply(Message::SetActivePlayer { player_id: PlayerId(1) }, &mut state);
    assert_eq!(state.phase(), Phase::InTurn);
    assert_eq!(state.game().unwrap().active_player(), PlayerId(1));
}

#[test]
fn test_second_game_data_discards_players_and_board() {
    let messages = [
        game_data(2, 3, 9),
        Message::AddPlayer {
            player_id: PlayerId(1),
            name: "A".into(),
        },
        Message::SetActivePlayer { player_id: PlayerId(1) },
        Message::MovePlayer {
            player_id: PlayerId(1),
            value: 2,
        },
        game_data(2, 3, 9),
    ];

    let mut state = SessionState::new();
    feed(&mut state, &wire(&messages), 64);

    let game = state.game().unwrap();
    assert_eq!(game.player_count(), 0);
    assert!(game.board().is_empty());
    assert_eq!(game.phase(), Phase::AwaitingPlayers);
}

#[test]
fn test_identity_survives_game_reset() {
    let messages = [
        Message::ServerWelcome { player_id: PlayerId(7) },
        game_data(2, 3, 9),
        game_data(4, 5, 6),
    ];
    let mut state = SessionState::new();
    state.set_user_name("zed");
    feed(&mut state, &wire(&messages), 1);

    assert_eq!(state.user_id(), PlayerId(7));
    assert_eq!(state.user_name(), Some("zed"));
    assert_eq!(state.game().unwrap().max_players(), 4);
}

#[test]
fn test_out_of_turn_moves_never_grow_board() {
    let mut messages = vec![
        game_data(3, 3, 9),
        Message::SetActivePlayer { player_id: PlayerId(2) },
    ];
    for id in [0u8, 1, 3, 255] {
        messages.push(Message::MovePlayer {
            player_id: PlayerId(id),
            value: 1,
        });
    }
    let mut state = SessionState::new();
    feed(&mut state, &wire(&messages), 2);
    assert_eq!(state.game().unwrap().board().len(), 0);
}

#[test]
fn test_unknown_tag_between_valid_frames_is_skipped() {
    let mut bytes = wire(&[game_data(2, 3, 9)]);
    bytes.extend_from_slice(&[0xFF, 0, 4, 0xDE, 0xAD, 0xBE, 0xEF]);
    bytes.extend(wire(&[Message::AddPlayer {
        player_id: PlayerId(2),
        name: "bob".into(),
    }]));

    let mut state = SessionState::new();
    feed(&mut state, &bytes, 5);

    let game = state.game().unwrap();
    assert_eq!(game.player_name(PlayerId(2)), Some("bob"));
    assert_eq!(game.player_count(), 1);
}

#[test]
fn test_unknown_tag_alone_leaves_state_unchanged() {
    let mut state = SessionState::new();
    let before = state.snapshot();
    feed(&mut state, &[0xFF, 0, 2, 1, 2], 1);
    assert_eq!(state.snapshot(), before);
}
