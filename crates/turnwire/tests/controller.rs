//! Integration tests for the session controller over an in-memory link.

use std::sync::Arc;
use std::time::Duration;

use turnwire::prelude::*;
use turnwire::Message;

// =========================================================================
// Helpers
// =========================================================================

const WAIT: Duration = Duration::from_secs(2);

fn encode(messages: &[Message]) -> Vec<u8> {
    messages
        .iter()
        .flat_map(|m| m.encode().unwrap().to_vec())
        .collect()
}

/// Connects a controller to a fake server and starts its receive loop.
fn start() -> (
    Arc<SessionController<MemoryConnection>>,
    MemoryConnection,
    tokio::task::JoinHandle<()>,
) {
    let (client, server) = MemoryConnection::pair();
    let controller = Arc::new(SessionController::new(client));
    let task = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.run().await })
    };
    (controller, server, task)
}

/// Waits until a published snapshot satisfies `pred`.
async fn wait_for(
    controller: &SessionController<MemoryConnection>,
    pred: impl Fn(&Snapshot) -> bool,
) -> Snapshot {
    let mut updates = controller.subscribe();
    tokio::time::timeout(WAIT, async {
        loop {
            {
                let snapshot = updates.borrow_and_update();
                if pred(&snapshot) {
                    return snapshot.clone();
                }
            }
            updates.changed().await.expect("controller dropped");
        }
    })
    .await
    .expect("timed out waiting for snapshot")
}

async fn recv_message(server: &MemoryConnection) -> Message {
    let bytes = tokio::time::timeout(WAIT, server.recv())
        .await
        .expect("timed out")
        .unwrap()
        .expect("client closed");
    let tag = bytes[0];
    let payload = match tag {
        0 | 2 => &bytes[3..],
        _ => &bytes[1..],
    };
    Message::decode(tag, payload).unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_full_game_through_controller() {
    let (controller, server, task) = start();

    controller.submit_user_name("alice").await.unwrap();
    assert_eq!(
        recv_message(&server).await,
        Message::UserName {
            name: "alice".into()
        }
    );

    let mut script = vec![
        Message::ServerWelcome { player_id: PlayerId(1) },
        Message::GameData {
            max_players: 2,
            max_move: 3,
            board_size: 9,
        },
        Message::AddPlayer {
            player_id: PlayerId(1),
            name: "alice".into(),
        },
        Message::AddPlayer {
            player_id: PlayerId(2),
            name: "bob".into(),
        },
        Message::SetActivePlayer { player_id: PlayerId(1) },
    ];
    server.send(&encode(&script)).await.unwrap();

    let snapshot = wait_for(&controller, |s| s.status() == Status::YourTurn).await;
    assert_eq!(snapshot.user_id, PlayerId(1));
    assert_eq!(snapshot.game.as_ref().unwrap().player_count(), 2);

    controller.submit_move(2).await.unwrap();
    assert_eq!(recv_message(&server).await, Message::PlayerMove { value: 2 });

    script.clear();
    for i in 0..9u8 {
        let mover = PlayerId(1 + i % 2);
        if i > 0 {
            script.push(Message::SetActivePlayer { player_id: mover });
        }
        script.push(Message::MovePlayer {
            player_id: mover,
            value: 1 + i % 3,
        });
    }
    script.push(Message::SetActivePlayer { player_id: PlayerId(2) });

    // One byte at a time, to exercise reassembly across reads.
    for byte in encode(&script) {
        server.send(&[byte]).await.unwrap();
    }

    // The turn passes to player 2 only after the board fills, so the
    // outcome flips from Lost to Won on the last frame.
    let snapshot = wait_for(&controller, |s| {
        s.game.as_ref().is_some_and(|g| g.active_player() == PlayerId(2) && g.is_game_over())
    })
    .await;
    assert_eq!(snapshot.status(), Status::GameOver(Outcome::Won));
    assert_eq!(snapshot.phase(), Phase::GameOver);
    assert_eq!(snapshot.game.as_ref().unwrap().board().len(), 9);

    server.close().await.unwrap();
    tokio::time::timeout(WAIT, task).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_server_close_marks_disconnected_and_drops_sends() {
    let (controller, server, task) = start();

    server.close().await.unwrap();
    tokio::time::timeout(WAIT, task).await.unwrap().unwrap();

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.link, LinkState::Closed);
    assert_eq!(snapshot.status(), Status::Disconnected);

    // Sends after the link is gone are dropped, not errors.
    controller.submit_move(1).await.unwrap();
    controller.submit_user_name("late").await.unwrap();
    assert_eq!(controller.current_user_name().await.as_deref(), Some("late"));
}

#[tokio::test]
async fn test_bad_frames_are_ignored() {
    let (controller, server, _task) = start();

    let mut bytes = vec![0xEE, 0, 1, 0x00];
    bytes.extend(encode(&[
        // Move before any game exists.
        Message::MovePlayer {
            player_id: PlayerId(1),
            value: 3,
        },
        Message::GameData {
            max_players: 2,
            max_move: 3,
            board_size: 4,
        },
        // Not this player's turn: nobody is active yet.
        Message::MovePlayer {
            player_id: PlayerId(1),
            value: 3,
        },
    ]));
    server.send(&bytes).await.unwrap();

    let snapshot = wait_for(&controller, |s| s.game.is_some()).await;
    let game = snapshot.game.unwrap();
    assert_eq!(game.board_size(), 4);
    assert!(game.board().is_empty());
    assert_eq!(snapshot.link, LinkState::Connected);
}

#[tokio::test]
async fn test_submit_user_name_too_long_is_rejected() {
    let (controller, _server, _task) = start();

    let name = "x".repeat(70_000);
    let err = controller.submit_user_name(name).await.unwrap_err();
    assert!(matches!(err, ClientError::Protocol(_)));
    assert!(controller.current_user_name().await.is_none());
}
