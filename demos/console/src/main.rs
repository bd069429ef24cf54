use std::fmt::Write as _;
use std::io::Write as _;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use turnwire::prelude::*;

/// Environment variable that overrides the server address.
const SERVER_ENV: &str = "TURNWIRE_SERVER";

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let status = snapshot.status();

    if status == Status::Disconnected {
        let reason = match &snapshot.link {
            LinkState::Failed(reason) => reason.as_str(),
            _ => "server closed the connection",
        };
        let _ = writeln!(out, "Status: Disconnected ({reason})");
        return out;
    }

    let Some(name) = &snapshot.user_name else {
        out.push_str("Please enter user name\n> ");
        return out;
    };
    let _ = writeln!(out, "Player: {name}");

    let Some(game) = &snapshot.game else {
        out.push_str("Status: Waiting for opponent > ");
        return out;
    };

    let board: Vec<String> = game
        .board()
        .moves()
        .iter()
        .map(|m| m.value.to_string())
        .collect();
    let players: Vec<&str> = game.players().iter().map(|p| p.name.as_str()).collect();

    let _ = writeln!(out, "Active Player: {}", game.active_player());
    let _ = writeln!(out, "Max Move: {}", game.max_move());
    let _ = writeln!(out, "Game Board: [{}]", board.join(", "));
    let _ = writeln!(out, "Game Total: {}", game.board().len());
    let _ = writeln!(out, "Game Players: [{}]", players.join(", "));
    let _ = writeln!(out, "Board Size: {}", game.board_size());

    match status {
        Status::GameOver(Outcome::Won) => out.push_str("Status: Game Over - You have WON!!!\n"),
        Status::GameOver(Outcome::Lost) => out.push_str("Status: Game Over - You have lost...\n"),
        Status::YourTurn => {
            let _ = write!(out, "Enter next move (1-{}) > ", game.max_move());
        }
        _ => out.push_str("Status: Waiting for other player to move\n> "),
    }
    out
}

fn redraw(snapshot: &Snapshot) {
    // Clear screen, cursor home.
    print!("\x1B[2J\x1B[H{}", render(snapshot));
    let _ = std::io::stdout().flush();
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

async fn handle_line<C>(controller: &SessionController<C>, line: &str)
where
    C: Connection<Error = TransportError>,
{
    let result = match controller.snapshot().await.status() {
        Status::NeedUserName => match parse_user_name(line) {
            Ok(name) => controller.submit_user_name(name).await,
            Err(e) => Err(e.into()),
        },
        Status::YourTurn | Status::WaitingForOpponent => match parse_move(line) {
            Ok(value) => controller.submit_move(value).await,
            Err(e) => Err(e.into()),
        },
        Status::WaitingForGame | Status::GameOver(_) | Status::Disconnected => {
            tracing::debug!(line, "input ignored");
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::warn!(error = %e, "input rejected");
        eprintln!("{e}");
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = ClientConfig::default();
    if let Ok(addr) = std::env::var(SERVER_ENV) {
        config.server_addr = addr;
    }
    eprintln!("connecting to {}", config.server_addr);

    let client = TurnwireClient::builder().config(config).connect().await?;
    let controller = Arc::clone(client.controller());
    run_console(&controller, BufReader::new(tokio::io::stdin())).await?;

    controller.close().await.ok();
    Ok(())
}

/// Redraws on every state change and routes input lines until `input`
/// reaches EOF.
async fn run_console<C, R>(controller: &SessionController<C>, input: R) -> std::io::Result<()>
where
    C: Connection<Error = TransportError>,
    R: AsyncBufRead + Unpin,
{
    let mut updates = controller.subscribe();
    let mut lines = input.lines();

    redraw(&updates.borrow_and_update().clone());

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                // A lost link stays on screen; only stdin EOF ends the loop.
                redraw(&updates.borrow_and_update().clone());
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => handle_line(controller, &line).await,
                    None => break,
                }
            }
        }
    }
    Ok(())
}
