//! Line-based key input source.
//!
//! Each line names one key event. Browser key names (`ArrowLeft`, `" "`) and
//! plain words (`left`, `fire`) are both accepted; `quit` stops the game.
//! Anything else is ignored.

use std::io::BufRead;
use std::sync::mpsc;
use std::thread::JoinHandle;

use tracing::debug;

use asteroids_core::commands::PlayerCommand;

use crate::state::GameLoopCommand;

/// What a single input line asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Command(PlayerCommand),
    Quit,
}

/// Parse one line of input. Unrecognised keys yield `None`.
pub fn parse_line(line: &str) -> Option<InputAction> {
    let key = line.trim_end_matches(['\r', '\n']);
    if matches!(key.trim().to_ascii_lowercase().as_str(), "quit" | "exit" | "q") {
        return Some(InputAction::Quit);
    }
    PlayerCommand::from_key(key).map(InputAction::Command)
}

/// Forward every line from `reader` to the game loop until EOF, `quit`,
/// or the loop goes away.
pub fn forward_input<R: BufRead>(reader: R, tx: &mpsc::Sender<GameLoopCommand>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                debug!("input read failed: {e}");
                break;
            }
        };

        let message = match parse_line(&line) {
            Some(InputAction::Command(cmd)) => GameLoopCommand::PlayerCommand(cmd),
            Some(InputAction::Quit) => GameLoopCommand::Shutdown,
            None => {
                debug!(key = %line, "ignoring unknown key");
                continue;
            }
        };

        let quit = matches!(message, GameLoopCommand::Shutdown);
        if tx.send(message).is_err() || quit {
            return;
        }
    }
    debug!("input closed");
}

/// Spawn a thread running [`forward_input`].
pub fn spawn_input_reader<R>(
    reader: R,
    tx: mpsc::Sender<GameLoopCommand>,
) -> std::io::Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    std::thread::Builder::new()
        .name("asteroids-input".into())
        .spawn(move || forward_input(reader, &tx))
}
