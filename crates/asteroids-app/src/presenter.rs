//! Presentation sink: where snapshots and game-over notices go after each tick.

use std::io::Write;

use serde::Serialize;
use tracing::warn;

use asteroids_core::state::GameStateSnapshot;

/// Receives post-tick state from the game loop.
pub trait Presenter {
    /// Called after every tick.
    fn present(&mut self, snapshot: &GameStateSnapshot);

    /// Called once when the ship is destroyed.
    fn game_over(&mut self, final_score: u32);
}

/// One JSON object per line.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Line<'a> {
    Snapshot(&'a GameStateSnapshot),
    GameOver { final_score: u32 },
}

/// Writes every `every`-th snapshot and every game-over notice as JSON lines.
///
/// `every == 0` suppresses snapshots but still reports game over.
pub struct JsonLinesPresenter<W: Write> {
    out: W,
    every: u64,
}

impl<W: Write> JsonLinesPresenter<W> {
    pub fn new(out: W, every: u64) -> Self {
        Self { out, every }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &Line<'_>) {
        let result = serde_json::to_writer(&mut self.out, line)
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(self.out))
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            warn!("failed to write presentation line: {e}");
        }
    }
}

impl<W: Write> Presenter for JsonLinesPresenter<W> {
    fn present(&mut self, snapshot: &GameStateSnapshot) {
        if self.every > 0 && snapshot.time.tick % self.every == 0 {
            self.write_line(&Line::Snapshot(snapshot));
        }
    }

    fn game_over(&mut self, final_score: u32) {
        self.write_line(&Line::GameOver { final_score });
    }
}
