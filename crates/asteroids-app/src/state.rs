//! State shared between the control functions and the game loop thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use asteroids_core::commands::PlayerCommand;
use asteroids_core::state::GameStateSnapshot;

/// Messages into the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Forward to the engine at the next tick.
    PlayerCommand(PlayerCommand),
    /// Stop the loop after the current tick.
    Shutdown,
}

/// Handle to at most one game loop at a time.
///
/// A session runs from `start_simulation` until the loop thread returns,
/// whatever the cause (shutdown, tick limit, game over without restart).
/// The thread clears `running` on its way out, so a new session can be
/// started as soon as the old one has ended.
#[derive(Default)]
pub struct AppState {
    /// Sender into the current session. Replaced on every start and
    /// taken on stop.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Last snapshot published by any session.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub running: Arc<AtomicBool>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Clears a running flag when dropped, including on unwind.
pub(crate) struct RunningGuard(pub(crate) Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!state.is_running());
    }

    #[test]
    fn test_running_guard_clears_flag() {
        let flag = Arc::new(AtomicBool::new(true));
        drop(RunningGuard(flag.clone()));
        assert!(!flag.load(Ordering::SeqCst));
    }
}
