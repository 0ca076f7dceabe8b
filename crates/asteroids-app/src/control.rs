//! Control functions bridging the binary to the game loop thread.

use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::thread::JoinHandle;

use anyhow::{anyhow, bail, Context, Result};

use asteroids_core::commands::PlayerCommand;
use asteroids_core::state::GameStateSnapshot;

use crate::game_loop::{self, LoopSettings, LoopSummary};
use crate::presenter::Presenter;
use crate::state::{AppState, GameLoopCommand};

/// Start a session. Fails while a previous loop thread is still alive.
pub fn start_simulation<P>(
    state: &AppState,
    settings: LoopSettings,
    presenter: P,
) -> Result<JoinHandle<LoopSummary>>
where
    P: Presenter + Send + 'static,
{
    if state
        .running
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        bail!("Simulation already running");
    }

    let spawned = game_loop::spawn_game_loop(
        settings,
        state.latest_snapshot.clone(),
        state.running.clone(),
        presenter,
    );
    let (cmd_tx, handle) = match spawned {
        Ok(spawned) => spawned,
        Err(e) => {
            state.running.store(false, Ordering::SeqCst);
            return Err(e);
        }
    };

    *lock_sender(state)? = Some(cmd_tx);
    Ok(handle)
}

/// A clone of the command sender, for input threads.
pub fn command_sender(state: &AppState) -> Result<mpsc::Sender<GameLoopCommand>> {
    lock_sender(state)?
        .clone()
        .context("Simulation not started")
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<()> {
    command_sender(state)?
        .send(GameLoopCommand::PlayerCommand(command))
        .map_err(|_| anyhow!("Simulation has stopped"))
}

/// Ask the game loop to stop and forget its sender.
///
/// The loop finishes its current tick before exiting; join the handle from
/// `start_simulation` to wait for it.
pub fn stop_simulation(state: &AppState) -> Result<()> {
    let tx = lock_sender(state)?
        .take()
        .context("Simulation not started")?;
    // A loop that already ended on its own has dropped the receiver.
    let _ = tx.send(GameLoopCommand::Shutdown);
    Ok(())
}

/// Get the latest snapshot synchronously.
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>> {
    let lock = state
        .latest_snapshot
        .lock()
        .map_err(|e| anyhow!("state lock poisoned: {e}"))?;
    Ok(lock.clone())
}

fn lock_sender(
    state: &AppState,
) -> Result<std::sync::MutexGuard<'_, Option<mpsc::Sender<GameLoopCommand>>>> {
    state
        .command_tx
        .lock()
        .map_err(|e| anyhow!("state lock poisoned: {e}"))
}
