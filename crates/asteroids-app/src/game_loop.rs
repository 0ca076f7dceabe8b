//! Game loop thread. Runs the simulation engine at a fixed rate and hands
//! each snapshot to a presenter.
//!
//! The engine lives entirely inside this thread. Commands arrive via `mpsc`
//! channel and are queued for the next tick. Snapshots are handed to the presenter and stored in shared state for
//! synchronous polling.

use std::sync::atomic::AtomicBool;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::info;

use asteroids_core::constants::TICK_RATE;
use asteroids_core::state::GameStateSnapshot;
use asteroids_sim::engine::{SimConfig, SimulationEngine};

use crate::presenter::Presenter;
use crate::state::{GameLoopCommand, RunningGuard};

/// How the loop should run.
#[derive(Debug, Clone)]
pub struct LoopSettings {
    pub sim: SimConfig,
    /// Ticks per second.
    pub tick_rate: u32,
    /// Stop after this many ticks. `None` runs until shutdown.
    pub max_ticks: Option<u64>,
    /// Start a new game after a game over instead of exiting.
    pub restart_on_game_over: bool,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            tick_rate: TICK_RATE,
            max_ticks: None,
            restart_on_game_over: true,
        }
    }
}

impl LoopSettings {
    /// Nominal duration of one tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate.max(1)))
    }
}

/// What happened over the lifetime of the loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub ticks: u64,
    pub games_over: u32,
    pub best_score: u32,
}

/// Spawns the game loop in a new thread.
///
/// The engine is built here, so an invalid config fails before any thread
/// starts. `running` is cleared when the thread exits.
/// Returns the command sender for the input side to use, and the thread handle.
pub fn spawn_game_loop<P>(
    settings: LoopSettings,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    running: Arc<AtomicBool>,
    mut presenter: P,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopSummary>)>
where
    P: Presenter + Send + 'static,
{
    let engine = SimulationEngine::new(settings.sim.clone()).context("invalid game config")?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("asteroids-game-loop".into())
        .spawn(move || {
            let _guard = RunningGuard(running);
            run_game_loop(engine, &settings, &cmd_rx, &latest_snapshot, &mut presenter)
        })
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect, the tick limit,
/// or a game over with restarts disabled.
pub fn run_game_loop(
    mut engine: SimulationEngine,
    settings: &LoopSettings,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    presenter: &mut impl Presenter,
) -> LoopSummary {
    let mut summary = LoopSummary::default();
    let tick_duration = settings.tick_duration();
    let mut next_tick_time = Instant::now();

    loop {
        if settings.max_ticks.is_some_and(|max| summary.ticks >= max) {
            return summary;
        }

        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return summary,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return summary,
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick();
        summary.ticks += 1;

        // 3. Present
        presenter.present(&snapshot);
        let final_score = snapshot.game_over_score();

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Game over: notify, then restart or stop
        if let Some(score) = final_score {
            summary.games_over += 1;
            summary.best_score = summary.best_score.max(score);
            presenter.game_over(score);
            if !settings.restart_on_game_over {
                return summary;
            }
            info!(final_score = score, "restarting");
            engine.reset();
        }

        // 6. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind, drop the backlog
            next_tick_time = now;
        }
    }
}
