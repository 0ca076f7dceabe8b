//! Headless asteroids: key events in on stdin, JSON lines out on stdout.

use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use asteroids_app::control;
use asteroids_app::game_loop::LoopSettings;
use asteroids_app::input;
use asteroids_app::presenter::JsonLinesPresenter;
use asteroids_app::state::AppState;
use asteroids_core::config::GameConfig;
use asteroids_core::constants::TICK_RATE;
use asteroids_sim::SimConfig;

#[derive(Debug, Parser)]
#[command(name = "asteroids", about = "Run the asteroids simulation headless")]
struct Args {
    /// TOML file overriding any subset of the game tunables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed. Same seed and inputs give the same game.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Ticks per second.
    #[arg(long, default_value_t = TICK_RATE, value_parser = clap::value_parser!(u32).range(1..))]
    tick_rate: u32,

    /// Stop after this many ticks.
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Write every Nth snapshot to stdout. 0 writes only game-over notices.
    #[arg(long, default_value_t = 0)]
    snapshot_every: u64,

    /// Exit on game over instead of starting a new game.
    #[arg(long)]
    no_restart: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let game = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => GameConfig::default(),
    };

    let settings = LoopSettings {
        sim: SimConfig {
            seed: args.seed,
            game,
        },
        tick_rate: args.tick_rate,
        max_ticks: args.max_ticks,
        restart_on_game_over: !args.no_restart,
    };
    info!(seed = args.seed, tick_rate = args.tick_rate, "starting");

    let state = AppState::new();
    let presenter = JsonLinesPresenter::new(io::stdout(), args.snapshot_every);
    let game_loop = control::start_simulation(&state, settings, presenter)?;

    // The reader blocks on stdin, so it is left detached; the loop owns shutdown.
    let input_tx = control::command_sender(&state)?;
    input::spawn_input_reader(io::BufReader::new(io::stdin()), input_tx)
        .context("failed to spawn input thread")?;

    let summary = game_loop
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;

    info!(
        ticks = summary.ticks,
        games_over = summary.games_over,
        best_score = summary.best_score,
        "stopped"
    );
    Ok(())
}
