//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs ECS world, applies player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use asteroids_core::commands::PlayerCommand;
use asteroids_core::components::{Motion, Ship};
use asteroids_core::config::{ConfigError, GameConfig};
use asteroids_core::enums::GamePhase;
use asteroids_core::events::GameEvent;
use asteroids_core::state::GameStateSnapshot;
use asteroids_core::types::{PlaneBounds, Position, SimTime};

use crate::score::ScoreState;
use crate::systems;
use crate::world_setup::{self, SpawnCounter};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    config: GameConfig,
    bounds: PlaneBounds,
    rng: ChaCha8Rng,
    spawn_counter: SpawnCounter,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
    score: ScoreState,
}

impl SimulationEngine {
    /// Create a new simulation engine with a freshly set-up game.
    ///
    /// The game config is validated first; asteroid sampling needs
    /// non-empty ranges and a non-empty plane.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.game.validate()?;
        let bounds = config.game.bounds();
        let mut engine = Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            config: config.game,
            bounds,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            spawn_counter: SpawnCounter::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            score: ScoreState::default(),
        };
        engine.start_game();
        Ok(engine)
    }

    /// Apply a player command right now.
    ///
    /// Only `Restart` has an effect once the game is over.
    pub fn apply_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Restart => self.reset(),
            _ if self.phase != GamePhase::Running => {}
            PlayerCommand::RotateLeft => {
                for (_entity, (ship, motion)) in self.world.query_mut::<(&Ship, &mut Motion)>() {
                    motion.heading -= ship.rotation_speed;
                }
            }
            PlayerCommand::RotateRight => {
                for (_entity, (ship, motion)) in self.world.query_mut::<(&Ship, &mut Motion)>() {
                    motion.heading += ship.rotation_speed;
                }
            }
            PlayerCommand::Thrust => {
                for (_entity, (ship, motion)) in self.world.query_mut::<(&Ship, &mut Motion)>() {
                    if motion.speed < ship.max_speed {
                        motion.speed = (motion.speed + ship.thrust).min(ship.max_speed);
                    }
                }
            }
            PlayerCommand::Fire => self.fire(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Running {
            self.run_systems();
            self.time.advance();
        }

        self.snapshot()
    }

    /// Discard the current session and start over from startup values.
    pub fn reset(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.phase = GamePhase::Running;
        self.score = ScoreState::default();
        self.spawn_counter = SpawnCounter::default();
        self.despawn_buffer.clear();
        self.events.push(GameEvent::GameReset);
        self.start_game();
    }

    /// Build a snapshot of the current state, draining pending events.
    pub fn snapshot(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.score,
            &self.bounds,
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current point total.
    pub fn score(&self) -> u32 {
        self.score.points
    }

    /// Get the full score breakdown.
    pub fn score_state(&self) -> &ScoreState {
        &self.score
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Remove every asteroid (for tests needing a controlled field).
    #[cfg(test)]
    pub fn clear_asteroids(&mut self) {
        let asteroids: Vec<Entity> = self
            .world
            .query::<&asteroids_core::components::Asteroid>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in asteroids {
            let _ = self.world.despawn(entity);
        }
    }

    /// Spawn an asteroid with explicit parameters (for tests).
    #[cfg(test)]
    pub fn spawn_test_asteroid(&mut self, position: Position, radius: f64, motion: Motion) {
        world_setup::spawn_asteroid_at(
            &mut self.world,
            &mut self.spawn_counter,
            &mut self.events,
            position,
            radius,
            motion,
        );
    }

    /// Spawn a bullet at an explicit position (for tests).
    #[cfg(test)]
    pub fn spawn_test_bullet(&mut self, position: Position, heading: f64) {
        world_setup::spawn_bullet(
            &mut self.world,
            &self.config,
            &mut self.spawn_counter,
            &mut self.events,
            position,
            heading,
        );
    }

    /// Overwrite the ship's position and motion (for tests).
    #[cfg(test)]
    pub fn set_ship(&mut self, position: Position, motion: Motion) {
        for (_entity, (_ship, pos, mot)) in self
            .world
            .query_mut::<(&Ship, &mut Position, &mut Motion)>()
        {
            *pos = position;
            *mot = motion;
        }
    }

    fn start_game(&mut self) {
        world_setup::setup_game(
            &mut self.world,
            &mut self.rng,
            &self.config,
            &mut self.spawn_counter,
            &mut self.events,
        );
        info!(
            asteroids = self.config.asteroid_count,
            width = self.bounds.width,
            height = self.bounds.height,
            "new game started"
        );
    }

    fn fire(&mut self) {
        let ship = self
            .world
            .query::<(&Ship, &Position, &Motion)>()
            .iter()
            .next()
            .map(|(_, (_, pos, motion))| (*pos, motion.heading));

        if let Some((origin, heading)) = ship {
            world_setup::spawn_bullet(
                &mut self.world,
                &self.config,
                &mut self.spawn_counter,
                &mut self.events,
                origin,
                heading,
            );
            self.score.bullets_fired += 1;
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.apply_command(command);
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Ship: friction, move, wrap
        systems::movement::run_ship(&mut self.world, &self.bounds);
        // 2. Bullets: move, drop the ones that left the plane
        systems::movement::run_bullets(&mut self.world);
        systems::cleanup::expire_bullets(
            &mut self.world,
            &self.bounds,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 3. Asteroids: move, wrap
        systems::movement::run_asteroids(&mut self.world, &self.bounds);
        // 4. Ship vs asteroid ends the game and the tick
        if let Some((_asteroid, order)) = systems::collision::ship_collision(&self.world) {
            self.end_game(order.0);
            return;
        }
        // 5. Bullet vs asteroid
        self.resolve_bullet_hits();
    }

    fn end_game(&mut self, asteroid_order: u64) {
        let final_score = self.score.points;
        info!(
            final_score,
            tick = self.time.tick,
            asteroid = asteroid_order,
            "game over"
        );
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver {
            final_score,
            tick: self.time.tick,
            asteroid: asteroid_order,
        });
    }

    /// Score hits, remove both bodies, then spawn one replacement per kill.
    fn resolve_bullet_hits(&mut self) {
        let hits = systems::collision::bullet_hits(&self.world);
        if hits.is_empty() {
            return;
        }

        self.despawn_buffer.clear();
        for hit in &hits {
            let score = self.score.record_kill(self.config.asteroid_score);
            debug!(
                bullet = hit.bullet_order.0,
                asteroid = hit.asteroid_order.0,
                score,
                "asteroid destroyed"
            );
            self.events.push(GameEvent::AsteroidDestroyed {
                asteroid: hit.asteroid_order.0,
                bullet: hit.bullet_order.0,
                score,
            });
            self.despawn_buffer.push(hit.bullet);
            self.despawn_buffer.push(hit.asteroid);
        }
        systems::cleanup::despawn_all(&mut self.world, &mut self.despawn_buffer);

        for _ in 0..hits.len() {
            world_setup::spawn_asteroid(
                &mut self.world,
                &mut self.rng,
                &self.config,
                &mut self.spawn_counter,
                &mut self.events,
            );
        }
    }
}
