//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! Read-only: never modifies the world.

use hecs::World;

use asteroids_core::components::*;
use asteroids_core::enums::GamePhase;
use asteroids_core::events::GameEvent;
use asteroids_core::state::*;
use asteroids_core::types::{PlaneBounds, Position, SimTime};

use crate::score::ScoreState;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    score: &ScoreState,
    bounds: &PlaneBounds,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        score: score.points,
        bounds: *bounds,
        ship: build_ship(world),
        asteroids: build_asteroids(world),
        bullets: build_bullets(world),
        events,
    }
}

fn build_ship(world: &World) -> ShipView {
    world
        .query::<(&Ship, &Position, &Motion)>()
        .iter()
        .next()
        .map(|(_, (_, pos, motion))| ShipView {
            position: *pos,
            heading: motion.heading,
            speed: motion.speed,
        })
        .unwrap_or_default()
}

fn build_asteroids(world: &World) -> Vec<AsteroidView> {
    let mut asteroids: Vec<AsteroidView> = world
        .query::<(&Asteroid, &Position, &Motion, &Collider, &SpawnOrder)>()
        .iter()
        .map(|(_, (_, pos, motion, collider, order))| AsteroidView {
            spawn_order: order.0,
            position: *pos,
            radius: collider.effective_radius(),
            heading: motion.heading,
            speed: motion.speed,
        })
        .collect();

    asteroids.sort_by_key(|a| a.spawn_order);
    asteroids
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    let mut bullets: Vec<BulletView> = world
        .query::<(&Bullet, &Position, &Motion, &SpawnOrder)>()
        .iter()
        .map(|(_, (_, pos, motion, order))| BulletView {
            spawn_order: order.0,
            position: *pos,
            heading: motion.heading,
        })
        .collect();

    bullets.sort_by_key(|b| b.spawn_order);
    bullets
}
