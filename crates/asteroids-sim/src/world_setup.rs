//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the ship, asteroids and bullets with appropriate component bundles.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use asteroids_core::components::*;
use asteroids_core::config::GameConfig;
use asteroids_core::enums::EntityKind;
use asteroids_core::events::GameEvent;
use asteroids_core::types::Position;

/// Hands out monotonically increasing spawn orders.
#[derive(Debug, Clone, Default)]
pub struct SpawnCounter {
    next: u64,
}

impl SpawnCounter {
    pub fn next(&mut self) -> SpawnOrder {
        let order = SpawnOrder(self.next);
        self.next += 1;
        order
    }
}

/// Set up a fresh game: the ship at the plane center and the starting asteroids.
pub fn setup_game(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    counter: &mut SpawnCounter,
    events: &mut Vec<GameEvent>,
) {
    spawn_ship(world, config, counter, events);
    for _ in 0..config.asteroid_count {
        spawn_asteroid(world, rng, config, counter, events);
    }
}

/// Spawn the player's ship at rest at the plane center, facing up.
pub fn spawn_ship(
    world: &mut World,
    config: &GameConfig,
    counter: &mut SpawnCounter,
    events: &mut Vec<GameEvent>,
) -> Entity {
    let order = counter.next();
    events.push(GameEvent::Spawned {
        kind: EntityKind::Ship,
        spawn_order: order.0,
    });

    let ship = Ship {
        rotation_speed: config.ship_rotation_speed,
        max_speed: config.ship_max_speed,
        friction: config.ship_friction,
        thrust: config.ship_thrust,
    };

    world.spawn((
        ship,
        config.bounds().center(),
        Motion::default(),
        // No explicit radius: collisions use the fallback.
        Collider::default(),
        order,
    ))
}

/// Spawn an asteroid with uniformly random position, radius, speed and heading.
pub fn spawn_asteroid(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    counter: &mut SpawnCounter,
    events: &mut Vec<GameEvent>,
) -> Entity {
    let radius = rng.gen_range(config.asteroid_radius_min..config.asteroid_radius_max);
    let x = rng.gen_range(0.0..config.world_width);
    let y = rng.gen_range(0.0..config.world_height);
    let speed = rng.gen_range(config.asteroid_speed_min..config.asteroid_speed_max);
    let heading = rng.gen_range(0.0..std::f64::consts::TAU);

    spawn_asteroid_at(
        world,
        counter,
        events,
        Position::new(x, y),
        radius,
        Motion { heading, speed },
    )
}

/// Spawn an asteroid with explicit parameters.
pub fn spawn_asteroid_at(
    world: &mut World,
    counter: &mut SpawnCounter,
    events: &mut Vec<GameEvent>,
    position: Position,
    radius: f64,
    motion: Motion,
) -> Entity {
    let order = counter.next();
    events.push(GameEvent::Spawned {
        kind: EntityKind::Asteroid,
        spawn_order: order.0,
    });

    world.spawn((
        Asteroid,
        position,
        motion,
        Collider::with_radius(radius),
        order,
    ))
}

/// Spawn a bullet at `origin` travelling along `heading`.
pub fn spawn_bullet(
    world: &mut World,
    config: &GameConfig,
    counter: &mut SpawnCounter,
    events: &mut Vec<GameEvent>,
    origin: Position,
    heading: f64,
) -> Entity {
    let order = counter.next();
    events.push(GameEvent::Spawned {
        kind: EntityKind::Bullet,
        spawn_order: order.0,
    });

    world.spawn((
        Bullet,
        origin,
        Motion {
            heading,
            speed: config.bullet_speed,
        },
        Collider::with_radius(config.bullet_radius),
        order,
    ))
}
