//! Tests for the simulation engine: motion, wrap, collisions, scoring and restart.

use approx::assert_relative_eq;

use asteroids_core::commands::PlayerCommand;
use asteroids_core::components::{Asteroid, Bullet, Motion};
use asteroids_core::config::{ConfigError, GameConfig};
use asteroids_core::enums::{EntityKind, GamePhase};
use asteroids_core::events::GameEvent;
use asteroids_core::state::GameStateSnapshot;
use asteroids_core::types::Position;

use crate::engine::{SimConfig, SimulationEngine};

fn count<T: hecs::Component>(engine: &SimulationEngine) -> usize {
    let mut q = engine.world().query::<&T>();
    q.iter().count()
}

/// Engine with no asteroids and the ship parked at the plane center.
fn empty_field() -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.clear_asteroids();
    engine.set_ship(Position::new(400.0, 300.0), Motion::default());
    engine.snapshot();
    engine
}

fn still(heading: f64) -> Motion {
    Motion {
        heading,
        speed: 0.0,
    }
}

fn assert_in_bounds(snapshot: &GameStateSnapshot) {
    let bounds = snapshot.bounds;
    assert!(
        bounds.contains(&snapshot.ship.position),
        "ship out of bounds at tick {}: {:?}",
        snapshot.time.tick,
        snapshot.ship.position
    );
    for asteroid in &snapshot.asteroids {
        assert!(
            bounds.contains(&asteroid.position),
            "asteroid {} out of bounds: {:?}",
            asteroid.spawn_order,
            asteroid.position
        );
    }
    for bullet in &snapshot.bullets {
        assert!(
            bounds.contains(&bullet.position),
            "bullet {} out of bounds: {:?}",
            bullet.spawn_order,
            bullet.position
        );
    }
}

// ---- Startup ----

#[test]
fn test_startup_state() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let snap = engine.snapshot();

    assert_eq!(snap.phase, GamePhase::Running);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.time.tick, 0);
    assert_eq!(snap.ship.position, Position::new(400.0, 300.0));
    assert_eq!(snap.ship.heading, 0.0);
    assert_eq!(snap.ship.speed, 0.0);
    assert!(snap.bullets.is_empty());
    assert_eq!(snap.asteroids.len(), 5);

    for asteroid in &snap.asteroids {
        assert!((20.0..50.0).contains(&asteroid.radius));
        assert!((1.0..3.0).contains(&asteroid.speed));
        assert!((0.0..std::f64::consts::TAU).contains(&asteroid.heading));
    }
    assert_in_bounds(&snap);

    let spawned: Vec<EntityKind> = snap
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Spawned { kind, .. } => Some(*kind),
            _ => None,
        })
        .collect();
    assert_eq!(spawned.len(), 6);
    assert_eq!(spawned[0], EntityKind::Ship);
    assert!(spawned[1..].iter().all(|k| *k == EntityKind::Asteroid));
}

#[test]
fn test_custom_config_population_and_bounds() {
    let game = GameConfig {
        world_width: 1024.0,
        world_height: 768.0,
        asteroid_count: 8,
        ..Default::default()
    };
    let mut engine = SimulationEngine::new(SimConfig { seed: 7, game }).unwrap();
    let snap = engine.snapshot();

    assert_eq!(snap.asteroids.len(), 8);
    assert_eq!(snap.ship.position, Position::new(512.0, 384.0));
    assert_relative_eq!(snap.bounds.width, 1024.0);
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    })
    .unwrap();
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    })
    .unwrap();

    for tick in 0..300u32 {
        let commands: &[PlayerCommand] = match tick % 10 {
            0 => &[PlayerCommand::Fire],
            3 => &[PlayerCommand::Thrust, PlayerCommand::RotateRight],
            7 => &[PlayerCommand::RotateLeft, PlayerCommand::Fire],
            _ => &[],
        };
        engine_a.queue_commands(commands.iter().copied());
        engine_b.queue_commands(commands.iter().copied());

        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    })
    .unwrap();
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    })
    .unwrap();

    assert_ne!(
        engine_a.snapshot().asteroids,
        engine_b.snapshot().asteroids,
        "Different seeds should place asteroids differently"
    );
}

// ---- Bounds ----

#[test]
fn test_all_positions_stay_in_bounds() {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 99,
        ..Default::default()
    })
    .unwrap();

    for tick in 0..3000u32 {
        engine.apply_command(PlayerCommand::RotateRight);
        if tick % 3 == 0 {
            engine.apply_command(PlayerCommand::Thrust);
        }
        if tick % 7 == 0 {
            engine.apply_command(PlayerCommand::Fire);
        }

        let snap = engine.tick();
        assert_in_bounds(&snap);

        if snap.phase == GamePhase::GameOver {
            engine.apply_command(PlayerCommand::Restart);
        }
    }
}

#[test]
fn test_ship_wraps_to_opposite_edge() {
    let mut engine = empty_field();
    // Heading up at full speed from just below the top edge.
    engine.set_ship(
        Position::new(100.0, 2.0),
        Motion {
            heading: 0.0,
            speed: 5.0,
        },
    );

    let snap = engine.tick();
    assert_eq!(snap.ship.position.y, 600.0);
    assert_relative_eq!(snap.ship.position.x, 100.0);
}

#[test]
fn test_asteroid_wraps_to_zero() {
    let mut engine = empty_field();
    engine.spawn_test_asteroid(
        Position::new(799.0, 50.0),
        20.0,
        Motion {
            heading: std::f64::consts::FRAC_PI_2,
            speed: 2.0,
        },
    );

    let snap = engine.tick();
    assert_eq!(snap.asteroids.len(), 1);
    assert_eq!(snap.asteroids[0].position.x, 0.0);
}

// ---- Ship handling ----

#[test]
fn test_friction_decays_speed_without_sign_change() {
    let mut engine = empty_field();
    for _ in 0..10 {
        engine.apply_command(PlayerCommand::Thrust);
    }
    let mut previous = engine.snapshot().ship.speed;
    assert_relative_eq!(previous, 2.0, epsilon = 1e-9);

    for _ in 0..200 {
        let speed = engine.tick().ship.speed;
        assert!(speed < previous, "speed did not decrease: {speed} >= {previous}");
        assert!(speed > 0.0, "speed changed sign: {speed}");
        assert_relative_eq!(speed, previous * 0.98, epsilon = 1e-12);
        previous = speed;
    }
}

#[test]
fn test_negative_speed_decays_toward_zero() {
    let mut engine = empty_field();
    engine.set_ship(
        Position::new(400.0, 300.0),
        Motion {
            heading: 0.0,
            speed: -3.0,
        },
    );

    let mut previous = -3.0_f64;
    for _ in 0..50 {
        let speed = engine.tick().ship.speed;
        assert!(speed < 0.0);
        assert!(speed.abs() < previous.abs());
        previous = speed;
    }
}

#[test]
fn test_thrust_is_capped_at_max_speed() {
    let mut engine = empty_field();
    for _ in 0..100 {
        engine.apply_command(PlayerCommand::Thrust);
    }
    assert_eq!(engine.snapshot().ship.speed, 5.0);
}

#[test]
fn test_rotation_commands() {
    let mut engine = empty_field();
    engine.apply_command(PlayerCommand::RotateLeft);
    assert_relative_eq!(engine.snapshot().ship.heading, -0.05);

    engine.apply_command(PlayerCommand::RotateRight);
    engine.apply_command(PlayerCommand::RotateRight);
    assert_relative_eq!(engine.snapshot().ship.heading, 0.05, epsilon = 1e-12);
}

#[test]
fn test_ship_moves_along_heading() {
    let mut engine = empty_field();
    engine.set_ship(
        Position::new(400.0, 300.0),
        Motion {
            heading: std::f64::consts::FRAC_PI_2,
            speed: 1.0,
        },
    );

    let snap = engine.tick();
    // Friction applies before the move.
    assert_relative_eq!(snap.ship.position.x, 400.98, epsilon = 1e-9);
    assert_relative_eq!(snap.ship.position.y, 300.0, epsilon = 1e-9);
}

// ---- Bullets ----

#[test]
fn test_fire_spawns_bullets_immediately_with_fire_time_heading() {
    let mut engine = empty_field();
    for _ in 0..3 {
        engine.apply_command(PlayerCommand::Fire);
    }
    assert_eq!(count::<Bullet>(&engine), 3);

    engine.apply_command(PlayerCommand::RotateRight);
    engine.apply_command(PlayerCommand::Fire);

    let snap = engine.snapshot();
    assert_eq!(snap.bullets.len(), 4);
    for bullet in &snap.bullets[..3] {
        assert_eq!(bullet.heading, 0.0);
        assert_eq!(bullet.position, Position::new(400.0, 300.0));
    }
    assert_relative_eq!(snap.bullets[3].heading, 0.05);
    assert_eq!(engine.score_state().bullets_fired, 4);

    // Headings survive later rotation and ticks.
    engine.apply_command(PlayerCommand::RotateLeft);
    engine.apply_command(PlayerCommand::RotateLeft);
    let snap = engine.tick();
    assert!(snap.bullets[..3].iter().all(|b| b.heading == 0.0));
    assert_relative_eq!(snap.bullets[3].heading, 0.05);
}

#[test]
fn test_queued_fire_applies_at_next_tick() {
    let mut engine = empty_field();
    engine.queue_command(PlayerCommand::Fire);
    assert_eq!(count::<Bullet>(&engine), 0);

    let snap = engine.tick();
    assert_eq!(snap.bullets.len(), 1);
    // Spawned at the ship, then moved one step before the snapshot.
    assert_relative_eq!(snap.bullets[0].position.y, 290.0);
}

#[test]
fn test_bullet_removed_when_leaving_plane() {
    let mut engine = empty_field();
    engine.spawn_test_bullet(Position::new(100.0, 100.0), 0.0);

    let mut snap = engine.tick();
    for _ in 1..10 {
        snap = engine.tick();
    }
    assert_eq!(snap.bullets.len(), 1);
    assert_relative_eq!(snap.bullets[0].position.x, 100.0);
    assert_relative_eq!(snap.bullets[0].position.y, 0.0);

    let snap = engine.tick();
    assert!(snap.bullets.is_empty(), "bullet should not wrap");
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::BulletExpired { .. })));

    for _ in 0..100 {
        assert!(engine.tick().bullets.is_empty());
    }
}

// ---- Bullet vs asteroid ----

#[test]
fn test_bullet_hit_scores_and_respawns() {
    let mut engine = empty_field();
    engine.spawn_test_asteroid(Position::new(100.0, 100.0), 25.0, still(0.0));
    // One step up lands the bullet on the asteroid center.
    engine.spawn_test_bullet(Position::new(100.0, 110.0), 0.0);

    let snap = engine.tick();
    assert_eq!(snap.score, 10);
    assert!(snap.bullets.is_empty());
    assert_eq!(snap.asteroids.len(), 1, "one removed, one added");
    assert_ne!(snap.asteroids[0].position, Position::new(100.0, 100.0));
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::AsteroidDestroyed { score: 10, .. })));
    assert_eq!(engine.score_state().asteroids_destroyed, 1);
}

#[test]
fn test_one_bullet_scores_once_over_overlapping_asteroids() {
    let mut engine = empty_field();
    engine.spawn_test_asteroid(Position::new(200.0, 200.0), 30.0, still(0.0));
    engine.spawn_test_asteroid(Position::new(200.0, 200.0), 30.0, still(0.0));
    let before = engine.snapshot();
    let (first, second) = (before.asteroids[0].spawn_order, before.asteroids[1].spawn_order);
    engine.spawn_test_bullet(Position::new(200.0, 210.0), 0.0);

    let snap = engine.tick();
    assert_eq!(snap.score, 10);
    assert!(snap.bullets.is_empty());
    assert_eq!(snap.asteroids.len(), 2);
    assert!(snap.asteroids.iter().all(|a| a.spawn_order != first));
    assert!(snap.asteroids.iter().any(|a| a.spawn_order == second));
}

#[test]
fn test_two_bullets_one_asteroid_only_first_scores() {
    let mut engine = empty_field();
    engine.spawn_test_asteroid(Position::new(200.0, 200.0), 40.0, still(0.0));
    engine.spawn_test_bullet(Position::new(200.0, 210.0), 0.0);
    engine.spawn_test_bullet(Position::new(205.0, 210.0), 0.0);
    let before = engine.snapshot();
    let second_bullet = before.bullets[1].spawn_order;

    let snap = engine.tick();
    assert_eq!(snap.score, 10);
    assert_eq!(snap.bullets.len(), 1);
    assert_eq!(snap.bullets[0].spawn_order, second_bullet);
    assert_eq!(snap.asteroids.len(), 1);
}

#[test]
fn test_population_constant_without_firing() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    for _ in 0..2000 {
        let snap = engine.tick();
        assert_eq!(snap.asteroids.len(), 5);
        assert_eq!(snap.score, 0);
    }
}

#[test]
fn test_replacement_asteroid_not_hit_in_spawn_tick() {
    // Replacements are wider than the plane, so one would overlap every
    // bullet if it took part in the scan that spawned it.
    let game = GameConfig {
        world_width: 100.0,
        world_height: 100.0,
        asteroid_count: 0,
        asteroid_radius_min: 200.0,
        asteroid_radius_max: 201.0,
        ..Default::default()
    };
    let mut engine = SimulationEngine::new(SimConfig { seed: 3, game }).unwrap();
    engine.spawn_test_asteroid(Position::new(10.0, 10.0), 5.0, still(0.0));
    engine.spawn_test_bullet(Position::new(10.0, 20.0), 0.0);
    engine.spawn_test_bullet(Position::new(90.0, 90.0), 0.0);
    let target = engine.snapshot().asteroids[0].spawn_order;

    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Running);
    assert_eq!(snap.score, 10);
    assert_eq!(snap.bullets.len(), 1, "second bullet must survive");
    assert_relative_eq!(snap.bullets[0].position.y, 80.0);
    assert_eq!(snap.asteroids.len(), 1);
    assert_ne!(snap.asteroids[0].spawn_order, target);
    assert!(snap.asteroids[0].radius >= 200.0);

    // Collidable from the next tick on: it now covers the ship.
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(snap.game_over_score(), Some(10));
}

// ---- Game over ----

#[test]
fn test_ship_collision_ends_game_with_score_preserved() {
    let mut engine = empty_field();

    // Earn 10 points first.
    engine.spawn_test_asteroid(Position::new(100.0, 100.0), 25.0, still(0.0));
    engine.spawn_test_bullet(Position::new(100.0, 110.0), 0.0);
    assert_eq!(engine.tick().score, 10);

    engine.clear_asteroids();
    engine.set_ship(Position::new(400.0, 300.0), Motion::default());
    engine.spawn_test_asteroid(Position::new(405.0, 300.0), 20.0, still(0.0));

    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(snap.game_over_score(), Some(10));
    assert_eq!(snap.score, 10);
    assert_eq!(engine.phase(), GamePhase::GameOver);
}

#[test]
fn test_game_over_short_circuits_bullet_hits() {
    let mut engine = empty_field();
    engine.spawn_test_asteroid(Position::new(405.0, 300.0), 20.0, still(0.0));
    engine.spawn_test_asteroid(Position::new(100.0, 100.0), 25.0, still(0.0));
    engine.spawn_test_bullet(Position::new(100.0, 110.0), 0.0);

    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(snap.game_over_score(), Some(0));
    assert_eq!(snap.score, 0);
    assert_eq!(snap.bullets.len(), 1);
    assert_eq!(snap.asteroids.len(), 2);
}

#[test]
fn test_game_over_freezes_state_and_ignores_input() {
    let mut engine = empty_field();
    engine.spawn_test_asteroid(Position::new(405.0, 300.0), 20.0, still(0.0));
    let over = engine.tick();
    assert_eq!(over.phase, GamePhase::GameOver);

    engine.apply_command(PlayerCommand::Fire);
    engine.apply_command(PlayerCommand::Thrust);
    for _ in 0..10 {
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::GameOver);
        assert_eq!(snap.time, over.time);
        assert_eq!(snap.ship, over.ship);
        assert!(snap.bullets.is_empty());
        assert!(snap.events.is_empty());
    }
}

#[test]
fn test_restart_reinitializes_session() {
    let mut engine = empty_field();
    engine.spawn_test_asteroid(Position::new(100.0, 100.0), 25.0, still(0.0));
    engine.spawn_test_bullet(Position::new(100.0, 110.0), 0.0);
    engine.tick();
    engine.clear_asteroids();
    engine.spawn_test_asteroid(Position::new(405.0, 300.0), 20.0, still(0.0));
    engine.apply_command(PlayerCommand::RotateRight);
    engine.apply_command(PlayerCommand::Fire);
    assert_eq!(engine.tick().phase, GamePhase::GameOver);

    engine.apply_command(PlayerCommand::Restart);
    let snap = engine.snapshot();
    assert_eq!(snap.phase, GamePhase::Running);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.time.tick, 0);
    assert_eq!(snap.ship.position, Position::new(400.0, 300.0));
    assert_eq!(snap.ship.heading, 0.0);
    assert_eq!(snap.ship.speed, 0.0);
    assert!(snap.bullets.is_empty());
    assert_eq!(snap.asteroids.len(), 5);
    assert_eq!(count::<Asteroid>(&engine), 5);
    assert_eq!(snap.events.first(), Some(&GameEvent::GameReset));
    assert_eq!(engine.score_state().bullets_fired, 0);
}

#[test]
fn test_ship_collision_names_first_asteroid_in_spawn_order() {
    let mut engine = empty_field();
    engine.spawn_test_asteroid(Position::new(420.0, 300.0), 20.0, still(0.0));
    engine.spawn_test_asteroid(Position::new(400.0, 300.0), 30.0, still(0.0));
    let before = engine.snapshot();
    let first = before.asteroids[0].spawn_order;
    assert!(first < before.asteroids[1].spawn_order);

    let snap = engine.tick();
    let named: Vec<u64> = snap
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::GameOver { asteroid, .. } => Some(*asteroid),
            _ => None,
        })
        .collect();
    assert_eq!(named, vec![first]);
}

// ---- Config ----

#[test]
fn test_invalid_config_rejected_before_spawning() {
    let game = GameConfig {
        asteroid_speed_min: 2.0,
        asteroid_speed_max: 2.0,
        ..Default::default()
    };
    match SimulationEngine::new(SimConfig { seed: 1, game }) {
        Err(ConfigError::Invalid { name, .. }) => assert_eq!(name, "asteroid_speed_max"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("empty speed range accepted"),
    }

    let game = GameConfig {
        world_width: 0.0,
        ..Default::default()
    };
    assert!(SimulationEngine::new(SimConfig { seed: 1, game }).is_err());
}
