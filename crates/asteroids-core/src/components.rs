//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems,
//! not components; the few methods here are pure accessors.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_COLLISION_RADIUS;

/// Heading and scalar speed. Every moving entity carries one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Radians, clockwise from "up".
    pub heading: f64,
    /// World units per tick. Negative values move backwards.
    pub speed: f64,
}

/// Circular collision shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    /// Explicit radius. `None` falls back to `DEFAULT_COLLISION_RADIUS`.
    pub radius: Option<f64>,
}

impl Collider {
    pub fn with_radius(radius: f64) -> Self {
        Self {
            radius: Some(radius),
        }
    }

    /// Radius used for overlap tests.
    pub fn effective_radius(&self) -> f64 {
        self.radius.unwrap_or(DEFAULT_COLLISION_RADIUS)
    }
}

/// Player ship handling parameters. Exactly one entity carries this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub rotation_speed: f64,
    pub max_speed: f64,
    pub friction: f64,
    pub thrust: f64,
}

/// Marks an entity as a drifting asteroid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Asteroid;

/// Marks an entity as a player bullet. Its `Motion` never changes after spawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet;

/// Monotonic creation index. Scans and snapshots iterate in this order so
/// results match insertion order regardless of archetype storage layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpawnOrder(pub u64);

