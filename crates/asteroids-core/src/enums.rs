//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// The three kinds of simulated body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Asteroid,
    Bullet,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Running,
    /// Ship collided with an asteroid. Nothing advances until a reset.
    GameOver,
}
