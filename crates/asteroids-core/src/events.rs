//! Events emitted by the simulation for UI feedback and game-over handling.

use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A new entity entered the world.
    Spawned { kind: EntityKind, spawn_order: u64 },
    /// A bullet left the plane and was removed.
    BulletExpired { spawn_order: u64 },
    /// A bullet destroyed an asteroid.
    AsteroidDestroyed {
        asteroid: u64,
        bullet: u64,
        /// Score after this hit was counted.
        score: u32,
    },
    /// The ship hit an asteroid. `final_score` is the score before the crash;
    /// `asteroid` is the spawn order of the first asteroid found overlapping.
    GameOver {
        final_score: u32,
        tick: u64,
        asteroid: u64,
    },
    /// The session was reinitialised to startup values.
    GameReset,
}

impl GameEvent {
    /// Final score if this is a game-over notification.
    pub fn final_score(&self) -> Option<u32> {
        match self {
            GameEvent::GameOver { final_score, .. } => Some(*final_score),
            _ => None,
        }
    }
}
