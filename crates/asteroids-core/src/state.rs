//! Game state snapshot: the complete visible state handed to the
//! presentation layer after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::GamePhase;
use crate::events::GameEvent;
use crate::types::{PlaneBounds, Position, SimTime};

/// Complete game state broadcast after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub score: u32,
    pub bounds: PlaneBounds,
    pub ship: ShipView,
    /// Ordered by spawn order.
    pub asteroids: Vec<AsteroidView>,
    /// Ordered by spawn order.
    pub bullets: Vec<BulletView>,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub position: Position,
    pub heading: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidView {
    pub spawn_order: u64,
    pub position: Position,
    pub radius: f64,
    pub heading: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub spawn_order: u64,
    pub position: Position,
    pub heading: f64,
}

impl GameStateSnapshot {
    /// Whether this tick ended the game.
    pub fn game_over_score(&self) -> Option<u32> {
        self.events.iter().find_map(GameEvent::final_score)
    }
}
