//! Running score state tracked by the engine.
//!
//! Stored in `SimulationEngine`, NOT as ECS entities.

/// Running score state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreState {
    /// Points shown to the player.
    pub points: u32,
    pub asteroids_destroyed: u32,
    pub bullets_fired: u32,
}

impl ScoreState {
    /// Count one asteroid kill and return the new point total.
    pub fn record_kill(&mut self, points: u32) -> u32 {
        self.asteroids_destroyed += 1;
        self.points = self.points.saturating_add(points);
        self.points
    }
}
