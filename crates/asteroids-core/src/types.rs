//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position on the play plane.
/// x grows to the right, y grows downward (screen coordinates).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// The bounded play plane `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneBounds {
    pub width: f64,
    pub height: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        DVec2::from(*self).distance(DVec2::from(*other))
    }

    /// Move `speed` units along `heading`.
    ///
    /// Heading is measured clockwise from "up", so heading 0 decreases y.
    pub fn advance(&mut self, heading: f64, speed: f64) {
        let step = heading_vector(heading) * speed;
        self.x += step.x;
        self.y += step.y;
    }
}

impl From<Position> for DVec2 {
    fn from(pos: Position) -> Self {
        DVec2::new(pos.x, pos.y)
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Unit displacement for a heading (radians, clockwise from up).
pub fn heading_vector(heading: f64) -> DVec2 {
    DVec2::new(heading.sin(), -heading.cos())
}

impl PlaneBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a position lies inside the plane (edges inclusive).
    pub fn contains(&self, pos: &Position) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }

    /// Screen wrap, each axis independently: below zero jumps to the far
    /// edge, beyond the far edge jumps to zero.
    pub fn wrap(&self, pos: &mut Position) {
        pos.x = wrap_axis(pos.x, self.width);
        pos.y = wrap_axis(pos.y, self.height);
    }
}

impl Default for PlaneBounds {
    fn default() -> Self {
        Self::new(crate::constants::WORLD_WIDTH, crate::constants::WORLD_HEIGHT)
    }
}

fn wrap_axis(value: f64, edge: f64) -> f64 {
    if value < 0.0 {
        edge
    } else if value > edge {
        0.0
    } else {
        value
    }
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}
