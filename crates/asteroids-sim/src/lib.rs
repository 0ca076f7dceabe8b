//! Simulation engine for the asteroids game.
//!
//! Owns the hecs ECS world, runs systems once per tick,
//! and produces GameStateSnapshots for the presentation layer.

pub mod engine;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use asteroids_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
