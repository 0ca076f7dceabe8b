//! Headless asteroids application.
//!
//! This crate wires the simulation to the outside world: a fixed-rate
//! game loop thread, a line-based key input source, and a JSON-lines
//! presentation sink.

pub mod control;
pub mod game_loop;
pub mod input;
pub mod presenter;
pub mod state;

pub use asteroids_core as core;
