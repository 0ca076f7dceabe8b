//! Player commands sent from the input source to the simulation.
//!
//! Commands are discrete events. The engine can apply them immediately or
//! queue them for the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Turn the ship counter-clockwise by its rotation increment.
    RotateLeft,
    /// Turn the ship clockwise by its rotation increment.
    RotateRight,
    /// Add thrust, capped at the ship's max speed.
    Thrust,
    /// Spawn one bullet at the ship's position and heading.
    Fire,
    /// Discard the session and start a new game.
    Restart,
}

impl PlayerCommand {
    /// Map a key identifier to a command.
    ///
    /// Accepts browser key names (`ArrowLeft`, `ArrowRight`, `ArrowUp`, `" "`)
    /// and a few plain-word aliases. Unrecognised keys map to `None` and
    /// should be ignored by the caller.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::RotateLeft),
            "ArrowRight" => Some(Self::RotateRight),
            "ArrowUp" => Some(Self::Thrust),
            " " | "Space" => Some(Self::Fire),
            other => match other.trim().to_ascii_lowercase().as_str() {
                "left" | "a" => Some(Self::RotateLeft),
                "right" | "d" => Some(Self::RotateRight),
                "up" | "thrust" | "w" => Some(Self::Thrust),
                "fire" | "space" => Some(Self::Fire),
                "restart" | "r" => Some(Self::Restart),
                _ => None,
            },
        }
    }
}
