//! Runtime game configuration, optionally loaded from a TOML file.
//!
//! [`GameConfig`] mirrors every tuning value in [`crate::constants`]. Missing
//! keys fall back to the compile-time defaults, so a minimal file can override
//! just the values you care about:
//!
//! ```toml
//! world_width = 1024.0
//! asteroid_count = 8
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::PlaneBounds;

/// Runtime-tunable gameplay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // --- World ---
    pub world_width: f64,
    pub world_height: f64,

    // --- Ship ---
    pub ship_rotation_speed: f64,
    pub ship_max_speed: f64,
    pub ship_friction: f64,
    pub ship_thrust: f64,

    // --- Asteroids ---
    pub asteroid_count: usize,
    pub asteroid_radius_min: f64,
    pub asteroid_radius_max: f64,
    pub asteroid_speed_min: f64,
    pub asteroid_speed_max: f64,

    // --- Bullets ---
    pub bullet_speed: f64,
    pub bullet_radius: f64,

    // --- Scoring ---
    pub asteroid_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ship_rotation_speed: SHIP_ROTATION_SPEED,
            ship_max_speed: SHIP_MAX_SPEED,
            ship_friction: SHIP_FRICTION,
            ship_thrust: SHIP_THRUST,
            asteroid_count: ASTEROID_COUNT,
            asteroid_radius_min: ASTEROID_RADIUS_MIN,
            asteroid_radius_max: ASTEROID_RADIUS_MAX,
            asteroid_speed_min: ASTEROID_SPEED_MIN,
            asteroid_speed_max: ASTEROID_SPEED_MAX,
            bullet_speed: BULLET_SPEED,
            bullet_radius: BULLET_RADIUS,
            asteroid_score: ASTEROID_SCORE,
        }
    }
}

/// Configuration errors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its valid range.
    #[error("invalid config value '{name}' = {value}: expected {expected}")]
    Invalid {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

impl GameConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn bounds(&self) -> PlaneBounds {
        PlaneBounds::new(self.world_width, self.world_height)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;
        non_negative("ship_rotation_speed", self.ship_rotation_speed)?;
        non_negative("ship_max_speed", self.ship_max_speed)?;
        non_negative("ship_thrust", self.ship_thrust)?;
        if !(self.ship_friction > 0.0 && self.ship_friction <= 1.0) {
            return Err(ConfigError::Invalid {
                name: "ship_friction",
                value: self.ship_friction,
                expected: "(0.0, 1.0]",
            });
        }
        non_negative("asteroid_radius_min", self.asteroid_radius_min)?;
        ordered(
            "asteroid_radius_max",
            self.asteroid_radius_min,
            self.asteroid_radius_max,
        )?;
        non_negative("asteroid_speed_min", self.asteroid_speed_min)?;
        ordered(
            "asteroid_speed_max",
            self.asteroid_speed_min,
            self.asteroid_speed_max,
        )?;
        non_negative("bullet_speed", self.bullet_speed)?;
        non_negative("bullet_radius", self.bullet_radius)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            name,
            value,
            expected: "a finite value > 0",
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            name,
            value,
            expected: "a finite value >= 0",
        })
    }
}

/// Sampling uses half-open ranges, so `max` must be strictly greater.
fn ordered(name: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if max > min && max.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            name,
            value: max,
            expected: "a finite value greater than the matching minimum",
        })
    }
}
