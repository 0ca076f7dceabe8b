//! Simulation constants and tuning parameters.
//!
//! These are the compile-time defaults. `GameConfig` mirrors every value here
//! and can override any of them at runtime.

/// Simulation tick rate (Hz). One tick per display frame.
pub const TICK_RATE: u32 = 60;

// --- World bounds ---

/// Plane width in world units.
pub const WORLD_WIDTH: f64 = 800.0;

/// Plane height in world units.
pub const WORLD_HEIGHT: f64 = 600.0;

// --- Collision ---

/// Collision radius used for any body without an explicit radius (the ship).
pub const DEFAULT_COLLISION_RADIUS: f64 = 10.0;

// --- Ship ---

/// Heading change per rotate command (radians).
pub const SHIP_ROTATION_SPEED: f64 = 0.05;

/// Speed cap applied when thrusting.
pub const SHIP_MAX_SPEED: f64 = 5.0;

/// Per-tick speed multiplier.
pub const SHIP_FRICTION: f64 = 0.98;

/// Speed added per thrust command.
pub const SHIP_THRUST: f64 = 0.2;

// --- Asteroids ---

/// Asteroids present at game start.
pub const ASTEROID_COUNT: usize = 5;

/// Smallest asteroid radius (inclusive).
pub const ASTEROID_RADIUS_MIN: f64 = 20.0;

/// Largest asteroid radius (exclusive).
pub const ASTEROID_RADIUS_MAX: f64 = 50.0;

/// Slowest asteroid speed (inclusive).
pub const ASTEROID_SPEED_MIN: f64 = 1.0;

/// Fastest asteroid speed (exclusive).
pub const ASTEROID_SPEED_MAX: f64 = 3.0;

// --- Bullets ---

pub const BULLET_SPEED: f64 = 10.0;

pub const BULLET_RADIUS: f64 = 5.0;

// --- Scoring ---

/// Points awarded for each asteroid destroyed by a bullet.
pub const ASTEROID_SCORE: u32 = 10;
