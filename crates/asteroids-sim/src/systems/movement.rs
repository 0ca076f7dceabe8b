//! Kinematic integration system.
//!
//! Advances every moving body along its heading each tick. The ship and
//! asteroids wrap at the plane edges; bullets do not (cleanup removes them).

use hecs::World;

use asteroids_core::components::{Asteroid, Bullet, Motion, Ship};
use asteroids_core::types::{PlaneBounds, Position};

/// Apply friction to the ship, move it, then wrap.
pub fn run_ship(world: &mut World, bounds: &PlaneBounds) {
    for (_entity, (ship, pos, motion)) in
        world.query_mut::<(&Ship, &mut Position, &mut Motion)>()
    {
        motion.speed *= ship.friction;
        pos.advance(motion.heading, motion.speed);
        bounds.wrap(pos);
    }
}

/// Move bullets along their fixed heading. No wrap.
pub fn run_bullets(world: &mut World) {
    for (_entity, (_bullet, pos, motion)) in world.query_mut::<(&Bullet, &mut Position, &Motion)>()
    {
        pos.advance(motion.heading, motion.speed);
    }
}

/// Move asteroids, then wrap.
pub fn run_asteroids(world: &mut World, bounds: &PlaneBounds) {
    for (_entity, (_asteroid, pos, motion)) in
        world.query_mut::<(&Asteroid, &mut Position, &Motion)>()
    {
        pos.advance(motion.heading, motion.speed);
        bounds.wrap(pos);
    }
}
