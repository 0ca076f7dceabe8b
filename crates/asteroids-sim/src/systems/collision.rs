//! Collision detection: circle overlap between ship, asteroids and bullets.
//!
//! Detection is read-only. The engine applies outcomes (score, removal,
//! respawn, game over) from the returned results.

use hecs::{Entity, World};

use asteroids_core::components::{Asteroid, Bullet, Collider, Ship, SpawnOrder};
use asteroids_core::types::Position;

/// A bullet that destroyed an asteroid this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletHit {
    pub bullet: Entity,
    pub bullet_order: SpawnOrder,
    pub asteroid: Entity,
    pub asteroid_order: SpawnOrder,
}

/// True iff the centers are closer than the sum of effective radii.
/// Symmetric; does not care what kind of body either side is.
pub fn collides(a_pos: &Position, a: &Collider, b_pos: &Position, b: &Collider) -> bool {
    a_pos.distance_to(b_pos) < a.effective_radius() + b.effective_radius()
}

/// First asteroid (in spawn order) overlapping the ship, if any.
pub fn ship_collision(world: &World) -> Option<(Entity, SpawnOrder)> {
    let (ship_pos, ship_collider) = world
        .query::<(&Ship, &Position, &Collider)>()
        .iter()
        .next()
        .map(|(_, (_, pos, collider))| (*pos, *collider))?;

    ordered_bodies::<Asteroid>(world)
        .into_iter()
        .find(|body| collides(&body.position, &body.collider, &ship_pos, &ship_collider))
        .map(|body| (body.entity, body.order))
}

/// Pair bullets with the asteroids they hit.
///
/// Bullets are scanned in spawn order; each takes the first live asteroid (in
/// spawn order) it overlaps. A bullet scores at most once and an asteroid is
/// destroyed at most once per call.
pub fn bullet_hits(world: &World) -> Vec<BulletHit> {
    let bullets = ordered_bodies::<Bullet>(world);
    let asteroids = ordered_bodies::<Asteroid>(world);
    let mut taken = vec![false; asteroids.len()];
    let mut hits = Vec::new();

    for bullet in &bullets {
        let target = asteroids.iter().enumerate().find(|(i, asteroid)| {
            !taken[*i]
                && collides(
                    &bullet.position,
                    &bullet.collider,
                    &asteroid.position,
                    &asteroid.collider,
                )
        });

        if let Some((i, asteroid)) = target {
            taken[i] = true;
            hits.push(BulletHit {
                bullet: bullet.entity,
                bullet_order: bullet.order,
                asteroid: asteroid.entity,
                asteroid_order: asteroid.order,
            });
        }
    }

    hits
}

struct Body {
    entity: Entity,
    order: SpawnOrder,
    position: Position,
    collider: Collider,
}

/// All bodies carrying marker `M`, sorted by spawn order.
fn ordered_bodies<M: hecs::Component>(world: &World) -> Vec<Body> {
    let mut bodies: Vec<Body> = world
        .query::<(&M, &Position, &Collider, &SpawnOrder)>()
        .iter()
        .map(|(entity, (_, position, collider, order))| Body {
            entity,
            order: *order,
            position: *position,
            collider: *collider,
        })
        .collect();

    bodies.sort_by_key(|b| b.order);
    bodies
}
