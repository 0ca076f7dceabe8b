//! Cleanup system: removes bullets that have left the plane.

use hecs::{Entity, World};
use tracing::debug;

use asteroids_core::components::{Bullet, SpawnOrder};
use asteroids_core::events::GameEvent;
use asteroids_core::types::{PlaneBounds, Position};

/// Remove every bullet outside the plane on any axis.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn expire_bullets(
    world: &mut World,
    bounds: &PlaneBounds,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
) {
    despawn_buffer.clear();

    let mut expired: Vec<(SpawnOrder, Entity)> = world
        .query::<(&Bullet, &Position, &SpawnOrder)>()
        .iter()
        .filter(|(_, (_, pos, _))| !bounds.contains(pos))
        .map(|(entity, (_, _, order))| (*order, entity))
        .collect();
    expired.sort_by_key(|(order, _)| *order);

    for (order, entity) in expired {
        debug!(bullet = order.0, "bullet left the plane");
        events.push(GameEvent::BulletExpired {
            spawn_order: order.0,
        });
        despawn_buffer.push(entity);
    }

    despawn_all(world, despawn_buffer);
}

/// Despawn collected entities, leaving the buffer empty.
pub fn despawn_all(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
