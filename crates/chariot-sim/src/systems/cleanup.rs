//! Cleanup system: removes projectiles and pickups far from the player and
//! caps the number of pickups on the floor.

use hecs::{Entity, World};

use chariot_core::components::{Pickup, Projectile};
use chariot_core::constants::{CLEANUP_DISTANCE, MAX_PICKUPS};
use chariot_core::types::Position;

/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, player: &Position, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (pos, _projectile)) in world.query_mut::<(&Position, &Projectile)>() {
        if pos.distance_to(player) > CLEANUP_DISTANCE {
            despawn_buffer.push(entity);
        }
    }

    let mut kept: Vec<(u64, Entity)> = Vec::new();
    for (entity, (pos, pickup)) in world.query_mut::<(&Position, &Pickup)>() {
        if pos.distance_to(player) > CLEANUP_DISTANCE {
            despawn_buffer.push(entity);
        } else {
            kept.push((pickup.sequence, entity));
        }
    }

    // Oldest pickups go first once over the cap.
    if kept.len() > MAX_PICKUPS {
        kept.sort_by_key(|(sequence, _)| *sequence);
        let excess = kept.len() - MAX_PICKUPS;
        despawn_buffer.extend(kept.iter().take(excess).map(|(_, entity)| *entity));
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
