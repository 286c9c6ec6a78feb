//! Kinematic integration system.
//!
//! Projectiles fly freely: position += velocity * dt. Engaged enemies move the
//! same way but slide along obstacle boxes instead of entering them.
//! Positioning enemies are placed by the positioning system, not here.

use hecs::World;

use chariot_core::components::{Enemy, Projectile};
use chariot_core::constants::DT;
use chariot_core::enums::EnemyPhase;
use chariot_core::types::{Position, Velocity};

use crate::arena::Arena;

pub fn run(world: &mut World, arena: &Arena) {
    for (_entity, (pos, vel, _projectile)) in
        world.query_mut::<(&mut Position, &Velocity, &Projectile)>()
    {
        pos.x += vel.x * DT;
        pos.y += vel.y * DT;
    }

    for (_entity, (pos, vel, enemy)) in world.query_mut::<(&mut Position, &Velocity, &Enemy)>() {
        if enemy.phase != EnemyPhase::CombatActive || !enemy.is_alive() {
            continue;
        }
        let target = Position::new(pos.x + vel.x * DT, pos.y + vel.y * DT);
        *pos = arena.resolve_move(pos, &target);
    }
}
