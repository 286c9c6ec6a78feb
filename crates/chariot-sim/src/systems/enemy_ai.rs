//! Enemy AI system: steering for engaged enemies.
//!
//! Enemies under scythe knockback follow the decaying knockback velocity and
//! ignore steering until it runs out.

use hecs::World;

use chariot_core::components::{Enemy, Knockback};
use chariot_core::enums::EnemyPhase;
use chariot_core::types::{Position, Velocity};
use chariot_rules::profiles::get_profile;
use chariot_rules::steering::{steer, SteeringContext};

use crate::arena::Arena;
use crate::progression::PlayerState;

pub fn run(world: &mut World, arena: &Arena, player: &PlayerState, slow_factor: f64, now_ms: f64) {
    let others: Vec<(u32, Position)> = world
        .query::<(&Position, &Enemy)>()
        .iter()
        .filter(|(_, (_, enemy))| enemy.is_alive())
        .map(|(_, (pos, enemy))| (enemy.enemy_id, *pos))
        .collect();

    let mut neighbours = Vec::with_capacity(others.len());
    let mut expired = Vec::new();

    for (entity, (pos, vel, enemy, knockback)) in
        world.query_mut::<(&Position, &mut Velocity, &Enemy, Option<&Knockback>)>()
    {
        if enemy.phase != EnemyPhase::CombatActive || !enemy.is_alive() {
            continue;
        }

        if let Some(kb) = knockback {
            let elapsed = now_ms - kb.started_ms;
            if elapsed < kb.duration_ms {
                let decay = 1.0 - elapsed / kb.duration_ms;
                *vel = Velocity::new(kb.impulse.x * decay, kb.impulse.y * decay);
                continue;
            }
            expired.push(entity);
        }

        neighbours.clear();
        neighbours.extend(
            others
                .iter()
                .filter(|(id, _)| *id != enemy.enemy_id)
                .map(|(_, p)| *p),
        );

        let profile = get_profile(enemy.enemy_type);
        *vel = steer(&SteeringContext {
            position: *pos,
            player: player.position,
            base_speed: profile.speed,
            health_fraction: enemy.health / enemy.max_health,
            player_level: player.level,
            slow_factor,
            neighbours: &neighbours,
            obstacles: &arena.obstacles,
            world_width: arena.width,
            world_height: arena.height,
        });
    }

    for entity in expired {
        let _ = world.remove_one::<Knockback>(entity);
    }
}
