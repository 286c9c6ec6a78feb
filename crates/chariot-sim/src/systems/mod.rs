//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` when read-only)
//! plus the engine state they need passed in. They do not own state: world
//! state lives in components, round and player state in the engine.

pub mod cleanup;
pub mod collision;
pub mod damage;
pub mod enemy_ai;
pub mod melee;
pub mod movement;
pub mod player_attack;
pub mod positioning;
pub mod projectiles;
pub mod snapshot;
pub mod spawn_queue;
pub mod traps;

use hecs::World;

use chariot_core::components::Enemy;
use chariot_core::enums::EnemyPhase;
use chariot_core::types::Position;
use chariot_rules::profiles::get_profile;

use crate::weapons::TargetInfo;

/// Live enemies as hit-resolution targets, optionally only engaged ones.
pub(crate) fn live_targets(world: &World, engaged_only: bool) -> Vec<TargetInfo> {
    let mut targets: Vec<TargetInfo> = world
        .query::<(&Position, &Enemy)>()
        .iter()
        .filter(|(_, (_, enemy))| enemy.is_alive())
        .filter(|(_, (_, enemy))| !engaged_only || enemy.phase == EnemyPhase::CombatActive)
        .map(|(_, (pos, enemy))| TargetInfo {
            enemy_id: enemy.enemy_id,
            position: *pos,
        })
        .collect();
    targets.sort_by_key(|t| t.enemy_id);
    targets
}

/// Collision radius of a live enemy.
pub(crate) fn enemy_hit_radius(enemy: &Enemy) -> f64 {
    get_profile(enemy.enemy_type).hit_radius()
}
