//! Collision system: projectile hits, enemy contact with the player and
//! pickup collection. Each overlapping pair is resolved at most once per tick.

use hecs::{Entity, World};

use chariot_core::components::{Enemy, Pickup, Projectile};
use chariot_core::constants::*;
use chariot_core::enums::{EnemyPhase, PickupKind, UpgradeId};
use chariot_core::events::{DamageSource, GameEvent};
use chariot_core::types::{Position, Velocity};
use chariot_rules::profiles::get_profile;
use chariot_rules::weapons::scythe_zone;

use crate::progression::PlayerState;
use crate::systems::damage::ContactKill;
use crate::weapons::{resolve_hit, DamageApplication, TargetInfo};

/// Resolve projectiles overlapping enemies. Returns the damage to apply.
pub fn projectile_hits(
    world: &mut World,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) -> Vec<DamageApplication> {
    let targets: Vec<(TargetInfo, f64)> = {
        let mut q = world.query::<(&Position, &Enemy)>();
        let mut t: Vec<_> = q
            .iter()
            .filter(|(_, (_, enemy))| enemy.is_alive())
            .map(|(_, (pos, enemy))| {
                (
                    TargetInfo {
                        enemy_id: enemy.enemy_id,
                        position: *pos,
                    },
                    super::enemy_hit_radius(enemy),
                )
            })
            .collect();
        t.sort_by_key(|(info, _)| info.enemy_id);
        t
    };
    let infos: Vec<TargetInfo> = targets.iter().map(|(info, _)| *info).collect();
    let mut damage = Vec::new();
    despawn_buffer.clear();

    for (entity, (pos, vel, projectile)) in
        world.query_mut::<(&Position, &mut Velocity, &mut Projectile)>()
    {
        let struck = targets
            .iter()
            .filter(|(info, _)| !projectile.has_hit(info.enemy_id))
            .map(|(info, radius)| (info, info.position.distance_to(pos), radius))
            .filter(|(_, d, radius)| *d <= PROJECTILE_RADIUS + **radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(info, _, _)| *info);
        let Some(struck) = struck else {
            continue;
        };

        let outcome = resolve_hit(projectile, vel.speed(), &struck, &infos);
        if let Some(redirect) = outcome.redirect {
            *vel = redirect;
        }
        damage.extend(outcome.damage);
        events.extend(outcome.events);
        if outcome.despawn {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    damage
}

/// Engaged enemies touching the player deal contact damage and are destroyed.
/// With the scythe, enemies inside the guard ellipses are parried instead.
/// Returns the damage the player took.
pub fn enemy_contact(world: &mut World, player: &mut PlayerState, events: &mut Vec<GameEvent>) -> f64 {
    let has_scythe = player.upgrade_level(UpgradeId::Scythe) > 0;
    let mut rammed = Vec::new();
    let mut taken = 0.0;

    for (entity, (pos, enemy)) in world.query_mut::<(&Position, &mut Enemy)>() {
        if enemy.phase != EnemyPhase::CombatActive || !enemy.is_alive() {
            continue;
        }
        let profile = get_profile(enemy.enemy_type);
        if pos.distance_to(&player.position) > PLAYER_HIT_RADIUS + profile.hit_radius() {
            continue;
        }
        if has_scythe && scythe_zone(&player.position, pos, SCYTHE_GUARD_PADDING).is_some() {
            continue;
        }

        let dealt = player.take_damage(profile.contact_damage);
        taken += dealt;
        enemy.health = 0.0;
        rammed.push(entity);
        events.push(GameEvent::PlayerDamaged {
            amount: dealt,
            health: player.health,
            source: DamageSource::Contact,
        });
    }

    for entity in rammed {
        let _ = world.insert_one(entity, ContactKill);
    }
    taken
}

/// Remove pickups within reach of the player, oldest first.
pub fn collect_pickups(
    world: &mut World,
    player: &Position,
    despawn_buffer: &mut Vec<Entity>,
) -> Vec<PickupKind> {
    despawn_buffer.clear();
    let mut collected: Vec<(u64, PickupKind)> = Vec::new();

    for (entity, (pos, pickup)) in world.query_mut::<(&Position, &Pickup)>() {
        if pos.distance_to(player) <= PICKUP_COLLECT_RADIUS {
            collected.push((pickup.sequence, pickup.kind));
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    collected.sort_by_key(|(sequence, _)| *sequence);
    collected.into_iter().map(|(_, kind)| kind).collect()
}
