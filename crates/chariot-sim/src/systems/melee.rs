//! Scythe system: blades on both wheels cut engaged enemies inside their
//! ellipses, with a per-enemy cooldown and a knockback.

use hecs::World;

use chariot_core::components::{Enemy, Knockback, MeleeCooldown};
use chariot_core::constants::*;
use chariot_core::enums::EnemyPhase;
use chariot_core::events::{DamageSource, GameEvent};
use chariot_core::types::{Position, Velocity};
use chariot_rules::weapons::{scythe_damage, scythe_knockback_heading, scythe_zone};

use crate::weapons::DamageApplication;

/// Strike every eligible enemy. An enemy touching the player counts as
/// inside a blade when it is within the enlarged guard ellipse.
pub fn run(
    world: &mut World,
    player: &Position,
    level: u32,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) -> Vec<DamageApplication> {
    if level == 0 {
        return Vec::new();
    }

    let mut strikes = Vec::new();
    for (entity, (pos, enemy, cooldown)) in
        world.query_mut::<(&Position, &Enemy, Option<&MeleeCooldown>)>()
    {
        if enemy.phase != EnemyPhase::CombatActive || !enemy.is_alive() {
            continue;
        }
        if cooldown.is_some_and(|c| now_ms - c.last_hit_ms < SCYTHE_HIT_COOLDOWN_MS) {
            continue;
        }
        let touching =
            pos.distance_to(player) <= PLAYER_HIT_RADIUS + super::enemy_hit_radius(enemy);
        let side = scythe_zone(player, pos, 0.0).or_else(|| {
            touching
                .then(|| scythe_zone(player, pos, SCYTHE_GUARD_PADDING))
                .flatten()
        });
        if let Some(side) = side {
            strikes.push((entity, enemy.enemy_id, *pos, side));
        }
    }

    let amount = scythe_damage(level);
    let mut damage = Vec::with_capacity(strikes.len());
    for (entity, enemy_id, pos, side) in strikes {
        let heading = scythe_knockback_heading(player, &pos, side);
        let _ = world.insert(
            entity,
            (
                MeleeCooldown { last_hit_ms: now_ms },
                Knockback {
                    impulse: Velocity::from_angle(heading, SCYTHE_KNOCKBACK_SPEED),
                    started_ms: now_ms,
                    duration_ms: SCYTHE_KNOCKBACK_MS,
                },
            ),
        );
        events.push(GameEvent::ScytheHit { enemy_id, side });
        damage.push(DamageApplication {
            enemy_id,
            amount,
            source: DamageSource::Scythe,
        });
    }
    damage
}
