//! Projectile system: homing guidance, lifetime expiry and obstacle impacts.

use hecs::World;

use chariot_core::components::{Projectile, ProjectilePayload};
use chariot_core::events::GameEvent;
use chariot_core::types::{Position, Velocity};
use chariot_rules::weapons::homing_turn;

use crate::arena::Arena;
use crate::weapons::{explode, DamageApplication};

/// Returns area damage from explosive rounds whose fuse ran out.
pub fn run(
    world: &mut World,
    arena: &Arena,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<hecs::Entity>,
) -> Vec<DamageApplication> {
    let targets = super::live_targets(world, false);
    let engaged = super::live_targets(world, true);
    let mut damage = Vec::new();
    despawn_buffer.clear();

    for (entity, (pos, vel, projectile)) in
        world.query_mut::<(&Position, &mut Velocity, &Projectile)>()
    {
        if now_ms - projectile.fired_at_ms >= projectile.lifetime_ms {
            if let ProjectilePayload::Explosive { radius } = projectile.payload {
                damage.extend(explode(pos, projectile.damage, radius, &targets));
                events.push(GameEvent::Explosion {
                    position: *pos,
                    radius,
                });
            }
            despawn_buffer.push(entity);
            continue;
        }

        let bounces = matches!(
            projectile.payload,
            ProjectilePayload::Basic { ricochet: Some(_) }
        );
        if !bounces && arena.is_blocked(pos) {
            despawn_buffer.push(entity);
            continue;
        }

        if let ProjectilePayload::Homing { strength, range } = projectile.payload {
            let nearest = engaged
                .iter()
                .filter(|t| !projectile.has_hit(t.enemy_id))
                .map(|t| (t.position.distance_to(pos), t.position))
                .filter(|(d, _)| *d <= range)
                .min_by(|a, b| a.0.total_cmp(&b.0));
            if let Some((_, target)) = nearest {
                let heading = homing_turn(vel.heading(), pos.angle_to(&target), strength);
                *vel = Velocity::from_angle(heading, vel.speed());
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    damage
}

#[cfg(test)]
mod tests {
    use super::*;
    use chariot_core::components::Enemy;
    use chariot_core::constants::{EXPLOSIVE_FUSE_MS, WORLD_HEIGHT, WORLD_WIDTH};
    use chariot_core::enums::{EnemyPhase, EnemyType};
    use chariot_core::events::DamageSource;

    use crate::weapons::{ProjectileHost, WorldHost};

    fn enemy(id: u32) -> Enemy {
        Enemy {
            enemy_id: id,
            enemy_type: EnemyType::Basic,
            health: 125.0,
            max_health: 125.0,
            phase: EnemyPhase::CombatActive,
            formation_id: -1,
            slot_index: 0,
        }
    }

    fn projectile_count(world: &World) -> usize {
        world.query::<&Projectile>().iter().count()
    }

    #[test]
    fn test_explosive_round_detonates_at_fuse() {
        let arena = Arena::open(WORLD_WIDTH, WORLD_HEIGHT);
        let mut world = World::new();
        let mut events = Vec::new();
        WorldHost {
            world: &mut world,
            events: &mut events,
        }
        .create_explosive_round(Position::new(500.0, 500.0), 0.0, 1, 0.0);
        world.spawn((Position::new(540.0, 500.0), enemy(1)));
        world.spawn((Position::new(700.0, 500.0), enemy(2)));
        events.clear();
        let mut buffer = Vec::new();

        let early = run(&mut world, &arena, EXPLOSIVE_FUSE_MS - 1.0, &mut events, &mut buffer);
        assert!(early.is_empty());
        assert_eq!(projectile_count(&world), 1);

        let damage = run(&mut world, &arena, EXPLOSIVE_FUSE_MS, &mut events, &mut buffer);
        assert_eq!(damage.len(), 1);
        assert_eq!(damage[0].enemy_id, 1);
        assert_eq!(damage[0].source, DamageSource::Explosion);
        assert!((damage[0].amount - 84.375).abs() < 1e-9);
        assert!(matches!(
            events[0],
            GameEvent::Explosion { radius, .. } if radius == 75.0
        ));
        assert_eq!(projectile_count(&world), 0);
    }

    #[test]
    fn test_plain_projectile_expires_quietly() {
        let arena = Arena::open(WORLD_WIDTH, WORLD_HEIGHT);
        let mut world = World::new();
        let mut events = Vec::new();
        WorldHost {
            world: &mut world,
            events: &mut events,
        }
        .create_piercing_arrow(Position::new(500.0, 500.0), 0.0, 1, 0.0);
        world.spawn((Position::new(510.0, 500.0), enemy(1)));
        events.clear();
        let mut buffer = Vec::new();

        let damage = run(&mut world, &arena, 60_000.0, &mut events, &mut buffer);
        assert!(damage.is_empty());
        assert!(events.is_empty());
        assert_eq!(projectile_count(&world), 0);
    }
}
