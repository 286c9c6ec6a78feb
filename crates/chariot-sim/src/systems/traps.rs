//! Spike trap system.
//!
//! A trap off cooldown arms when the player (checked first) or an enemy steps
//! within range; the spikes land a moment later on that same target, only if
//! it is still alive and still in range.

use hecs::World;

use chariot_core::components::{Enemy, Trap, TrapStrike, TrapTarget};
use chariot_core::constants::*;
use chariot_core::events::{DamageSource, GameEvent};
use chariot_core::types::Position;

use crate::progression::PlayerState;
use crate::weapons::DamageApplication;

/// What the traps did this tick.
#[derive(Debug, Clone, Default)]
pub struct TrapOutcome {
    pub damage: Vec<DamageApplication>,
    /// Damage dealt to the player.
    pub player_damage: f64,
}

pub fn run(
    world: &mut World,
    player: &mut PlayerState,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) -> TrapOutcome {
    let enemies: Vec<(u32, Position)> = super::live_targets(world, false)
        .into_iter()
        .map(|t| (t.enemy_id, t.position))
        .collect();
    let mut outcome = TrapOutcome::default();

    for (_entity, (pos, trap)) in world.query_mut::<(&Position, &mut Trap)>() {
        if let Some(strike) = trap.pending {
            if now_ms >= strike.lands_at_ms {
                trap.pending = None;
                land_strike(pos, strike.target, player, &enemies, events, &mut outcome);
            }
        }

        let ready = trap
            .last_activation_ms
            .map_or(true, |last| now_ms - last >= TRAP_COOLDOWN_MS);
        if trap.pending.is_some() || !ready {
            continue;
        }

        let target = if player.is_alive() && player.position.distance_to(pos) < TRAP_RADIUS {
            Some(TrapTarget::Player)
        } else {
            enemies
                .iter()
                .find(|(_, p)| p.distance_to(pos) < TRAP_RADIUS)
                .map(|(id, _)| TrapTarget::Enemy(*id))
        };
        if let Some(target) = target {
            trap.last_activation_ms = Some(now_ms);
            trap.pending = Some(TrapStrike {
                target,
                lands_at_ms: now_ms + TRAP_STRIKE_DELAY_MS,
            });
            events.push(GameEvent::TrapTriggered { position: *pos });
        }
    }
    outcome
}

fn land_strike(
    trap: &Position,
    target: TrapTarget,
    player: &mut PlayerState,
    enemies: &[(u32, Position)],
    events: &mut Vec<GameEvent>,
    outcome: &mut TrapOutcome,
) {
    match target {
        TrapTarget::Player => {
            if player.is_alive() && player.position.distance_to(trap) < TRAP_RADIUS {
                let dealt = player.take_damage(TRAP_DAMAGE);
                outcome.player_damage += dealt;
                events.push(GameEvent::PlayerDamaged {
                    amount: dealt,
                    health: player.health,
                    source: DamageSource::Trap,
                });
            }
        }
        TrapTarget::Enemy(enemy_id) => {
            let in_range = enemies
                .iter()
                .any(|(id, p)| *id == enemy_id && p.distance_to(trap) < TRAP_RADIUS);
            if in_range {
                outcome.damage.push(DamageApplication {
                    enemy_id,
                    amount: TRAP_DAMAGE,
                    source: DamageSource::Trap,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chariot_core::enums::{EnemyPhase, EnemyType};

    /// Traps with a strike on the way.
    fn armed_traps(world: &World) -> usize {
        world
            .query::<&Trap>()
            .iter()
            .filter(|(_, trap)| trap.pending.is_some())
            .count()
    }

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

    #[test]
    fn test_player_checked_first_and_struck_after_delay() {
        let mut world = World::new();
        world.spawn((Position::new(100.0, 100.0), Trap::default()));
        world.spawn((Position::new(110.0, 100.0), enemy(1)));
        let mut player = PlayerState::new(Position::new(90.0, 100.0));
        let mut events = Vec::new();

        let armed = run(&mut world, &mut player, 0.0, &mut events);
        assert!(armed.damage.is_empty());
        assert_eq!(armed_traps(&world), 1);
        assert!(matches!(events[0], GameEvent::TrapTriggered { .. }));

        let early = run(&mut world, &mut player, 299.0, &mut events);
        assert_eq!(early.player_damage, 0.0);

        let struck = run(&mut world, &mut player, 300.0, &mut events);
        assert_eq!(struck.player_damage, TRAP_DAMAGE);
        assert!(struck.damage.is_empty(), "enemy was not the target");
        assert_eq!(player.health, PLAYER_MAX_HEALTH - TRAP_DAMAGE);
    }

    #[test]
    fn test_strike_misses_when_target_left() {
        let mut world = World::new();
        world.spawn((Position::new(100.0, 100.0), Trap::default()));
        let mut player = PlayerState::new(Position::new(100.0, 120.0));
        let mut events = Vec::new();
        run(&mut world, &mut player, 0.0, &mut events);
        player.position = Position::new(300.0, 300.0);
        let outcome = run(&mut world, &mut player, 300.0, &mut events);
        assert_eq!(outcome.player_damage, 0.0);
        assert_eq!(player.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_cooldown_between_activations() {
        let mut world = World::new();
        world.spawn((Position::new(100.0, 100.0), Trap::default()));
        world.spawn((Position::new(100.0, 110.0), enemy(7)));
        let mut player = PlayerState::new(Position::new(900.0, 900.0));
        let mut events = Vec::new();

        run(&mut world, &mut player, 0.0, &mut events);
        let hit = run(&mut world, &mut player, 300.0, &mut events);
        assert_eq!(hit.damage.len(), 1);
        assert_eq!(hit.damage[0].enemy_id, 7);

        // Still cooling down at 900 ms; re-arms at 1000 ms.
        run(&mut world, &mut player, 900.0, &mut events);
        assert_eq!(armed_traps(&world), 0);
        run(&mut world, &mut player, 1000.0, &mut events);
        assert_eq!(armed_traps(&world), 1);
    }
}
