//! Positioning system: eases freshly spawned enemies to their combat slots.

use hecs::World;

use chariot_core::components::{Enemy, SlotTravel};
use chariot_core::enums::{EnemyPhase, RoundPhase};
use chariot_core::types::Position;

/// Quadratic ease-out on `t` in [0, 1].
pub fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Advance every travelling enemy. Arrivals hold their slot, or engage
/// straight away when the round is already in combat. Returns arrivals.
pub fn run(world: &mut World, round_phase: RoundPhase, now_ms: f64) -> u32 {
    let mut arrived = 0;
    for (_entity, (pos, enemy, travel)) in
        world.query_mut::<(&mut Position, &mut Enemy, &SlotTravel)>()
    {
        if enemy.phase != EnemyPhase::Positioning {
            continue;
        }
        let t = ((now_ms - travel.started_ms) / travel.duration_ms).clamp(0.0, 1.0);
        *pos = Position::from(travel.from.to_vec().lerp(travel.to.to_vec(), ease_out(t)));
        if t >= 1.0 {
            enemy.phase = if round_phase == RoundPhase::Combat {
                EnemyPhase::CombatActive
            } else {
                EnemyPhase::Positioned
            };
            arrived += 1;
        }
    }
    arrived
}

/// No live enemy is still travelling.
pub fn all_positioned(world: &World) -> bool {
    world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, enemy)| enemy.is_alive())
        .all(|(_, enemy)| enemy.phase != EnemyPhase::Positioning)
}

/// Engage every live enemy, wherever it is. Returns how many changed phase.
pub fn activate_all(world: &mut World) -> u32 {
    let mut activated = 0;
    for (_entity, enemy) in world.query_mut::<&mut Enemy>() {
        if enemy.is_alive() && enemy.phase != EnemyPhase::CombatActive {
            enemy.phase = EnemyPhase::CombatActive;
            activated += 1;
        }
    }
    activated
}
