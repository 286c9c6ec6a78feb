//! Auto-attack system: every ready weapon fires at the nearest engaged enemy.

use hecs::World;

use chariot_core::events::GameEvent;

use crate::progression::PlayerState;
use crate::weapons::{fire_weapons, WeaponTimers, WorldHost};

/// Fire at the nearest combat-active enemy. Returns projectiles fired.
pub fn run(
    world: &mut World,
    events: &mut Vec<GameEvent>,
    timers: &mut WeaponTimers,
    player: &PlayerState,
    now_ms: f64,
) -> u32 {
    let target = super::live_targets(world, true)
        .into_iter()
        .map(|t| (t.position.distance_to(&player.position), t.position))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, position)| position);

    let Some(target) = target else {
        return 0;
    };
    let mut host = WorldHost { world, events };
    fire_weapons(&mut host, timers, player, &target, now_ms)
}
