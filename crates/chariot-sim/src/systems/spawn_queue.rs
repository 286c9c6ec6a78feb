//! Spawn-queue drain: turns due schedule entries into enemy entities.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use chariot_core::events::GameEvent;
use chariot_core::types::Position;

use crate::arena::Arena;
use crate::round::RoundManager;
use crate::spawner::EnemySpawner;

/// Spawn everything the round manager releases at `now_ms`. Returns the count.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    arena: &Arena,
    round: &mut RoundManager,
    spawner: &mut EnemySpawner,
    player: &Position,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) -> u32 {
    let mut spawned = 0;
    while let Some(scheduled) = round.get_next_enemy_to_spawn(now_ms) {
        let slot = round.next_position_index();
        spawner.spawn_enemy(
            world,
            arena,
            &scheduled,
            round.current_round(),
            slot,
            player,
            now_ms,
            rng,
            events,
        );
        spawned += 1;
    }
    spawned
}
