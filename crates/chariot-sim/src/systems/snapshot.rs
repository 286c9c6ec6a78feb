//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only: it never modifies the world.

use hecs::World;

use chariot_core::components::*;
use chariot_core::enums::{GamePhase, UpgradeId};
use chariot_core::events::GameEvent;
use chariot_core::state::*;
use chariot_core::types::{Position, SimTime, Velocity};

use crate::progression::PlayerState;
use crate::round::RoundManager;
use crate::score::final_score;

/// Build a complete GameStateSnapshot from the current world and engine state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    round: &RoundManager,
    player: &PlayerState,
    slow_time_factor: Option<f64>,
    upgrade_offer: &[UpgradeId],
    events: Vec<GameEvent>,
    game_over: Option<GameSummary>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        round: round.view(),
        player: player.view(slow_time_factor),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        pickups: build_pickups(world),
        traps: build_traps(world),
        upgrade_offer: upgrade_offer.iter().map(|&id| player.upgrade_card(id)).collect(),
        events,
        score: ScoreView {
            total_killed: round.total_killed(),
            level: player.level,
            game_time_ms: time.elapsed_ms,
            current: final_score(round.total_killed(), player.level, time.elapsed_ms),
        },
        game_over,
    }
}

/// Live enemies ordered by id.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Position, &Enemy)>()
        .iter()
        .map(|(_, (pos, enemy))| EnemyView {
            enemy_id: enemy.enemy_id,
            enemy_type: enemy.enemy_type,
            position: *pos,
            health: enemy.health,
            max_health: enemy.max_health,
            phase: enemy.phase,
            formation_id: enemy.formation_id,
        })
        .collect();
    enemies.sort_by_key(|e| e.enemy_id);
    enemies
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Position, &Velocity, &Projectile)>()
        .iter()
        .map(|(_, (pos, vel, projectile))| ProjectileView {
            kind: projectile.kind(),
            position: *pos,
            velocity: *vel,
            damage: projectile.damage,
        })
        .collect()
}

/// Pickups in drop order.
fn build_pickups(world: &World) -> Vec<PickupView> {
    let mut pickups: Vec<(u64, PickupView)> = world
        .query::<(&Position, &Pickup)>()
        .iter()
        .map(|(_, (pos, pickup))| {
            (
                pickup.sequence,
                PickupView {
                    kind: pickup.kind,
                    position: *pos,
                },
            )
        })
        .collect();
    pickups.sort_by_key(|(sequence, _)| *sequence);
    pickups.into_iter().map(|(_, view)| view).collect()
}

fn build_traps(world: &World) -> Vec<TrapView> {
    world
        .query::<(&Position, &Trap)>()
        .iter()
        .map(|(_, (pos, trap))| TrapView {
            position: *pos,
            striking: trap.pending.is_some(),
        })
        .collect()
}
