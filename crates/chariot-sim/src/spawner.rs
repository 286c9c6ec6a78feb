//! Enemy spawner and combat slot placement.
//!
//! Enemies enter through the arena gate in their formation grid, then travel to
//! a slot on the rings around the player. Placement never fails: when no valid
//! point is found within the search bounds a best-effort clamped point is used.

use std::f64::consts::{FRAC_PI_4, TAU};

use hecs::{Entity, World};
use rand::Rng;
use tracing::{debug, warn};

use chariot_core::components::{Enemy, SlotTravel};
use chariot_core::constants::*;
use chariot_core::enums::EnemyPhase;
use chariot_core::events::GameEvent;
use chariot_core::types::{Position, Velocity};
use chariot_rules::composition::scaled_health;
use chariot_rules::profiles::get_profile;

use crate::arena::Arena;
use crate::round::ScheduledEnemy;

/// Creates enemy entities and hands out their stable ids.
#[derive(Debug, Clone, Default)]
pub struct EnemySpawner {
    next_enemy_id: u32,
}

impl EnemySpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn one scheduled enemy and start its travel to combat slot `slot_index`.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn_enemy(
        &mut self,
        world: &mut World,
        arena: &Arena,
        scheduled: &ScheduledEnemy,
        round: u32,
        slot_index: u32,
        player: &Position,
        now_ms: f64,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> Entity {
        let profile = get_profile(scheduled.enemy_type);
        let position = spawn_point(arena, scheduled, player, rng);
        let slot = calculate_combat_position(arena, slot_index, player, rng);
        let health = scaled_health(profile.health, round);

        let enemy_id = self.next_enemy_id;
        self.next_enemy_id += 1;

        let entity = world.spawn((
            position,
            Velocity::default(),
            Enemy {
                enemy_id,
                enemy_type: scheduled.enemy_type,
                health,
                max_health: health,
                phase: EnemyPhase::Positioning,
                formation_id: scheduled.formation_id,
                slot_index,
            },
            SlotTravel {
                from: position,
                to: slot,
                started_ms: now_ms,
                duration_ms: travel_duration_ms(&position, &slot),
            },
        ));

        debug!(
            enemy_id,
            enemy_type = ?scheduled.enemy_type,
            formation = scheduled.formation_id,
            slot = slot_index,
            "enemy spawned"
        );
        events.push(GameEvent::EnemySpawned {
            enemy_id,
            enemy_type: scheduled.enemy_type,
            position,
        });
        entity
    }
}

/// Travel time to a combat slot at positioning speed, never under one second.
pub fn travel_duration_ms(from: &Position, to: &Position) -> f64 {
    (from.distance_to(to) / POSITIONING_SPEED * 1000.0).max(POSITIONING_MIN_MS)
}

/// Where a scheduled enemy enters the arena.
///
/// Formation members are laid out row-major on a grid centred under the gate,
/// starting half a spacing below its edge so the first row is clear of the
/// gate house. Anything that would land too close to the player is pushed
/// away radially.
pub fn spawn_point(
    arena: &Arena,
    scheduled: &ScheduledEnemy,
    player: &Position,
    rng: &mut impl Rng,
) -> Position {
    let Some(entrance) = arena.entrance else {
        return random_spawn_point(arena, player, rng);
    };

    let mut point = Position::new(entrance.x, entrance.y + FORMATION_SPACING / 2.0);
    if scheduled.in_formation() && scheduled.formation_size > 1 {
        let size = scheduled.formation_size;
        let row = scheduled.position_in_formation / size;
        let col = scheduled.position_in_formation % size;
        point.x = entrance.x - (size - 1) as f64 * FORMATION_SPACING / 2.0
            + col as f64 * FORMATION_SPACING;
        point.y += row as f64 * FORMATION_SPACING;
    }

    if point.distance_to(player) < SPAWN_SAFE_DISTANCE {
        return push_from_player(arena, player, &point);
    }
    arena.clamp(&point, 0.0)
}

/// Move a spawn point out to the push distance from the player. When the
/// straight push ends inside an obstacle, headings fanning out 45 degrees at
/// a time are tried before settling for the straight one.
fn push_from_player(arena: &Arena, player: &Position, point: &Position) -> Position {
    let away = player.angle_to(point);
    let straight = arena.clamp(&player.offset(away, SPAWN_PUSH_DISTANCE), 0.0);
    for step in 0..8u32 {
        let fan = step.div_ceil(2) as f64 * FRAC_PI_4;
        let turn = if step % 2 == 1 { fan } else { -fan };
        let candidate = arena.clamp(&player.offset(away + turn, SPAWN_PUSH_DISTANCE), 0.0);
        if !arena.is_blocked(&candidate) {
            return candidate;
        }
    }
    debug!(x = straight.x, y = straight.y, "no clear push heading, spawning anyway");
    straight
}

/// Spawn point for arenas without a gate: a random spot 600–800 px from the player.
pub fn random_spawn_point(arena: &Arena, player: &Position, rng: &mut impl Rng) -> Position {
    let mut first = None;
    for _ in 0..RANDOM_SPAWN_ATTEMPTS {
        let angle = rng.gen::<f64>() * TAU;
        let distance = rng.gen_range(RANDOM_SPAWN_MIN_DISTANCE..RANDOM_SPAWN_MAX_DISTANCE);
        let candidate = player.offset(angle, distance);
        if first.is_none() {
            first = Some(candidate);
        }
        if arena.in_bounds(&candidate, RANDOM_SPAWN_MARGIN) && !arena.is_blocked(&candidate) {
            return candidate;
        }
    }

    let fallback = arena.clamp(
        &first.unwrap_or_else(|| player.offset(0.0, RANDOM_SPAWN_MIN_DISTANCE)),
        RANDOM_SPAWN_MARGIN,
    );
    warn!(x = fallback.x, y = fallback.y, "no free random spawn point, using clamped position");
    fallback
}

/// A combat slot is usable when it is inside the edge margin, outside every
/// obstacle and at least the minimum stand-off from the player.
pub fn is_valid_slot(arena: &Arena, player: &Position, p: &Position) -> bool {
    arena.in_bounds(p, COMBAT_EDGE_MARGIN)
        && !arena.is_blocked(p)
        && p.distance_to(player) >= COMBAT_RING_BASE_RADIUS - 1e-6
}

/// Combat slot for ring index `index` around the player.
///
/// Slots fill rings of eight outward. A slot that lands in an obstacle or out
/// of bounds is perturbed around the ring, then found by an outward spiral.
pub fn calculate_combat_position(
    arena: &Arena,
    index: u32,
    player: &Position,
    rng: &mut impl Rng,
) -> Position {
    let ring = index / COMBAT_SLOTS_PER_RING;
    let slot = index % COMBAT_SLOTS_PER_RING;

    let angle = slot as f64 / COMBAT_SLOTS_PER_RING as f64 * TAU
        + rng.gen_range(-COMBAT_ANGLE_JITTER..COMBAT_ANGLE_JITTER);
    let radius = COMBAT_RING_BASE_RADIUS
        + COMBAT_RING_SPACING * ring as f64
        + rng.gen_range(-COMBAT_RADIUS_JITTER..COMBAT_RADIUS_JITTER);

    let mut candidate = arena.clamp(&player.offset(angle, radius), COMBAT_EDGE_MARGIN);

    // Clamping can pull the slot inside the stand-off circle.
    if candidate.distance_to(player) < COMBAT_RING_BASE_RADIUS {
        candidate = player.offset(player.angle_to(&candidate), COMBAT_RING_BASE_RADIUS);
        if !arena.in_bounds(&candidate, COMBAT_EDGE_MARGIN) {
            if let Some(p) = (0..8)
                .map(|k| player.offset(angle + k as f64 * FRAC_PI_4, COMBAT_RING_BASE_RADIUS))
                .find(|p| arena.in_bounds(p, COMBAT_EDGE_MARGIN))
            {
                candidate = p;
            }
        }
    }
    if is_valid_slot(arena, player, &candidate) {
        return candidate;
    }

    for attempt in 1..=COMBAT_PERTURB_ATTEMPTS {
        let p = player.offset(angle + attempt as f64 * COMBAT_PERTURB_STEP, radius);
        if is_valid_slot(arena, player, &p) {
            return p;
        }
    }

    let mut r = COMBAT_RING_BASE_RADIUS;
    while r < COMBAT_SPIRAL_MAX_RADIUS {
        let mut a = 0.0;
        while a < TAU {
            let p = player.offset(a, r);
            if is_valid_slot(arena, player, &p) {
                return p;
            }
            a += COMBAT_SPIRAL_ANGLE_STEP;
        }
        r += COMBAT_SPIRAL_RADIUS_STEP;
    }

    warn!(index, x = candidate.x, y = candidate.y, "no valid combat slot, using best effort");
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use chariot_core::enums::EnemyType;
    use chariot_core::types::ObstacleBox;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn member(size: u32, pos: u32) -> ScheduledEnemy {
        ScheduledEnemy {
            enemy_type: EnemyType::Basic,
            spawn_delay_ms: 0.0,
            formation_id: 0,
            formation_size: size,
            position_in_formation: pos,
        }
    }

    #[test]
    fn test_formation_grid_under_gate() {
        let arena = Arena::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let player = arena.center();
        let first = spawn_point(&arena, &member(3, 0), &player, &mut rng);
        let last = spawn_point(&arena, &member(3, 8), &player, &mut rng);
        assert_eq!(first, Position::new(1133.0, 302.0));
        assert_eq!(last, Position::new(1253.0, 422.0));
        for pos in 0..9 {
            let p = spawn_point(&arena, &member(3, pos), &player, &mut rng);
            assert!(!arena.is_blocked(&p), "member {pos} blocked at {p:?}");
        }
        let lone = spawn_point(&arena, &member(1, 0), &player, &mut rng);
        assert!(!arena.is_blocked(&lone), "{lone:?}");
    }

    #[test]
    fn test_spawn_pushed_away_from_player() {
        let arena = Arena::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let player = Position::new(1193.0, 372.0);
        let p = spawn_point(&arena, &member(1, 0), &player, &mut rng);
        assert!((p.distance_to(&player) - SPAWN_PUSH_DISTANCE).abs() < 1e-6);
        // Straight up would be inside the gate house.
        assert!(arena.is_blocked(&Position::new(1193.0, 122.0)));
        assert!(!arena.is_blocked(&p), "{p:?}");
    }

    #[test]
    fn test_combat_slots_are_valid() {
        let arena = Arena::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for player in [arena.center(), Position::new(400.0, 400.0), Position::new(2100.0, 1500.0)] {
            for index in 0..30 {
                let p = calculate_combat_position(&arena, index, &player, &mut rng);
                assert!(!arena.is_blocked(&p), "slot {index} blocked at {p:?}");
                assert!(
                    p.distance_to(&player) >= COMBAT_RING_BASE_RADIUS - 1e-6,
                    "slot {index} too close: {p:?}"
                );
            }
        }
    }

    #[test]
    fn test_blocked_slot_is_moved() {
        let mut arena = Arena::open(WORLD_WIDTH, WORLD_HEIGHT);
        let player = arena.center();
        // Wall covering the whole east side of the first ring.
        arena
            .obstacles
            .push(ObstacleBox::new(1, 1550.0, 600.0, 200.0, 600.0));
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let p = calculate_combat_position(&arena, 0, &player, &mut rng);
        assert!(is_valid_slot(&arena, &player, &p), "{p:?}");
    }

    #[test]
    fn test_random_spawn_without_gate() {
        let arena = Arena::open(WORLD_WIDTH, WORLD_HEIGHT);
        let player = arena.center();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..20 {
            let p = spawn_point(&arena, &member(2, 1), &player, &mut rng);
            let d = p.distance_to(&player);
            assert!((RANDOM_SPAWN_MIN_DISTANCE..RANDOM_SPAWN_MAX_DISTANCE).contains(&d), "{d}");
            assert!(arena.in_bounds(&p, RANDOM_SPAWN_MARGIN));
        }
    }

    #[test]
    fn test_random_spawn_falls_back_when_boxed_in() {
        // Too small for any point 600 px away.
        let arena = Arena::open(400.0, 400.0);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let p = random_spawn_point(&arena, &Position::new(200.0, 200.0), &mut rng);
        assert!(arena.in_bounds(&p, RANDOM_SPAWN_MARGIN));
    }

    #[test]
    fn test_spawned_enemy_components() {
        let arena = Arena::standard();
        let mut world = World::new();
        let mut events = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut spawner = EnemySpawner::new();
        let scheduled = ScheduledEnemy {
            enemy_type: EnemyType::Strong,
            ..member(2, 3)
        };
        let entity = spawner.spawn_enemy(
            &mut world,
            &arena,
            &scheduled,
            15,
            0,
            &arena.center(),
            100.0,
            &mut rng,
            &mut events,
        );
        let enemy = world.get::<&Enemy>(entity).unwrap();
        assert_eq!(enemy.enemy_id, 0);
        assert_eq!(enemy.health, 337.0);
        assert_eq!(enemy.phase, EnemyPhase::Positioning);
        let travel = world.get::<&SlotTravel>(entity).unwrap();
        assert!(travel.duration_ms >= POSITIONING_MIN_MS);
        assert!(matches!(events[0], GameEvent::EnemySpawned { enemy_id: 0, .. }));
    }
}
