//! Weapon formulas: damage, speed and behavior parameters per upgrade level,
//! firing patterns, homing turn rate and the scythe zones.

use std::f64::consts::{PI, TAU};

use chariot_core::constants::*;
use chariot_core::enums::{ProjectileKind, ScytheSide};
use chariot_core::types::Position;

/// Launch parameters shared by every projectile kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchStats {
    pub damage: f64,
    /// px/s
    pub speed: f64,
    pub lifetime_ms: f64,
}

/// Launch parameters for a projectile kind at an upgrade level.
pub fn launch_stats(kind: ProjectileKind, level: u32) -> LaunchStats {
    let l = level as f64;
    match kind {
        ProjectileKind::Basic => LaunchStats {
            damage: BULLET_DAMAGE,
            speed: BULLET_SPEED,
            lifetime_ms: BULLET_LIFETIME_MS,
        },
        ProjectileKind::Piercing => LaunchStats {
            damage: 18.0 + 8.0 * l,
            speed: 650.0 + 50.0 * l,
            lifetime_ms: PIERCING_LIFETIME_MS,
        },
        ProjectileKind::Explosive => LaunchStats {
            damage: 30.0 + 15.0 * l,
            speed: 350.0 + 25.0 * l,
            lifetime_ms: EXPLOSIVE_FUSE_MS,
        },
        ProjectileKind::Homing => LaunchStats {
            damage: 25.0 + 10.0 * l,
            speed: 400.0 + 50.0 * l,
            lifetime_ms: HOMING_LIFETIME_MS,
        },
        ProjectileKind::ChainLightning => LaunchStats {
            damage: 20.0 + 10.0 * l,
            speed: 500.0 + 50.0 * l,
            lifetime_ms: CHAIN_LIFETIME_MS,
        },
    }
}

/// Cooldown of a special weapon. The basic attack uses the Rapid Fire interval.
pub fn special_cooldown_ms(kind: ProjectileKind) -> Option<f64> {
    match kind {
        ProjectileKind::Basic => None,
        ProjectileKind::Piercing => Some(PIERCING_COOLDOWN_MS),
        ProjectileKind::Explosive => Some(EXPLOSIVE_COOLDOWN_MS),
        ProjectileKind::Homing => Some(HOMING_COOLDOWN_MS),
        ProjectileKind::ChainLightning => Some(CHAIN_COOLDOWN_MS),
    }
}

/// Distinct enemies a piercing arrow passes through before it breaks.
pub fn piercing_max_hits(level: u32) -> u32 {
    1 + level
}

/// Ricochet bounces a basic bullet may make.
pub fn ricochet_max_bounces(level: u32) -> u32 {
    1 + level
}

pub fn explosion_radius(level: u32) -> f64 {
    50.0 + 25.0 * level as f64
}

/// Area damage for an explosion of the given radius.
pub fn explosion_damage(damage: f64, radius: f64) -> f64 {
    damage * (1.0 + (radius - EXPLOSION_REFERENCE_RADIUS) / EXPLOSION_REFERENCE_RADIUS)
}

pub fn homing_strength(level: u32) -> f64 {
    0.2 + 0.1 * level as f64
}

/// Target acquisition range of a homing missile.
pub fn homing_range(level: u32) -> f64 {
    500.0 + 100.0 * level as f64
}

/// Extra enemies a chain lightning bolt may jump to after the first hit.
pub fn chain_max_hops(level: u32) -> u32 {
    1 + level
}

pub fn chain_hop_range(level: u32) -> f64 {
    120.0 + 30.0 * level as f64
}

/// Damage of the `hop`-th jump (0-based). Never negative.
pub fn chain_hop_damage(damage: f64, hop: u32) -> f64 {
    (damage * (CHAIN_FIRST_HOP_FACTOR - CHAIN_HOP_DECAY * hop as f64)).max(0.0)
}

/// Headings of the basic volley. Without bullet storm this is just `base`.
pub fn storm_headings(base: f64, storm_level: u32) -> Vec<f64> {
    let n = 1 + storm_level;
    match n {
        1 => vec![base],
        2 => (0..n)
            .map(|i| base + (i as f64 - 0.5) * STORM_PAIR_SPREAD)
            .collect(),
        _ => (0..n).map(|i| base + i as f64 * TAU / n as f64).collect(),
    }
}

/// Headings of a homing volley: one missile per level, fanned around `base`.
pub fn homing_headings(base: f64, level: u32) -> Vec<f64> {
    let n = level as f64;
    (0..level)
        .map(|i| base + (i as f64 - (n - 1.0) / 2.0) * HOMING_VOLLEY_SPREAD)
        .collect()
}

/// Wrap an angle into (-π, π].
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// New homing heading after one tick of turning toward `desired`.
pub fn homing_turn(current: f64, desired: f64, strength: f64) -> f64 {
    current + wrap_angle(desired - current) * strength * HOMING_TURN_GAIN
}

pub fn scythe_damage(level: u32) -> f64 {
    45.0 + 15.0 * level as f64
}

/// Centre of a scythe ellipse for a player at `player`.
pub fn scythe_centre(player: &Position, side: ScytheSide) -> Position {
    let (dx, dy) = match side {
        ScytheSide::Left => SCYTHE_LEFT_OFFSET,
        ScytheSide::Right => SCYTHE_RIGHT_OFFSET,
    };
    Position::new(player.x + dx, player.y + dy)
}

/// Inclusive point-in-axis-aligned-ellipse test. `width`/`height` are full axes.
pub fn in_ellipse(point: &Position, centre: &Position, width: f64, height: f64) -> bool {
    let a = width / 2.0;
    let b = height / 2.0;
    let dx = point.x - centre.x;
    let dy = point.y - centre.y;
    (dx * dx) / (a * a) + (dy * dy) / (b * b) <= 1.0
}

/// Which scythe zone (left first) contains `point`, with the zones grown by
/// `padding` on each axis.
pub fn scythe_zone(player: &Position, point: &Position, padding: f64) -> Option<ScytheSide> {
    [ScytheSide::Left, ScytheSide::Right].into_iter().find(|&side| {
        in_ellipse(
            point,
            &scythe_centre(player, side),
            SCYTHE_WIDTH + padding,
            SCYTHE_HEIGHT + padding,
        )
    })
}

/// Knockback heading for an enemy struck by a scythe blade.
pub fn scythe_knockback_heading(player: &Position, enemy: &Position, side: ScytheSide) -> f64 {
    let away = player.angle_to(enemy);
    match side {
        ScytheSide::Left => away + SCYTHE_KNOCKBACK_ANGLE,
        ScytheSide::Right => away - SCYTHE_KNOCKBACK_ANGLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_formulas() {
        let p = launch_stats(ProjectileKind::Piercing, 2);
        assert_eq!(p.damage, 34.0);
        assert_eq!(p.speed, 750.0);
        assert_eq!(piercing_max_hits(2), 3);

        let e = launch_stats(ProjectileKind::Explosive, 1);
        assert_eq!(e.damage, 45.0);
        assert_eq!(explosion_radius(1), 75.0);
        assert!((explosion_damage(45.0, 75.0) - 84.375).abs() < 1e-9);
        assert_eq!(explosion_damage(10.0, EXPLOSION_REFERENCE_RADIUS), 10.0);

        assert_eq!(launch_stats(ProjectileKind::Homing, 3).damage, 55.0);
        assert!((homing_strength(3) - 0.5).abs() < 1e-9);
        assert_eq!(homing_range(1), 600.0);

        assert_eq!(launch_stats(ProjectileKind::ChainLightning, 1).damage, 30.0);
        assert_eq!(chain_max_hops(1), 2);
        assert_eq!(chain_hop_range(2), 180.0);
        assert_eq!(scythe_damage(3), 90.0);
    }

    #[test]
    fn test_chain_hop_damage_decays() {
        assert!((chain_hop_damage(100.0, 0) - 80.0).abs() < 1e-9);
        assert!((chain_hop_damage(100.0, 1) - 70.0).abs() < 1e-9);
        assert_eq!(chain_hop_damage(100.0, 20), 0.0);
    }

    #[test]
    fn test_storm_headings() {
        assert_eq!(storm_headings(1.0, 0), vec![1.0]);
        let pair = storm_headings(0.0, 1);
        assert_eq!(pair.len(), 2);
        assert!((pair[0] + 0.15).abs() < 1e-9);
        assert!((pair[1] - 0.15).abs() < 1e-9);
        let ring = storm_headings(0.0, 3);
        assert_eq!(ring.len(), 4);
        assert!((ring[2] - PI).abs() < 1e-9);
    }

    #[test]
    fn test_homing_headings_are_centred() {
        assert_eq!(homing_headings(0.5, 1), vec![0.5]);
        let three = homing_headings(0.0, 3);
        assert!((three[0] + 0.4).abs() < 1e-9);
        assert!(three[1].abs() < 1e-9);
        assert!((three[2] - 0.4).abs() < 1e-9);
        assert!(homing_headings(0.0, 0).is_empty());
    }

    #[test]
    fn test_homing_turn_takes_short_way_round() {
        // From just below +π to just above -π is a small left turn, not a full sweep.
        let current = PI - 0.1;
        let desired = -PI + 0.1;
        let next = homing_turn(current, desired, 1.0);
        assert!(next > current, "turned the long way: {next}");
        assert!((next - current - 0.2 * 0.2).abs() < 1e-9);
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-9);
    }

    #[test]
    fn test_scythe_zones() {
        let player = Position::new(1000.0, 1000.0);
        let left = scythe_centre(&player, ScytheSide::Left);
        assert_eq!(scythe_zone(&player, &left, 0.0), Some(ScytheSide::Left));
        let right = scythe_centre(&player, ScytheSide::Right);
        assert_eq!(scythe_zone(&player, &right, 0.0), Some(ScytheSide::Right));
        // Far above the player: neither blade.
        assert_eq!(scythe_zone(&player, &Position::new(1000.0, 900.0), 0.0), None);
        // Just outside the bare ellipse but inside the guard padding.
        let edge = Position::new(right.x + 62.0, right.y);
        assert_eq!(scythe_zone(&player, &edge, 0.0), None);
        assert_eq!(
            scythe_zone(&player, &edge, SCYTHE_GUARD_PADDING),
            Some(ScytheSide::Right)
        );
    }
}
