//! Upgrade catalog and the stats derived from upgrade levels.
//!
//! Effects are pure data: every derived stat is recomputed from the base value
//! and the current level, so the order in which upgrades were picked never
//! matters.

use rand::seq::SliceRandom;
use rand::Rng;

use chariot_core::constants::*;
use chariot_core::enums::{Rarity, UpgradeId};

/// Static catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct UpgradeDef {
    pub id: UpgradeId,
    pub name: &'static str,
    pub description: &'static str,
    pub rarity: Rarity,
    pub max_level: u32,
    pub synergies: &'static [UpgradeId],
}

pub const CATALOG: [UpgradeDef; 10] = [
    UpgradeDef {
        id: UpgradeId::ExplosiveRounds,
        name: "Explosive Rounds",
        description: "Fires explosive rounds that deal area damage",
        rarity: Rarity::Rare,
        max_level: 3,
        synergies: &[],
    },
    UpgradeDef {
        id: UpgradeId::PiercingArrows,
        name: "Piercing Arrows",
        description: "Fires arrows that pierce through enemies",
        rarity: Rarity::Common,
        max_level: 3,
        synergies: &[],
    },
    UpgradeDef {
        id: UpgradeId::RapidFire,
        name: "Rapid Fire",
        description: "Increases basic attack speed",
        rarity: Rarity::Common,
        max_level: 5,
        synergies: &[],
    },
    UpgradeDef {
        id: UpgradeId::HomingMissiles,
        name: "Homing Missiles",
        description: "Fires missiles that track the nearest enemy",
        rarity: Rarity::Common,
        max_level: 4,
        synergies: &[],
    },
    UpgradeDef {
        id: UpgradeId::SlowTime,
        name: "Slow Time on Hit",
        description: "Enemies slow down when you take damage",
        rarity: Rarity::Epic,
        max_level: 2,
        synergies: &[],
    },
    UpgradeDef {
        id: UpgradeId::ShieldRegen,
        name: "Energy Shield",
        description: "Regenerates health over time",
        rarity: Rarity::Rare,
        max_level: 4,
        synergies: &[],
    },
    UpgradeDef {
        id: UpgradeId::Ricochet,
        name: "Ricochet Shot",
        description: "Bullets bounce to nearby enemies",
        rarity: Rarity::Epic,
        max_level: 2,
        synergies: &[UpgradeId::ExplosiveRounds, UpgradeId::PiercingArrows],
    },
    UpgradeDef {
        id: UpgradeId::ChainLightning,
        name: "Chain Lightning",
        description: "Fires lightning that jumps between enemies",
        rarity: Rarity::Legendary,
        max_level: 3,
        synergies: &[UpgradeId::HomingMissiles],
    },
    UpgradeDef {
        id: UpgradeId::BulletStorm,
        name: "Bullet Storm",
        description: "Basic attack fires extra bullets",
        rarity: Rarity::Epic,
        max_level: 3,
        synergies: &[],
    },
    UpgradeDef {
        id: UpgradeId::Scythe,
        name: "Scythes",
        description: "Scythes on the wheels cut down nearby enemies",
        rarity: Rarity::Common,
        max_level: 3,
        synergies: &[],
    },
];

/// Catalog entry for an upgrade.
pub fn get_upgrade(id: UpgradeId) -> &'static UpgradeDef {
    // CATALOG is declared in UpgradeId::ALL order.
    let index = UpgradeId::ALL.iter().position(|&u| u == id).unwrap_or(0);
    &CATALOG[index]
}

/// Player level at which an upgrade starts appearing in offers.
pub fn unlock_level(id: UpgradeId) -> u32 {
    match id {
        UpgradeId::ChainLightning => CHAIN_LIGHTNING_UNLOCK_LEVEL,
        UpgradeId::BulletStorm => BULLET_STORM_UNLOCK_LEVEL,
        UpgradeId::Ricochet => RICOCHET_UNLOCK_LEVEL,
        _ => 1,
    }
}

/// Upgrades that may be offered: unlocked at `player_level` and below their cap.
pub fn available_upgrades(player_level: u32, level_of: impl Fn(UpgradeId) -> u32) -> Vec<UpgradeId> {
    CATALOG
        .iter()
        .filter(|def| player_level >= unlock_level(def.id))
        .filter(|def| level_of(def.id) < def.max_level)
        .map(|def| def.id)
        .collect()
}

/// Draw up to `count` distinct upgrades from `available`.
pub fn draw_offer(available: &[UpgradeId], count: usize, rng: &mut impl Rng) -> Vec<UpgradeId> {
    let mut pool = available.to_vec();
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

/// Basic attack interval after Rapid Fire at `level`, recomputed from the base rate.
pub fn attack_interval_ms(rapid_fire_level: u32) -> f64 {
    if rapid_fire_level == 0 {
        return BASE_ATTACK_INTERVAL_MS;
    }
    let bonus = RAPID_FIRE_BASE_BONUS + RAPID_FIRE_BONUS_PER_LEVEL * rapid_fire_level as f64;
    (BASE_ATTACK_INTERVAL_MS * (1.0 - bonus)).max(MIN_ATTACK_INTERVAL_MS)
}

/// Shield regen healing per second.
pub fn shield_regen_per_sec(level: u32) -> f64 {
    level as f64 * SHIELD_REGEN_PER_LEVEL
}

/// Enemy slow-down applied when the player is hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlowTimeParams {
    /// Multiplier on enemy speed.
    pub factor: f64,
    pub duration_ms: f64,
}

/// Slow Time parameters, or `None` when the upgrade is not owned.
pub fn slow_time_params(level: u32) -> Option<SlowTimeParams> {
    let (factor, duration_ms) = match level {
        0 => return None,
        1 => SLOW_TIME_LEVELS[0],
        _ => SLOW_TIME_LEVELS[1],
    };
    Some(SlowTimeParams {
        factor,
        duration_ms,
    })
}

/// XP required to advance from `level` to the next: `300 × 1.6^(level−1)`,
/// rounded up since XP is whole.
pub fn xp_needed(level: u32) -> u32 {
    let exponent = level.saturating_sub(1) as i32;
    // Float noise on exact products (300 × 1.6² = 768) must not round up.
    (BASE_XP * XP_MULTIPLIER.powi(exponent) - 1e-9).ceil() as u32
}

/// Cosmetic chariot tier for a level (0 below level 5).
pub fn chariot_tier(level: u32) -> u32 {
    CHARIOT_TIER_LEVELS.iter().filter(|&&l| level >= l).count() as u32
}
