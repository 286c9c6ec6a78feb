//! Death drops and pickup values.

use rand::Rng;

use chariot_core::constants::{HEART_DROP_CHANCE, HEART_HEAL_FRACTION};
use chariot_core::enums::{EnemyType, PickupKind};

use crate::profiles::get_profile;

/// Number of pickups an enemy drops on death.
pub fn drop_count(enemy_type: EnemyType, rng: &mut impl Rng) -> u32 {
    let (lo, hi) = get_profile(enemy_type).drops;
    rng.gen_range(lo..=hi)
}

/// Roll one drop for an archetype.
pub fn roll_drop(enemy_type: EnemyType, rng: &mut impl Rng) -> PickupKind {
    let roll: f64 = rng.gen();
    if roll < HEART_DROP_CHANCE {
        return PickupKind::Heart;
    }
    drop_for_roll(enemy_type, (roll - HEART_DROP_CHANCE) / (1.0 - HEART_DROP_CHANCE))
}

/// Non-heart drop table. `roll` is uniform in [0, 1).
pub fn drop_for_roll(enemy_type: EnemyType, roll: f64) -> PickupKind {
    match enemy_type {
        EnemyType::Basic => {
            if roll < 0.5 {
                PickupKind::Sword
            } else {
                PickupKind::Mace
            }
        }
        EnemyType::Strong => {
            if roll < 0.2 {
                PickupKind::Sword
            } else if roll < 0.4 {
                PickupKind::Mace
            } else {
                PickupKind::XpSmall
            }
        }
        EnemyType::Elite => {
            if roll < 0.2 {
                PickupKind::Sword
            } else if roll < 0.3 {
                PickupKind::Mace
            } else if roll < 0.7 {
                PickupKind::XpSmall
            } else {
                PickupKind::XpLarge
            }
        }
        EnemyType::Boss => {
            if roll < 0.1 {
                PickupKind::Sword
            } else if roll < 0.2 {
                PickupKind::Mace
            } else if roll < 0.5 {
                PickupKind::XpLarge
            } else {
                PickupKind::XpRare
            }
        }
    }
}

/// XP granted when a pickup is collected. Hearts grant none.
pub fn pickup_xp(kind: PickupKind) -> u32 {
    match kind {
        PickupKind::XpSmall => 3,
        PickupKind::Sword => 5,
        PickupKind::XpMedium | PickupKind::Mace => 8,
        PickupKind::XpLarge => 20,
        PickupKind::XpRare => 50,
        PickupKind::Heart => 0,
    }
}

/// Health restored by a heart (before capping at max health).
pub fn heart_heal(max_health: f64) -> f64 {
    (max_health * HEART_HEAL_FRACTION).floor()
}
