//! Per-archetype enemy profiles.

use chariot_core::constants::ENEMY_HIT_RADIUS_FACTOR;
use chariot_core::enums::EnemyType;

/// Static stats for an enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    /// Base health before round scaling.
    pub health: f64,
    /// Pursuit speed (px/s) before level and slow-time factors.
    pub speed: f64,
    /// Body size (px).
    pub size: f64,
    pub xp_multiplier: u32,
    /// Relative weight in random spawn selection.
    pub spawn_weight: f64,
    /// Lowest player level at which the archetype is weighted in.
    pub min_level: u32,
    /// Damage dealt to the player on contact.
    pub contact_damage: f64,
    /// Inclusive range of pickups dropped on death.
    pub drops: (u32, u32),
    /// Extra spawn delay inside a formation (ms).
    pub formation_delay_ms: f64,
    /// Extra spawn delay when spawning alone (ms).
    pub individual_delay_ms: f64,
}

impl EnemyProfile {
    /// Collision radius.
    pub fn hit_radius(&self) -> f64 {
        self.size * ENEMY_HIT_RADIUS_FACTOR
    }
}

/// Get the profile for a given archetype.
pub fn get_profile(enemy_type: EnemyType) -> EnemyProfile {
    match enemy_type {
        EnemyType::Basic => EnemyProfile {
            health: 125.0,
            speed: 85.0,
            size: 80.0,
            xp_multiplier: 1,
            spawn_weight: 0.75,
            min_level: 1,
            contact_damage: 10.0,
            drops: (1, 1),
            formation_delay_ms: 0.0,
            individual_delay_ms: 0.0,
        },
        EnemyType::Strong => EnemyProfile {
            health: 225.0,
            speed: 80.0,
            size: 100.0,
            xp_multiplier: 2,
            spawn_weight: 0.20,
            min_level: 2,
            contact_damage: 16.0,
            drops: (1, 2),
            formation_delay_ms: 500.0,
            individual_delay_ms: 1000.0,
        },
        EnemyType::Elite => EnemyProfile {
            health: 350.0,
            speed: 110.0,
            size: 120.0,
            xp_multiplier: 3,
            spawn_weight: 0.04,
            min_level: 4,
            contact_damage: 22.0,
            drops: (2, 3),
            formation_delay_ms: 1000.0,
            individual_delay_ms: 2000.0,
        },
        EnemyType::Boss => EnemyProfile {
            health: 650.0,
            speed: 70.0,
            size: 240.0,
            xp_multiplier: 5,
            spawn_weight: 0.01,
            min_level: 6,
            contact_damage: 30.0,
            drops: (3, 5),
            formation_delay_ms: 1500.0,
            individual_delay_ms: 3000.0,
        },
    }
}
