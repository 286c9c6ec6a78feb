//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems and in the
//! pure rule functions, not here. Entities refer to each other through the
//! stable `enemy_id` numbers rather than ECS handles, so every component can
//! be serialized.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Position, Velocity};

/// A live enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Stable id, unique for the whole game.
    pub enemy_id: u32,
    pub enemy_type: EnemyType,
    /// Current health. Zero means dead and awaiting removal this tick.
    pub health: f64,
    /// Round-scaled maximum health.
    pub max_health: f64,
    pub phase: EnemyPhase,
    /// Formation this enemy spawned with (-1 = spawned alone).
    pub formation_id: i32,
    /// Combat ring slot index assigned at spawn.
    pub slot_index: u32,
}

impl Enemy {
    /// Alive and not yet flagged for removal.
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// Eased travel from the spawn point to the combat slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlotTravel {
    pub from: Position,
    pub to: Position,
    pub started_ms: f64,
    pub duration_ms: f64,
}

/// Scythe knockback overriding steering until it decays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Knockback {
    /// Initial knockback velocity.
    pub impulse: Velocity,
    pub started_ms: f64,
    pub duration_ms: f64,
}

/// Time of the last scythe strike on this enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MeleeCooldown {
    pub last_hit_ms: f64,
}

/// Ricochet budget carried by a basic bullet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ricochet {
    pub bounces: u32,
    pub max_bounces: u32,
}

/// Kind-specific projectile state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ProjectilePayload {
    Basic {
        ricochet: Option<Ricochet>,
    },
    Piercing {
        hits: u32,
        max_hits: u32,
    },
    Explosive {
        radius: f64,
    },
    Homing {
        strength: f64,
        range: f64,
    },
    ChainLightning {
        max_hops: u32,
        hop_range: f64,
    },
}

/// A player projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub payload: ProjectilePayload,
    pub damage: f64,
    /// Upgrade level the projectile was fired at (0 for an unmodified bullet).
    pub level: u32,
    pub owner_is_player: bool,
    pub fired_at_ms: f64,
    pub lifetime_ms: f64,
    /// Enemies this projectile has already struck.
    pub hit_set: Vec<u32>,
}

impl Projectile {
    pub fn kind(&self) -> ProjectileKind {
        match self.payload {
            ProjectilePayload::Basic { .. } => ProjectileKind::Basic,
            ProjectilePayload::Piercing { .. } => ProjectileKind::Piercing,
            ProjectilePayload::Explosive { .. } => ProjectileKind::Explosive,
            ProjectilePayload::Homing { .. } => ProjectileKind::Homing,
            ProjectilePayload::ChainLightning { .. } => ProjectileKind::ChainLightning,
        }
    }

    pub fn has_hit(&self, enemy_id: u32) -> bool {
        self.hit_set.contains(&enemy_id)
    }
}

/// An item lying on the arena floor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    /// Monotonic drop sequence, used to evict the oldest pickups first.
    pub sequence: u64,
}

/// Who a pending trap strike is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrapTarget {
    Player,
    Enemy(u32),
}

/// A scheduled spike strike.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrapStrike {
    pub target: TrapTarget,
    pub lands_at_ms: f64,
}

/// A floor spike trap.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Trap {
    pub last_activation_ms: Option<f64>,
    pub pending: Option<TrapStrike>,
}
