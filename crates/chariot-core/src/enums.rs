//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    /// Play is running; game time advances.
    Active,
    /// Player paused the game.
    Paused,
    /// Level-up card choice is pending.
    UpgradeSelection,
    /// Round finished; waiting for the player to continue.
    RoundSummary,
    /// Player health reached zero. Terminal until restart.
    GameOver,
}

/// Phase of the current round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Enemies spawn and move to their slots without engaging.
    #[default]
    Positioning,
    /// Enemies pursue and the player's weapons fire.
    Combat,
    /// All required enemies were spawned and killed.
    Complete,
}

/// Enemy archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyType {
    #[default]
    Basic,
    Strong,
    Elite,
    Boss,
}

impl EnemyType {
    /// All archetypes, weakest first.
    pub const ALL: [EnemyType; 4] = [
        EnemyType::Basic,
        EnemyType::Strong,
        EnemyType::Elite,
        EnemyType::Boss,
    ];
}

/// Per-enemy engagement state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyPhase {
    /// Travelling to the assigned combat slot.
    #[default]
    Positioning,
    /// Holding the slot, waiting for combat to start.
    Positioned,
    /// Pursuing the player; targetable by auto-attack.
    CombatActive,
}

/// Upgrade card identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeId {
    ExplosiveRounds,
    PiercingArrows,
    RapidFire,
    HomingMissiles,
    SlowTime,
    ShieldRegen,
    Ricochet,
    ChainLightning,
    BulletStorm,
    Scythe,
}

impl UpgradeId {
    /// Catalog order.
    pub const ALL: [UpgradeId; 10] = [
        UpgradeId::ExplosiveRounds,
        UpgradeId::PiercingArrows,
        UpgradeId::RapidFire,
        UpgradeId::HomingMissiles,
        UpgradeId::SlowTime,
        UpgradeId::ShieldRegen,
        UpgradeId::Ricochet,
        UpgradeId::ChainLightning,
        UpgradeId::BulletStorm,
        UpgradeId::Scythe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExplosiveRounds => "explosive_rounds",
            Self::PiercingArrows => "piercing_arrows",
            Self::RapidFire => "rapid_fire",
            Self::HomingMissiles => "homing_missiles",
            Self::SlowTime => "slow_time",
            Self::ShieldRegen => "shield_regen",
            Self::Ricochet => "ricochet",
            Self::ChainLightning => "chain_lightning",
            Self::BulletStorm => "bullet_storm",
            Self::Scythe => "scythe",
        }
    }
}

impl fmt::Display for UpgradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpgradeId {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        UpgradeId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| SimError::UnknownUpgrade(s.to_string()))
    }
}

/// Upgrade card rarity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Projectile families fired by the player's weapons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Auto-attack bullet (bullet storm and ricochet modify it).
    #[default]
    Basic,
    Piercing,
    Explosive,
    Homing,
    ChainLightning,
}

/// Items dropped by dead enemies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    #[default]
    XpSmall,
    XpMedium,
    XpLarge,
    XpRare,
    Sword,
    Mace,
    Heart,
}

/// Which scythe blade struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScytheSide {
    Left,
    Right,
}
