//! Events emitted by the simulation for the presentation layer.
//!
//! Each tick's events are drained into that tick's snapshot. Rendering, audio
//! and effect spawning react to them; the simulation never waits on them.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::state::{GameSummary, RoundSummary};
use crate::types::Position;

/// What dealt a particular piece of damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSource {
    Projectile(ProjectileKind),
    Explosion,
    ChainArc,
    Scythe,
    Trap,
    Contact,
}

/// Simulation events, in the order they happened within the tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    // --- Rounds ---
    RoundStarted {
        round: u32,
        enemies_needed: u32,
    },
    /// `forced` is set when a fallback deadline ended positioning.
    CombatStarted {
        round: u32,
        forced: bool,
    },
    RoundComplete {
        summary: RoundSummary,
    },
    GameOver {
        summary: GameSummary,
    },

    // --- Enemies ---
    EnemySpawned {
        enemy_id: u32,
        enemy_type: EnemyType,
        position: Position,
    },
    EnemyDamaged {
        enemy_id: u32,
        amount: f64,
        source: DamageSource,
    },
    EnemyKilled {
        enemy_id: u32,
        enemy_type: EnemyType,
        position: Position,
    },

    // --- Weapons ---
    ProjectileFired {
        kind: ProjectileKind,
        position: Position,
        heading: f64,
    },
    Explosion {
        position: Position,
        radius: f64,
    },
    ChainArc {
        from: Position,
        to: Position,
        hop: u32,
    },
    Ricochet {
        from_enemy: u32,
        to_enemy: u32,
    },
    ScytheHit {
        enemy_id: u32,
        side: ScytheSide,
    },
    TrapTriggered {
        position: Position,
    },

    // --- Player ---
    PlayerDamaged {
        amount: f64,
        health: f64,
        source: DamageSource,
    },
    PlayerHealed {
        amount: f64,
        health: f64,
    },
    PickupDropped {
        kind: PickupKind,
        position: Position,
    },
    PickupCollected {
        kind: PickupKind,
    },
    XpGained {
        amount: u32,
        xp: u32,
        xp_needed: u32,
    },
    LevelUp {
        level: u32,
    },
    /// Cosmetic chariot upgrade at levels 5, 10 and 15.
    ChariotTierUp {
        tier: u32,
    },
    UpgradeOffered {
        choices: Vec<UpgradeId>,
    },
    UpgradeSelected {
        upgrade: UpgradeId,
        level: u32,
    },
    SlowTimeStarted {
        factor: f64,
        duration_ms: f64,
    },
    SlowTimeEnded,
}
