//! Game state snapshot: the complete visible state handed to the presentation
//! layer after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime, Velocity};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub round: RoundView,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub pickups: Vec<PickupView>,
    pub traps: Vec<TrapView>,
    /// Cards on offer while in `UpgradeSelection`, empty otherwise.
    pub upgrade_offer: Vec<UpgradeCard>,
    pub events: Vec<GameEvent>,
    pub score: ScoreView,
    /// Final result once the game is over.
    pub game_over: Option<GameSummary>,
}

/// Round progress for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundView {
    pub round: u32,
    pub phase: RoundPhase,
    pub enemies_needed: u32,
    pub enemies_spawned: u32,
    pub enemies_killed: u32,
    pub total_killed: u32,
    /// Scheduled enemies not yet spawned.
    pub queued: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub xp: u32,
    pub xp_needed: u32,
    pub level: u32,
    pub chariot_tier: u32,
    /// Current basic attack interval after Rapid Fire.
    pub attack_interval_ms: f64,
    pub upgrades: Vec<OwnedUpgrade>,
    /// Enemy speed factor while Slow Time runs.
    pub slow_time_factor: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OwnedUpgrade {
    pub id: UpgradeId,
    pub level: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub enemy_id: u32,
    pub enemy_type: EnemyType,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub phase: EnemyPhase,
    pub formation_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub kind: ProjectileKind,
    pub position: Position,
    pub velocity: Velocity,
    pub damage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub kind: PickupKind,
    pub position: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrapView {
    pub position: Position,
    /// Spikes are scheduled to land.
    pub striking: bool,
}

/// One upgrade card in a level-up offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeCard {
    pub id: UpgradeId,
    pub rarity: Rarity,
    pub current_level: u32,
    pub max_level: u32,
    /// Owned upgrades that combine well with this one.
    pub synergies: Vec<UpgradeId>,
}

/// Running score for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub total_killed: u32,
    pub level: u32,
    pub game_time_ms: f64,
    /// Score the run would be worth if it ended now.
    pub current: u64,
}

/// Result of a completed round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub enemies_killed: u32,
    pub enemies_needed: u32,
    pub total_killed: u32,
}

/// Points awarded per score component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub kills: u64,
    pub level: u64,
    pub time: u64,
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub score: u64,
    pub breakdown: ScoreBreakdown,
    pub total_killed: u32,
    pub level: u32,
    pub round: u32,
    pub game_time_ms: f64,
}
