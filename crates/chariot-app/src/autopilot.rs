//! Scripted player for headless runs.
//!
//! Reads each snapshot and answers with commands: kite away from nearby
//! enemies, drift toward pickups, take upgrade cards by a fixed priority and
//! continue past round summaries.

use glam::DVec2;

use chariot_core::commands::PlayerCommand;
use chariot_core::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use chariot_core::enums::{EnemyPhase, GamePhase, UpgradeId};
use chariot_core::state::GameStateSnapshot;
use chariot_core::types::Position;

/// Enemies closer than this push the chariot away.
const FLEE_RADIUS: f64 = 220.0;
/// Pickups within this range are worth a detour.
const PICKUP_SEEK_RADIUS: f64 = 400.0;
/// Drift back toward the middle when further out than this.
const CENTER_LEASH: f64 = 300.0;
/// Intent changes smaller than this are not re-sent.
const INTENT_EPSILON: f64 = 0.05;

/// Card preference, best first.
const UPGRADE_PRIORITY: [UpgradeId; 10] = [
    UpgradeId::RapidFire,
    UpgradeId::Scythe,
    UpgradeId::ExplosiveRounds,
    UpgradeId::PiercingArrows,
    UpgradeId::HomingMissiles,
    UpgradeId::ShieldRegen,
    UpgradeId::BulletStorm,
    UpgradeId::ChainLightning,
    UpgradeId::Ricochet,
    UpgradeId::SlowTime,
];

#[derive(Debug, Default)]
pub struct Autopilot {
    last_intent: DVec2,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands in response to one snapshot.
    pub fn decide(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        match snapshot.phase {
            GamePhase::Active => {
                let intent = steer(snapshot);
                if intent.distance(self.last_intent) < INTENT_EPSILON {
                    return Vec::new();
                }
                self.last_intent = intent;
                vec![PlayerCommand::SetMoveIntent {
                    x: intent.x,
                    y: intent.y,
                }]
            }
            GamePhase::UpgradeSelection => pick_upgrade(snapshot)
                .map(|upgrade| vec![PlayerCommand::SelectUpgrade { upgrade }])
                .unwrap_or_default(),
            GamePhase::RoundSummary => {
                self.last_intent = DVec2::ZERO;
                vec![PlayerCommand::ContinueRound]
            }
            GamePhase::MainMenu | GamePhase::Paused | GamePhase::GameOver => Vec::new(),
        }
    }
}

/// Highest-priority card in the current offer.
pub fn pick_upgrade(snapshot: &GameStateSnapshot) -> Option<UpgradeId> {
    UPGRADE_PRIORITY
        .into_iter()
        .find(|id| snapshot.upgrade_offer.iter().any(|card| card.id == *id))
        .or_else(|| snapshot.upgrade_offer.first().map(|card| card.id))
}

fn steer(snapshot: &GameStateSnapshot) -> DVec2 {
    let me = snapshot.player.position.to_vec();

    let flee = snapshot
        .enemies
        .iter()
        .filter(|e| e.phase == EnemyPhase::CombatActive)
        .map(|e| me - e.position.to_vec())
        .filter(|away| away.length() < FLEE_RADIUS)
        .fold(DVec2::ZERO, |acc, away| {
            acc + away.normalize_or_zero() / away.length().max(1.0)
        });
    if flee != DVec2::ZERO {
        return flee.normalize_or_zero();
    }

    let nearest_pickup = snapshot
        .pickups
        .iter()
        .map(|p| p.position.to_vec() - me)
        .filter(|to| to.length() < PICKUP_SEEK_RADIUS)
        .min_by(|a, b| a.length().total_cmp(&b.length()));
    if let Some(to) = nearest_pickup {
        return to.normalize_or_zero();
    }

    let center = Position::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0).to_vec();
    let home = center - me;
    if home.length() > CENTER_LEASH {
        home.normalize_or_zero()
    } else {
        DVec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chariot_core::enums::{EnemyType, PickupKind, Rarity};
    use chariot_core::state::{EnemyView, PickupView, UpgradeCard};

    fn snapshot_at(x: f64, y: f64) -> GameStateSnapshot {
        let mut snap = GameStateSnapshot {
            phase: GamePhase::Active,
            ..Default::default()
        };
        snap.player.position = Position::new(x, y);
        snap
    }

    fn enemy(x: f64, y: f64, phase: EnemyPhase) -> EnemyView {
        EnemyView {
            enemy_id: 1,
            enemy_type: EnemyType::Basic,
            position: Position::new(x, y),
            health: 125.0,
            max_health: 125.0,
            phase,
            formation_id: -1,
        }
    }

    fn card(id: UpgradeId) -> UpgradeCard {
        UpgradeCard {
            id,
            rarity: Rarity::Common,
            current_level: 0,
            max_level: 3,
            synergies: Vec::new(),
        }
    }

    #[test]
    fn test_flees_engaged_enemy() {
        let mut pilot = Autopilot::new();
        let mut snap = snapshot_at(1200.0, 900.0);
        snap.enemies.push(enemy(1300.0, 900.0, EnemyPhase::CombatActive));

        let commands = pilot.decide(&snap);
        assert!(matches!(
            commands.as_slice(),
            [PlayerCommand::SetMoveIntent { x, y }] if *x < -0.99 && y.abs() < 1e-9
        ));
        // Same situation: nothing new to say.
        assert!(pilot.decide(&snap).is_empty());
    }

    #[test]
    fn test_ignores_positioning_enemies() {
        let mut pilot = Autopilot::new();
        let mut snap = snapshot_at(1200.0, 900.0);
        snap.enemies.push(enemy(1250.0, 900.0, EnemyPhase::Positioning));
        assert!(pilot.decide(&snap).is_empty());
    }

    #[test]
    fn test_seeks_pickup_then_center() {
        let mut pilot = Autopilot::new();
        let mut snap = snapshot_at(1200.0, 900.0);
        snap.pickups.push(PickupView {
            kind: PickupKind::Sword,
            position: Position::new(1200.0, 700.0),
        });
        assert!(matches!(
            pilot.decide(&snap).as_slice(),
            [PlayerCommand::SetMoveIntent { y, .. }] if *y < -0.99
        ));

        let far = snapshot_at(200.0, 900.0);
        assert!(matches!(
            pilot.decide(&far).as_slice(),
            [PlayerCommand::SetMoveIntent { x, .. }] if *x > 0.99
        ));
    }

    #[test]
    fn test_upgrade_priority() {
        let mut snap = snapshot_at(0.0, 0.0);
        snap.phase = GamePhase::UpgradeSelection;
        snap.upgrade_offer = vec![
            card(UpgradeId::SlowTime),
            card(UpgradeId::Scythe),
            card(UpgradeId::ShieldRegen),
        ];
        let mut pilot = Autopilot::new();
        assert!(matches!(
            pilot.decide(&snap).as_slice(),
            [PlayerCommand::SelectUpgrade {
                upgrade: UpgradeId::Scythe
            }]
        ));
    }

    #[test]
    fn test_continues_after_round_summary() {
        let mut snap = snapshot_at(0.0, 0.0);
        snap.phase = GamePhase::RoundSummary;
        let mut pilot = Autopilot::new();
        assert!(matches!(
            pilot.decide(&snap).as_slice(),
            [PlayerCommand::ContinueRound]
        ));

        snap.phase = GamePhase::GameOver;
        assert!(pilot.decide(&snap).is_empty());
    }
}
