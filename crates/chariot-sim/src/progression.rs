//! Player state: position, health, XP and owned upgrades.
//!
//! Stored in `SimulationEngine`, NOT as an ECS entity. Every upgrade effect is
//! derived from the owned level on demand, so applying an upgrade is only a
//! counter increment.

use std::collections::BTreeMap;

use glam::DVec2;
use rand::Rng;

use chariot_core::constants::*;
use chariot_core::enums::UpgradeId;
use chariot_core::error::SimError;
use chariot_core::state::{OwnedUpgrade, PlayerView, UpgradeCard};
use chariot_core::types::Position;
use chariot_rules::upgrades::{self, SlowTimeParams};

use crate::arena::Arena;

/// Result of a level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    /// New chariot tier, when this level reached one.
    pub tier_up: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct PlayerState {
    pub position: Position,
    /// Normalized movement direction (length ≤ 1).
    pub move_intent: DVec2,
    pub health: f64,
    pub max_health: f64,
    pub xp: u32,
    pub level: u32,
    pub chariot_tier: u32,
    upgrade_levels: BTreeMap<UpgradeId, u32>,
}

impl PlayerState {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            move_intent: DVec2::ZERO,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            xp: 0,
            level: 1,
            chariot_tier: 0,
            upgrade_levels: BTreeMap::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn xp_needed(&self) -> u32 {
        upgrades::xp_needed(self.level)
    }

    /// Add XP. Reaching the threshold advances exactly one level and resets
    /// XP to zero; any excess is discarded.
    pub fn gain_xp(&mut self, amount: u32) -> Option<LevelUp> {
        self.xp = self.xp.saturating_add(amount);
        if self.xp < self.xp_needed() {
            return None;
        }
        self.level += 1;
        self.xp = 0;

        let tier = upgrades::chariot_tier(self.level);
        let tier_up = (tier > self.chariot_tier).then_some(tier);
        self.chariot_tier = tier;
        Some(LevelUp {
            level: self.level,
            tier_up,
        })
    }

    /// Apply damage, never dropping below zero. Returns the damage taken.
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        let taken = amount.max(0.0).min(self.health);
        self.health -= taken;
        taken
    }

    /// Heal up to max health. Returns the amount actually restored.
    pub fn heal(&mut self, amount: f64) -> f64 {
        let healed = amount.max(0.0).min(self.max_health - self.health);
        self.health += healed;
        healed
    }

    /// Shield Regen healing for one tick of `dt` seconds.
    pub fn regenerate(&mut self, dt: f64) -> f64 {
        let rate = upgrades::shield_regen_per_sec(self.upgrade_level(UpgradeId::ShieldRegen));
        if rate <= 0.0 || !self.is_alive() {
            return 0.0;
        }
        self.heal(rate * dt)
    }

    /// Set the steering intent, clamped to unit length.
    pub fn set_move_intent(&mut self, x: f64, y: f64) {
        let intent = DVec2::new(x, y);
        self.move_intent = if intent.is_finite() {
            intent.clamp_length_max(1.0)
        } else {
            DVec2::ZERO
        };
    }

    /// Move along the intent for one tick, sliding along obstacles.
    pub fn step(&mut self, arena: &Arena, dt: f64) {
        if self.move_intent == DVec2::ZERO {
            return;
        }
        let target = Position::from(self.position.to_vec() + self.move_intent * PLAYER_SPEED * dt);
        self.position = arena.resolve_move(&self.position, &target);
    }

    pub fn upgrade_level(&self, id: UpgradeId) -> u32 {
        self.upgrade_levels.get(&id).copied().unwrap_or(0)
    }

    /// Take one level of an upgrade. Returns the new level.
    pub fn apply_upgrade(&mut self, id: UpgradeId) -> Result<u32, SimError> {
        let max_level = upgrades::get_upgrade(id).max_level;
        let level = self.upgrade_levels.entry(id).or_insert(0);
        if *level >= max_level {
            return Err(SimError::UpgradeMaxed {
                upgrade: id,
                max_level,
            });
        }
        *level += 1;
        Ok(*level)
    }

    pub fn attack_interval_ms(&self) -> f64 {
        upgrades::attack_interval_ms(self.upgrade_level(UpgradeId::RapidFire))
    }

    pub fn slow_time(&self) -> Option<SlowTimeParams> {
        upgrades::slow_time_params(self.upgrade_level(UpgradeId::SlowTime))
    }

    pub fn owned_upgrades(&self) -> Vec<OwnedUpgrade> {
        self.upgrade_levels
            .iter()
            .filter(|(_, level)| **level > 0)
            .map(|(&id, &level)| OwnedUpgrade { id, level })
            .collect()
    }

    /// Draw a level-up offer. Empty when nothing is left to take.
    pub fn generate_offer(&self, rng: &mut impl Rng) -> Vec<UpgradeId> {
        let available = upgrades::available_upgrades(self.level, |id| self.upgrade_level(id));
        upgrades::draw_offer(&available, UPGRADE_OFFER_SIZE, rng)
    }

    pub fn upgrade_card(&self, id: UpgradeId) -> UpgradeCard {
        let def = upgrades::get_upgrade(id);
        UpgradeCard {
            id,
            rarity: def.rarity,
            current_level: self.upgrade_level(id),
            max_level: def.max_level,
            synergies: def.synergies.to_vec(),
        }
    }

    pub fn view(&self, slow_time_factor: Option<f64>) -> PlayerView {
        PlayerView {
            position: self.position,
            health: self.health,
            max_health: self.max_health,
            xp: self.xp,
            xp_needed: self.xp_needed(),
            level: self.level,
            chariot_tier: self.chariot_tier,
            attack_interval_ms: self.attack_interval_ms(),
            upgrades: self.owned_upgrades(),
            slow_time_factor,
        }
    }
}
