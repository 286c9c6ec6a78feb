//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world plus the round, player and
//! weapon state, processes player commands, runs all systems, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use chariot_core::commands::PlayerCommand;
use chariot_core::components::{Enemy, Pickup};
use chariot_core::constants::*;
use chariot_core::enums::{GamePhase, PickupKind, RoundPhase, UpgradeId};
use chariot_core::error::SimError;
use chariot_core::events::GameEvent;
use chariot_core::state::{GameStateSnapshot, GameSummary};
use chariot_core::types::{Position, SimTime};
use chariot_rules::drops::{drop_count, heart_heal, pickup_xp, roll_drop};

use crate::arena::Arena;
use crate::effects::ActiveEffects;
use crate::progression::PlayerState;
use crate::round::RoundManager;
use crate::score::game_summary;
use crate::spawner::EnemySpawner;
use crate::systems;
use crate::systems::damage::DeadEnemy;
use crate::weapons::WeaponTimers;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    /// Round a new game starts at.
    pub starting_round: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            starting_round: 1,
        }
    }
}

/// Deadlines that force a round out of positioning.
#[derive(Debug, Clone, Copy, Default)]
struct PositioningDeadlines {
    fallback_at_ms: f64,
    /// Armed once everything has spawned.
    grace_at_ms: Option<f64>,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
    starting_round: u32,

    // --- Round and player ---
    arena: Arena,
    round: RoundManager,
    spawner: EnemySpawner,
    player: PlayerState,
    weapons: WeaponTimers,
    effects: ActiveEffects,
    deadlines: PositioningDeadlines,
    next_pickup_sequence: u64,

    // --- Progression flow ---
    /// Level-ups whose card choice has not been made yet.
    pending_offers: u32,
    upgrade_offer: Vec<UpgradeId>,
    game_over: Option<GameSummary>,
}

impl SimulationEngine {
    /// Create a new simulation engine on the standard arena.
    pub fn new(config: SimConfig) -> Self {
        Self::with_arena(config, Arena::standard())
    }

    /// Create a new simulation engine on a custom arena.
    pub fn with_arena(config: SimConfig, arena: Arena) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let starting_round = config.starting_round.max(1);
        let round = RoundManager::new(starting_round, 0.0, &mut rng);
        let player = PlayerState::new(arena.center());
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale,
            rng,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            starting_round,
            arena,
            round,
            spawner: EnemySpawner::new(),
            player,
            weapons: WeaponTimers::default(),
            effects: ActiveEffects::default(),
            deadlines: PositioningDeadlines::default(),
            next_pickup_sequence: 0,
            pending_offers: 0,
            upgrade_offer: Vec::new(),
            game_over: None,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply a command immediately, reporting why it was rejected.
    pub fn apply_command(&mut self, command: PlayerCommand) -> Result<(), SimError> {
        self.handle_command(command)
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance(DT_MS);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.round,
            &self.player,
            self.effects.slow_time().map(|s| s.factor),
            &self.upgrade_offer,
            events,
            self.game_over,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn round(&self) -> &RoundManager {
        &self.round
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Cards currently on offer (empty outside upgrade selection).
    pub fn upgrade_offer(&self) -> &[UpgradeId] {
        &self.upgrade_offer
    }

    pub fn game_over(&self) -> Option<GameSummary> {
        self.game_over
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn round_mut(&mut self) -> &mut RoundManager {
        &mut self.round
    }

    /// Grant XP as if a pickup had been collected (for tests).
    #[cfg(test)]
    pub fn grant_test_xp(&mut self, amount: u32) {
        self.grant_xp(amount);
    }

    /// Process all queued commands. Rejected commands are logged and dropped.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            let name = command.name();
            if let Err(err) = self.handle_command(command) {
                warn!(command = name, %err, "command rejected");
            }
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) -> Result<(), SimError> {
        let name = command.name();
        let phase = self.phase;
        let wrong_phase = || SimError::InvalidPhase {
            command: name,
            phase,
        };

        match command {
            PlayerCommand::StartGame => {
                if phase != GamePhase::MainMenu {
                    return Err(wrong_phase());
                }
                self.start_game();
            }
            PlayerCommand::Restart => {
                if phase == GamePhase::MainMenu {
                    return Err(wrong_phase());
                }
                self.start_game();
            }
            PlayerCommand::ReturnToMenu => {
                if phase == GamePhase::MainMenu {
                    return Err(wrong_phase());
                }
                self.reset();
                self.phase = GamePhase::MainMenu;
            }
            PlayerCommand::Pause => {
                if phase != GamePhase::Active {
                    return Err(wrong_phase());
                }
                self.phase = GamePhase::Paused;
            }
            PlayerCommand::Resume => {
                if phase != GamePhase::Paused {
                    return Err(wrong_phase());
                }
                self.phase = GamePhase::Active;
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = if scale.is_finite() {
                    scale.clamp(0.0, 4.0)
                } else {
                    1.0
                };
            }
            PlayerCommand::SetMoveIntent { x, y } => {
                self.player.set_move_intent(x, y);
            }
            PlayerCommand::SelectUpgrade { upgrade } => {
                if phase != GamePhase::UpgradeSelection {
                    return Err(wrong_phase());
                }
                self.select_upgrade(upgrade)?;
            }
            PlayerCommand::ContinueRound => {
                if phase != GamePhase::RoundSummary {
                    return Err(wrong_phase());
                }
                self.continue_round();
            }
            PlayerCommand::SkipRound => {
                if phase != GamePhase::Active {
                    return Err(wrong_phase());
                }
                self.clear_enemies();
                self.finish_round();
                self.phase = GamePhase::RoundSummary;
            }
        }
        Ok(())
    }

    // --- Game flow ---

    /// Drop all game state and build a fresh game at the starting round.
    fn reset(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.round = RoundManager::new(self.starting_round, 0.0, &mut self.rng);
        self.spawner = EnemySpawner::new();
        self.player = PlayerState::new(self.arena.center());
        self.weapons.reset();
        self.effects.clear();
        self.deadlines = PositioningDeadlines::default();
        self.next_pickup_sequence = 0;
        self.pending_offers = 0;
        self.upgrade_offer.clear();
        self.game_over = None;
    }

    fn start_game(&mut self) {
        self.reset();
        let traps = self.arena.spawn_traps(&mut self.world);
        debug!(traps, "arena ready");
        self.phase = GamePhase::Active;
        self.begin_round();
    }

    /// Arm the positioning deadline and announce the round.
    fn begin_round(&mut self) {
        let now = self.time.elapsed_ms;
        let round = self.round.current_round();
        let needed = self.round.enemies_needed();
        self.deadlines = PositioningDeadlines {
            fallback_at_ms: now
                + POSITIONING_FALLBACK_BASE_MS
                + POSITIONING_FALLBACK_PER_ENEMY_MS * needed as f64,
            grace_at_ms: None,
        };
        info!(round, needed, "round started");
        self.events.push(GameEvent::RoundStarted {
            round,
            enemies_needed: needed,
        });
    }

    fn continue_round(&mut self) {
        self.clear_enemies();
        self.round
            .start_next_round(self.time.elapsed_ms, &mut self.rng);
        self.begin_round();
        self.phase = GamePhase::Active;
    }

    fn finish_round(&mut self) {
        let summary = self.round.complete_round();
        info!(
            round = summary.round,
            killed = summary.enemies_killed,
            total = summary.total_killed,
            "round complete"
        );
        self.events.push(GameEvent::RoundComplete { summary });
    }

    fn clear_enemies(&mut self) {
        let enemies: Vec<Entity> = self
            .world
            .query::<&Enemy>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in enemies {
            let _ = self.world.despawn(entity);
        }
    }

    fn end_game(&mut self) {
        let summary = game_summary(
            self.round.total_killed(),
            self.player.level,
            self.round.current_round(),
            self.time.elapsed_ms,
        );
        info!(
            score = summary.score,
            round = summary.round,
            level = summary.level,
            "game over"
        );
        self.game_over = Some(summary);
        self.events.push(GameEvent::GameOver { summary });
        self.phase = GamePhase::GameOver;
    }

    // --- Progression ---

    fn grant_xp(&mut self, amount: u32) {
        let level_up = self.player.gain_xp(amount);
        self.events.push(GameEvent::XpGained {
            amount,
            xp: self.player.xp,
            xp_needed: self.player.xp_needed(),
        });
        if let Some(up) = level_up {
            info!(level = up.level, "level up");
            self.events.push(GameEvent::LevelUp { level: up.level });
            if let Some(tier) = up.tier_up {
                self.events.push(GameEvent::ChariotTierUp { tier });
            }
            self.pending_offers += 1;
        }
    }

    /// Put a card choice on the table if one is owed. Returns true when the
    /// game is now waiting on a selection.
    fn offer_upgrades(&mut self) -> bool {
        if self.pending_offers == 0 {
            return false;
        }
        let offer = self.player.generate_offer(&mut self.rng);
        if offer.is_empty() {
            debug!(level = self.player.level, "no upgrades left to offer");
            self.pending_offers = 0;
            return false;
        }
        self.events.push(GameEvent::UpgradeOffered {
            choices: offer.clone(),
        });
        self.upgrade_offer = offer;
        self.phase = GamePhase::UpgradeSelection;
        true
    }

    fn select_upgrade(&mut self, upgrade: UpgradeId) -> Result<(), SimError> {
        if !self.upgrade_offer.contains(&upgrade) {
            return Err(SimError::UpgradeNotOffered(upgrade));
        }
        let level = self.player.apply_upgrade(upgrade)?;
        info!(%upgrade, level, "upgrade selected");
        self.events
            .push(GameEvent::UpgradeSelected { upgrade, level });

        self.upgrade_offer.clear();
        self.pending_offers = self.pending_offers.saturating_sub(1);
        if !self.offer_upgrades() {
            self.phase = if self.round.phase() == RoundPhase::Complete {
                GamePhase::RoundSummary
            } else {
                GamePhase::Active
            };
        }
        Ok(())
    }

    // --- Per-tick steps ---

    fn on_player_damaged(&mut self, now: f64) {
        if let Some(params) = self.player.slow_time() {
            let event = self.effects.trigger_slow_time(params, now);
            self.events.push(event);
        }
    }

    fn collect_pickups(&mut self) {
        let collected = systems::collision::collect_pickups(
            &mut self.world,
            &self.player.position,
            &mut self.despawn_buffer,
        );
        for kind in collected {
            self.events.push(GameEvent::PickupCollected { kind });
            if kind == PickupKind::Heart {
                let amount = self.player.heal(heart_heal(self.player.max_health));
                self.events.push(GameEvent::PlayerHealed {
                    amount,
                    health: self.player.health,
                });
            } else {
                self.grant_xp(pickup_xp(kind));
            }
        }
    }

    fn drop_pickups(&mut self, dead: &DeadEnemy) {
        for _ in 0..drop_count(dead.enemy_type, &mut self.rng) {
            let kind = roll_drop(dead.enemy_type, &mut self.rng);
            let scatter = Position::new(
                dead.position.x + self.rng.gen_range(-DROP_SCATTER..=DROP_SCATTER),
                dead.position.y + self.rng.gen_range(-DROP_SCATTER..=DROP_SCATTER),
            );
            let position = self.arena.clamp(&scatter, 0.0);
            let sequence = self.next_pickup_sequence;
            self.next_pickup_sequence += 1;
            self.world.spawn((position, Pickup { kind, sequence }));
            self.events
                .push(GameEvent::PickupDropped { kind, position });
        }
    }

    fn process_deaths(&mut self) {
        let dead = systems::damage::take_dead(&mut self.world, &mut self.despawn_buffer);
        for d in dead {
            self.events.push(GameEvent::EnemyKilled {
                enemy_id: d.enemy_id,
                enemy_type: d.enemy_type,
                position: d.position,
            });
            if !d.contact {
                self.drop_pickups(&d);
            }
            if self.round.on_enemy_killed() && self.round.phase() != RoundPhase::Complete {
                self.finish_round();
            }
        }
    }

    /// Leave positioning once everyone has arrived, or when a deadline passes.
    fn update_round_phase(&mut self, now: f64) {
        if self.round.phase() != RoundPhase::Positioning {
            return;
        }
        let all_spawned = self.round.all_spawned();
        let forced = if all_spawned && systems::positioning::all_positioned(&self.world) {
            false
        } else if now >= self.deadlines.fallback_at_ms {
            true
        } else if all_spawned {
            let grace = *self
                .deadlines
                .grace_at_ms
                .get_or_insert(now + POSITIONING_GRACE_MS);
            if now < grace {
                return;
            }
            true
        } else {
            return;
        };

        let round = self.round.current_round();
        self.round.start_combat_phase();
        let engaged = systems::positioning::activate_all(&mut self.world);
        if forced {
            warn!(round, engaged, "positioning deadline passed, forcing combat");
        } else {
            info!(round, engaged, "combat started");
        }
        self.events
            .push(GameEvent::CombatStarted { round, forced });
    }

    /// Force-complete a combat round that has nothing left to kill.
    fn check_stuck_round(&mut self) {
        if self.round.phase() != RoundPhase::Combat
            || !self.round.queue().is_empty()
            || self.round.enemies_killed() >= self.round.enemies_needed()
        {
            return;
        }
        let any_alive = self
            .world
            .query::<&Enemy>()
            .iter()
            .any(|(_, enemy)| enemy.is_alive());
        if any_alive {
            return;
        }
        warn!(
            round = self.round.current_round(),
            killed = self.round.enemies_killed(),
            needed = self.round.enemies_needed(),
            "no enemies left in an incomplete round, forcing completion"
        );
        self.finish_round();
    }

    /// End-of-tick phase: game over beats a card choice, which beats the
    /// round summary.
    fn resolve_phase(&mut self) {
        if !self.player.is_alive() {
            self.end_game();
            return;
        }
        if self.upgrade_offer.is_empty() && self.offer_upgrades() {
            return;
        }
        if self.round.phase() == RoundPhase::Complete {
            self.phase = GamePhase::RoundSummary;
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.time.elapsed_ms;

        // 1. Player movement
        self.player.step(&self.arena, DT);
        // 2. Shield regen and timed effects
        self.player.regenerate(DT);
        if let Some(event) = self.effects.expire(now) {
            self.events.push(event);
        }
        // 3. Spawn queue drain
        systems::spawn_queue::run(
            &mut self.world,
            &mut self.rng,
            &self.arena,
            &mut self.round,
            &mut self.spawner,
            &self.player.position,
            now,
            &mut self.events,
        );
        // 4. Positioning and the switch to combat
        systems::positioning::run(&mut self.world, self.round.phase(), now);
        self.update_round_phase(now);
        // 5. Enemy AI
        systems::enemy_ai::run(
            &mut self.world,
            &self.arena,
            &self.player,
            self.effects.slow_factor(),
            now,
        );
        // 6. Auto-attack
        if self.round.phase() == RoundPhase::Combat {
            systems::player_attack::run(
                &mut self.world,
                &mut self.events,
                &mut self.weapons,
                &self.player,
                now,
            );
        }
        // 7. Projectile guidance and expiry
        let mut damage = systems::projectiles::run(
            &mut self.world,
            &self.arena,
            now,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 8. Movement integration
        systems::movement::run(&mut self.world, &self.arena);
        // 9. Collisions, scythe and traps
        damage.extend(systems::collision::projectile_hits(
            &mut self.world,
            &mut self.events,
            &mut self.despawn_buffer,
        ));
        damage.extend(systems::melee::run(
            &mut self.world,
            &self.player.position,
            self.player.upgrade_level(UpgradeId::Scythe),
            now,
            &mut self.events,
        ));
        let mut player_damage =
            systems::collision::enemy_contact(&mut self.world, &mut self.player, &mut self.events);
        let traps = systems::traps::run(&mut self.world, &mut self.player, now, &mut self.events);
        damage.extend(traps.damage);
        player_damage += traps.player_damage;
        systems::damage::apply(&mut self.world, &damage, &mut self.events);
        if player_damage > 0.0 {
            self.on_player_damaged(now);
        }
        self.collect_pickups();
        // 10. Deaths, drops and kill accounting
        self.process_deaths();
        // 11. Safety net for desynced rounds
        self.check_stuck_round();
        // 12. Cleanup (far projectiles and pickups, pickup cap)
        systems::cleanup::run(
            &mut self.world,
            &self.player.position,
            &mut self.despawn_buffer,
        );
        // 13. Phase resolution
        self.resolve_phase();
    }
}
