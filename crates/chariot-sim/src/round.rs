//! Round state machine and spawn scheduler.
//!
//! Stored in `SimulationEngine`, NOT as ECS entities. The manager owns the
//! per-round counters and the time-ordered spawn queue; the engine drains the
//! queue each tick and reports kills back.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use chariot_core::constants::*;
use chariot_core::enums::{EnemyType, RoundPhase};
use chariot_core::state::{RoundSummary, RoundView};
use chariot_rules::composition::{composition, enemies_for_round, formation_size};
use chariot_rules::profiles::get_profile;

/// One entry of the spawn queue. Consumed exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEnemy {
    pub enemy_type: EnemyType,
    /// Delay after round start before this enemy may spawn (ms).
    pub spawn_delay_ms: f64,
    /// Formation index, or -1 for an individual.
    pub formation_id: i32,
    /// Grid side length of the formation (1 for individuals).
    pub formation_size: u32,
    /// Row-major slot inside the formation grid.
    pub position_in_formation: u32,
}

impl ScheduledEnemy {
    pub fn in_formation(&self) -> bool {
        self.formation_id >= 0
    }
}

/// Per-round counters and spawn queue.
#[derive(Debug, Clone)]
pub struct RoundManager {
    current_round: u32,
    enemies_killed: u32,
    enemies_needed: u32,
    enemies_spawned: u32,
    total_killed: u32,
    phase: RoundPhase,
    queue: VecDeque<ScheduledEnemy>,
    round_started_ms: f64,
    next_spawn_ms: f64,
    position_cursor: u32,
}

impl RoundManager {
    /// Start at `round`, with its queue built and the clock at `now_ms`.
    pub fn new(round: u32, now_ms: f64, rng: &mut impl Rng) -> Self {
        let round = round.max(1);
        let mut manager = Self {
            current_round: round,
            enemies_killed: 0,
            enemies_needed: enemies_for_round(round),
            enemies_spawned: 0,
            total_killed: 0,
            phase: RoundPhase::Positioning,
            queue: VecDeque::new(),
            round_started_ms: now_ms,
            next_spawn_ms: now_ms,
            position_cursor: 0,
        };
        manager.generate_round_enemies(rng);
        manager
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn enemies_needed(&self) -> u32 {
        self.enemies_needed
    }

    pub fn enemies_spawned(&self) -> u32 {
        self.enemies_spawned
    }

    pub fn enemies_killed(&self) -> u32 {
        self.enemies_killed
    }

    pub fn total_killed(&self) -> u32 {
        self.total_killed
    }

    pub fn round_started_ms(&self) -> f64 {
        self.round_started_ms
    }

    /// Scheduled enemies not yet handed out.
    pub fn queue(&self) -> &VecDeque<ScheduledEnemy> {
        &self.queue
    }

    pub fn all_spawned(&self) -> bool {
        self.enemies_spawned >= self.enemies_needed
    }

    /// Killed and spawned both reached the requirement.
    pub fn is_complete(&self) -> bool {
        self.enemies_killed >= self.enemies_needed && self.all_spawned()
    }

    /// Rebuild the spawn queue for the current round.
    ///
    /// The round's composition is shuffled into one pool that is dealt into
    /// complete `size²` formations first, then into individuals. Formation
    /// members are staggered 100 ms apart, formations 2–3 s apart, and
    /// individuals 800 ms apart, with heavier archetypes held back further.
    pub fn generate_round_enemies(&mut self, rng: &mut impl Rng) {
        let needed = self.enemies_needed;
        let size = formation_size(self.current_round);
        let per_formation = size * size;
        let formations = needed / per_formation;
        let individuals = needed % per_formation;

        let mut pool = composition(self.current_round, needed).pool();
        pool.shuffle(rng);
        let mut pool = pool.into_iter();

        self.queue.clear();
        let mut spawn_time = 0.0;

        for f in 0..formations {
            for i in 0..per_formation {
                let enemy_type = pool.next().unwrap_or_default();
                self.queue.push_back(ScheduledEnemy {
                    enemy_type,
                    spawn_delay_ms: spawn_time
                        + i as f64 * FORMATION_MEMBER_STAGGER_MS
                        + get_profile(enemy_type).formation_delay_ms,
                    formation_id: f as i32,
                    formation_size: size,
                    position_in_formation: i,
                });
            }
            spawn_time += FORMATION_INTERVAL_MS + rng.gen::<f64>() * FORMATION_INTERVAL_JITTER_MS;
        }

        for i in 0..individuals {
            let enemy_type = pool.next().unwrap_or_default();
            self.queue.push_back(ScheduledEnemy {
                enemy_type,
                spawn_delay_ms: spawn_time
                    + i as f64 * INDIVIDUAL_STAGGER_MS
                    + get_profile(enemy_type).individual_delay_ms,
                formation_id: -1,
                formation_size: 1,
                position_in_formation: 0,
            });
        }

        self.queue
            .make_contiguous()
            .sort_by(|a, b| a.spawn_delay_ms.total_cmp(&b.spawn_delay_ms));
    }

    /// Hand out the head of the queue if it is due.
    ///
    /// Returns `None` when the queue is empty, the inter-spawn gap has not
    /// elapsed, the head's delay has not elapsed, or the round's spawn cap is
    /// reached.
    pub fn get_next_enemy_to_spawn(&mut self, now_ms: f64) -> Option<ScheduledEnemy> {
        let head = self.queue.front()?;
        if now_ms < self.next_spawn_ms
            || now_ms < self.round_started_ms + head.spawn_delay_ms
            || self.all_spawned()
        {
            return None;
        }

        let scheduled = self.queue.pop_front()?;
        self.enemies_spawned += 1;
        if !self.queue.is_empty() {
            self.next_spawn_ms = now_ms + SPAWN_GAP_MS;
        }
        Some(scheduled)
    }

    /// Next combat ring slot index (post-increment).
    pub fn next_position_index(&mut self) -> u32 {
        let index = self.position_cursor;
        self.position_cursor += 1;
        index
    }

    /// Count a kill. Returns true exactly when the round is now complete.
    /// Never reports completion while enemies are still unspawned.
    pub fn on_enemy_killed(&mut self) -> bool {
        self.enemies_killed += 1;
        self.total_killed += 1;
        self.is_complete()
    }

    /// Enter Combat. Returns false if the round was not positioning.
    pub fn start_combat_phase(&mut self) -> bool {
        if self.phase != RoundPhase::Positioning {
            return false;
        }
        self.phase = RoundPhase::Combat;
        true
    }

    /// Mark the round complete and drop anything still queued.
    pub fn complete_round(&mut self) -> RoundSummary {
        self.phase = RoundPhase::Complete;
        self.queue.clear();
        self.summary()
    }

    /// Advance to the next round and rebuild its queue.
    pub fn start_next_round(&mut self, now_ms: f64, rng: &mut impl Rng) {
        self.current_round += 1;
        self.enemies_killed = 0;
        self.enemies_spawned = 0;
        self.enemies_needed = enemies_for_round(self.current_round);
        self.phase = RoundPhase::Positioning;
        self.position_cursor = 0;
        self.round_started_ms = now_ms;
        self.next_spawn_ms = now_ms;
        self.generate_round_enemies(rng);
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            round: self.current_round,
            enemies_killed: self.enemies_killed,
            enemies_needed: self.enemies_needed,
            total_killed: self.total_killed,
        }
    }

    pub fn view(&self) -> RoundView {
        RoundView {
            round: self.current_round,
            phase: self.phase,
            enemies_needed: self.enemies_needed,
            enemies_spawned: self.enemies_spawned,
            enemies_killed: self.enemies_killed,
            total_killed: self.total_killed,
            queued: self.queue.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn drain_all(round: &mut RoundManager) -> Vec<(f64, ScheduledEnemy)> {
        let mut out = Vec::new();
        let mut now = round.round_started_ms();
        while !round.queue().is_empty() && now < 120_000.0 {
            if let Some(s) = round.get_next_enemy_to_spawn(now) {
                out.push((now, s));
            }
            now += DT_MS;
        }
        out
    }

    #[test]
    fn test_queue_matches_composition() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for r in [1, 2, 3, 5, 9, 14, 25] {
            let mut round = RoundManager::new(1, 0.0, &mut rng);
            for _ in 1..r {
                round.start_next_round(0.0, &mut rng);
            }
            let needed = round.enemies_needed();
            assert_eq!(round.queue().len() as u32, needed);
            let mix = composition(r, needed);
            for t in EnemyType::ALL {
                let queued = round.queue().iter().filter(|s| s.enemy_type == t).count() as u32;
                assert_eq!(queued, mix.count(t), "round {r} {t:?}");
            }
            let delays: Vec<f64> = round.queue().iter().map(|s| s.spawn_delay_ms).collect();
            assert!(delays.windows(2).all(|w| w[0] <= w[1]), "queue not sorted");
        }
    }

    #[test]
    fn test_round_one_formations() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let round = RoundManager::new(1, 0.0, &mut rng);
        assert_eq!(round.enemies_needed(), 8);
        assert!(round.queue().iter().all(|s| s.enemy_type == EnemyType::Basic));
        assert!(round.queue().iter().all(|s| s.formation_size == 2 && s.in_formation()));
        let first: Vec<f64> = round
            .queue()
            .iter()
            .filter(|s| s.formation_id == 0)
            .map(|s| s.spawn_delay_ms)
            .collect();
        assert_eq!(first, vec![0.0, 100.0, 200.0, 300.0]);
    }

    #[test]
    fn test_remainder_spawns_as_individuals() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut round = RoundManager::new(1, 0.0, &mut rng);
        round.start_next_round(0.0, &mut rng);
        // Round 2: 9 enemies = two 2x2 formations + 1 individual.
        let individuals: Vec<_> = round.queue().iter().filter(|s| !s.in_formation()).collect();
        assert_eq!(individuals.len(), 1);
        assert_eq!(individuals[0].formation_size, 1);
    }

    #[test]
    fn test_spawn_gap_and_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut round = RoundManager::new(1, 1000.0, &mut rng);
        assert!(round.get_next_enemy_to_spawn(999.0).is_none());
        assert!(round.get_next_enemy_to_spawn(1000.0).is_some());
        // Second member is due at +100 ms but the 200 ms gap holds it back.
        assert!(round.get_next_enemy_to_spawn(1150.0).is_none());
        assert!(round.get_next_enemy_to_spawn(1200.0).is_some());

        let mut round = RoundManager::new(1, 0.0, &mut rng);
        let spawned = drain_all(&mut round);
        assert_eq!(spawned.len(), 8);
        assert_eq!(round.enemies_spawned(), 8);
        assert!(round.get_next_enemy_to_spawn(1e9).is_none());
        for pair in spawned.windows(2) {
            assert!(pair[1].0 - pair[0].0 >= SPAWN_GAP_MS - 1e-6);
        }
        for (at, s) in &spawned {
            assert!(*at >= s.spawn_delay_ms, "spawned at {at} before delay {}", s.spawn_delay_ms);
        }
    }

    #[test]
    fn test_no_premature_completion() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut round = RoundManager::new(1, 0.0, &mut rng);
        // Spawn 7 of 8, then report 8 kills: never complete.
        let mut now = 0.0;
        while round.enemies_spawned() < 7 {
            round.get_next_enemy_to_spawn(now);
            now += DT_MS;
        }
        for _ in 0..8 {
            assert!(!round.on_enemy_killed());
        }
        assert_eq!(round.enemies_killed(), 8);
    }

    #[test]
    fn test_round_one_to_two_scenario() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut round = RoundManager::new(1, 0.0, &mut rng);
        let mut completed = false;
        let mut now = 0.0;
        let mut alive = 0u32;
        while !completed && now < 60_000.0 {
            if round.get_next_enemy_to_spawn(now).is_some() {
                alive += 1;
            }
            if alive > 0 {
                alive -= 1;
                completed = round.on_enemy_killed();
            }
            assert!(round.enemies_killed() <= round.enemies_spawned());
            now += DT_MS;
        }
        assert!(completed);
        assert_eq!(round.total_killed(), 8);
        let summary = round.complete_round();
        assert_eq!(summary.enemies_killed, 8);
        assert_eq!(round.phase(), RoundPhase::Complete);

        round.start_next_round(now, &mut rng);
        assert_eq!(round.current_round(), 2);
        assert_eq!(round.enemies_needed(), 9);
        assert_eq!(round.enemies_killed(), 0);
        assert_eq!(round.total_killed(), 8);
        assert_eq!(round.phase(), RoundPhase::Positioning);
        let strong = round
            .queue()
            .iter()
            .filter(|s| s.enemy_type == EnemyType::Strong)
            .count();
        assert_eq!(strong, 3);
    }

    #[test]
    fn test_phase_transitions() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut round = RoundManager::new(1, 0.0, &mut rng);
        assert_eq!(round.phase(), RoundPhase::Positioning);
        assert!(round.start_combat_phase());
        assert!(!round.start_combat_phase());
        assert_eq!(round.phase(), RoundPhase::Combat);
        assert_eq!(round.next_position_index(), 0);
        assert_eq!(round.next_position_index(), 1);
        round.start_next_round(0.0, &mut rng);
        assert_eq!(round.next_position_index(), 0);
    }
}
