//! Difficulty and composition model: round number to enemy count, type mix,
//! formation size and health scaling.

use serde::{Deserialize, Serialize};

use chariot_core::constants::*;
use chariot_core::enums::EnemyType;

/// Number of enemies required to clear a round: `min(30, 8 + (round - 1))`.
pub fn enemies_for_round(round: u32) -> u32 {
    (ROUND_BASE_ENEMIES + round.saturating_sub(1)).min(ROUND_MAX_ENEMIES)
}

/// Side length of a spawn formation grid. A formation holds `size²` enemies.
pub fn formation_size(round: u32) -> u32 {
    match round {
        0..=3 => 2,
        4..=7 => 3,
        8..=12 => 4,
        _ => 5,
    }
}

/// Enemy counts per archetype for one round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composition {
    pub basic: u32,
    pub strong: u32,
    pub elite: u32,
    pub boss: u32,
}

impl Composition {
    pub fn total(&self) -> u32 {
        self.basic + self.strong + self.elite + self.boss
    }

    pub fn count(&self, enemy_type: EnemyType) -> u32 {
        match enemy_type {
            EnemyType::Basic => self.basic,
            EnemyType::Strong => self.strong,
            EnemyType::Elite => self.elite,
            EnemyType::Boss => self.boss,
        }
    }

    fn count_mut(&mut self, enemy_type: EnemyType) -> &mut u32 {
        match enemy_type {
            EnemyType::Basic => &mut self.basic,
            EnemyType::Strong => &mut self.strong,
            EnemyType::Elite => &mut self.elite,
            EnemyType::Boss => &mut self.boss,
        }
    }

    /// One entry per enemy, weakest archetype first.
    pub fn pool(&self) -> Vec<EnemyType> {
        EnemyType::ALL
            .into_iter()
            .flat_map(|t| std::iter::repeat(t).take(self.count(t) as usize))
            .collect()
    }
}

/// One row of the balance table.
struct Band {
    /// Last round (inclusive) the row applies to.
    last_round: u32,
    /// Floored percentage per archetype, in `EnemyType::ALL` order.
    shares: [u32; 4],
    /// Archetype that absorbs whatever flooring left over.
    remainder: EnemyType,
}

const BANDS: [Band; 7] = [
    Band {
        last_round: 1,
        shares: [100, 0, 0, 0],
        remainder: EnemyType::Basic,
    },
    Band {
        last_round: 2,
        shares: [75, 0, 0, 0],
        remainder: EnemyType::Strong,
    },
    Band {
        last_round: 3,
        shares: [60, 40, 0, 0],
        remainder: EnemyType::Basic,
    },
    Band {
        last_round: 6,
        shares: [50, 35, 0, 0],
        remainder: EnemyType::Elite,
    },
    Band {
        last_round: 10,
        shares: [30, 40, 30, 0],
        remainder: EnemyType::Basic,
    },
    Band {
        last_round: 15,
        shares: [25, 35, 30, 0],
        remainder: EnemyType::Boss,
    },
    Band {
        last_round: u32::MAX,
        shares: [20, 30, 35, 0],
        remainder: EnemyType::Boss,
    },
];

/// Type mix for a round. The counts always sum to `total`.
pub fn composition(round: u32, total: u32) -> Composition {
    let band = BANDS
        .iter()
        .find(|b| round <= b.last_round)
        .unwrap_or(&BANDS[BANDS.len() - 1]);

    let mut mix = Composition::default();
    for (enemy_type, share) in EnemyType::ALL.into_iter().zip(band.shares) {
        *mix.count_mut(enemy_type) = total * share / 100;
    }
    let leftover = total - mix.total();
    *mix.count_mut(band.remainder) += leftover;
    mix
}

/// Number of difficulty thresholds at or below `round`.
pub fn difficulty_tier(round: u32) -> u32 {
    DIFFICULTY_THRESHOLDS.iter().filter(|&&t| round >= t).count() as u32
}

/// Round-scaled health: `floor(base × (1 + 0.5 × tier))`.
pub fn scaled_health(base: f64, round: u32) -> f64 {
    let multiplier = 1.0 + DIFFICULTY_TIER_BONUS * difficulty_tier(round) as f64;
    (base * multiplier).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemies_for_round_formula() {
        for r in 1..=60 {
            assert_eq!(enemies_for_round(r), (7 + r).min(30), "round {r}");
            assert!(enemies_for_round(r + 1) >= enemies_for_round(r));
        }
        assert_eq!(enemies_for_round(1), 8);
        assert_eq!(enemies_for_round(23), 30);
        assert_eq!(enemies_for_round(100), 30);
    }

    #[test]
    fn test_formation_size_bands() {
        assert_eq!(formation_size(1), 2);
        assert_eq!(formation_size(3), 2);
        assert_eq!(formation_size(4), 3);
        assert_eq!(formation_size(7), 3);
        assert_eq!(formation_size(8), 4);
        assert_eq!(formation_size(12), 4);
        assert_eq!(formation_size(13), 5);
        assert_eq!(formation_size(40), 5);
    }

    #[test]
    fn test_composition_sums_exactly() {
        for r in 1..=60 {
            let n = enemies_for_round(r);
            let mix = composition(r, n);
            assert_eq!(mix.total(), n, "round {r}: {mix:?}");
            assert_eq!(mix.pool().len(), n as usize);
        }
    }

    #[test]
    fn test_composition_table_rows() {
        assert_eq!(
            composition(1, 8),
            Composition {
                basic: 8,
                ..Default::default()
            }
        );
        assert_eq!(
            composition(2, 9),
            Composition {
                basic: 6,
                strong: 3,
                ..Default::default()
            }
        );
        // 60/40 floors to 6 + 4 of 10 with nothing left over.
        assert_eq!(
            composition(3, 10),
            Composition {
                basic: 6,
                strong: 4,
                ..Default::default()
            }
        );
        let r5 = composition(5, 12);
        assert_eq!((r5.basic, r5.strong, r5.elite, r5.boss), (6, 4, 2, 0));
        // 30/40/30 of 14 floors to 4/5/4; the lost enemy becomes Basic.
        let r7 = composition(7, 14);
        assert_eq!((r7.basic, r7.strong, r7.elite, r7.boss), (5, 5, 4, 0));
        let r12 = composition(12, 19);
        assert_eq!((r12.basic, r12.strong, r12.elite, r12.boss), (4, 6, 5, 4));
        let r20 = composition(20, 27);
        assert_eq!((r20.basic, r20.strong, r20.elite, r20.boss), (5, 8, 9, 5));
    }

    #[test]
    fn test_no_boss_before_round_eleven() {
        for r in 1..=10 {
            assert_eq!(composition(r, enemies_for_round(r)).boss, 0, "round {r}");
        }
        assert!(composition(11, enemies_for_round(11)).boss > 0);
    }

    #[test]
    fn test_scaled_health() {
        for r in 1..15 {
            assert_eq!(scaled_health(125.0, r), 125.0);
        }
        assert_eq!(difficulty_tier(15), 1);
        assert_eq!(scaled_health(125.0, 15), 187.0);
        assert_eq!(scaled_health(225.0, 22), 450.0);
        assert_eq!(difficulty_tier(50), 8);
        assert_eq!(scaled_health(650.0, 60), 3250.0);
    }
}
