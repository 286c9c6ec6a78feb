#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::core::enums::{EnemyType, PickupKind, Rarity, UpgradeId};
    use crate::drops::*;
    use crate::profiles::get_profile;
    use crate::upgrades::*;

    #[test]
    fn test_profiles_scale_with_archetype() {
        let basic = get_profile(EnemyType::Basic);
        let boss = get_profile(EnemyType::Boss);
        assert_eq!(basic.health, 125.0);
        assert_eq!(boss.health, 650.0);
        assert_eq!(basic.hit_radius(), 40.0);
        assert!(boss.contact_damage > basic.contact_damage);
        for t in EnemyType::ALL {
            let p = get_profile(t);
            assert!(p.drops.0 <= p.drops.1, "{t:?}");
        }
    }

    #[test]
    fn test_drop_counts_within_profile_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            assert_eq!(drop_count(EnemyType::Basic, &mut rng), 1);
            let boss = drop_count(EnemyType::Boss, &mut rng);
            assert!((3..=5).contains(&boss), "boss dropped {boss}");
            let elite = drop_count(EnemyType::Elite, &mut rng);
            assert!((2..=3).contains(&elite), "elite dropped {elite}");
        }
    }

    #[test]
    fn test_drop_table() {
        assert_eq!(drop_for_roll(EnemyType::Basic, 0.1), PickupKind::Sword);
        assert_eq!(drop_for_roll(EnemyType::Basic, 0.9), PickupKind::Mace);
        assert_eq!(drop_for_roll(EnemyType::Strong, 0.3), PickupKind::Mace);
        assert_eq!(drop_for_roll(EnemyType::Strong, 0.5), PickupKind::XpSmall);
        assert_eq!(drop_for_roll(EnemyType::Elite, 0.8), PickupKind::XpLarge);
        assert_eq!(drop_for_roll(EnemyType::Boss, 0.6), PickupKind::XpRare);
    }

    #[test]
    fn test_basic_enemies_never_drop_orbs() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut hearts = 0;
        for _ in 0..1000 {
            match roll_drop(EnemyType::Basic, &mut rng) {
                PickupKind::Heart => hearts += 1,
                PickupKind::Sword | PickupKind::Mace => {}
                other => panic!("basic enemy dropped {other:?}"),
            }
        }
        assert!(hearts > 50 && hearts < 160, "hearts {hearts}");
    }

    #[test]
    fn test_pickup_values() {
        assert_eq!(pickup_xp(PickupKind::Sword), 5);
        assert_eq!(pickup_xp(PickupKind::Mace), 8);
        assert_eq!(pickup_xp(PickupKind::XpRare), 50);
        assert_eq!(pickup_xp(PickupKind::Heart), 0);
        assert_eq!(heart_heal(100.0), 25.0);
        assert_eq!(heart_heal(90.0), 22.0);
    }

    #[test]
    fn test_catalog_matches_ids() {
        for id in UpgradeId::ALL {
            assert_eq!(get_upgrade(id).id, id);
        }
        assert_eq!(get_upgrade(UpgradeId::ChainLightning).rarity, Rarity::Legendary);
        assert_eq!(get_upgrade(UpgradeId::RapidFire).max_level, 5);
        assert_eq!(get_upgrade(UpgradeId::SlowTime).max_level, 2);
        assert_eq!(
            get_upgrade(UpgradeId::Ricochet).synergies,
            &[UpgradeId::ExplosiveRounds, UpgradeId::PiercingArrows]
        );
    }

    #[test]
    fn test_level_gates() {
        let at_two = available_upgrades(2, |_| 0);
        assert_eq!(at_two.len(), 7);
        assert!(!at_two.contains(&UpgradeId::ChainLightning));
        assert!(!at_two.contains(&UpgradeId::BulletStorm));
        assert!(!at_two.contains(&UpgradeId::Ricochet));

        let at_four = available_upgrades(4, |_| 0);
        assert!(at_four.contains(&UpgradeId::Ricochet));
        assert!(!at_four.contains(&UpgradeId::BulletStorm));

        assert_eq!(available_upgrades(8, |_| 0).len(), 10);
    }

    #[test]
    fn test_maxed_upgrades_excluded() {
        let available = available_upgrades(10, |id| match id {
            UpgradeId::SlowTime => 2,
            UpgradeId::RapidFire => 4,
            _ => 0,
        });
        assert!(!available.contains(&UpgradeId::SlowTime));
        assert!(available.contains(&UpgradeId::RapidFire));
    }

    #[test]
    fn test_draw_offer_distinct_and_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let available = available_upgrades(8, |_| 0);
        for _ in 0..50 {
            let mut offer = draw_offer(&available, 3, &mut rng);
            assert_eq!(offer.len(), 3);
            offer.sort();
            offer.dedup();
            assert_eq!(offer.len(), 3);
        }
        let short = draw_offer(&[UpgradeId::Scythe], 3, &mut rng);
        assert_eq!(short, vec![UpgradeId::Scythe]);
        assert!(draw_offer(&[], 3, &mut rng).is_empty());
    }

    #[test]
    fn test_rapid_fire_recomputes_from_base() {
        assert_eq!(attack_interval_ms(0), 500.0);
        assert!((attack_interval_ms(1) - 425.0).abs() < 1e-9);
        assert!((attack_interval_ms(3) - 325.0).abs() < 1e-9);
        assert!((attack_interval_ms(5) - 225.0).abs() < 1e-9);
        // Never below the floor, however high the level.
        assert_eq!(attack_interval_ms(20), 100.0);
    }

    #[test]
    fn test_shield_and_slow_time() {
        assert_eq!(shield_regen_per_sec(0), 0.0);
        assert!((shield_regen_per_sec(3) - 0.3).abs() < 1e-9);
        assert!(slow_time_params(0).is_none());
        let l1 = slow_time_params(1).unwrap();
        assert_eq!((l1.factor, l1.duration_ms), (0.3, 2000.0));
        let l2 = slow_time_params(2).unwrap();
        assert_eq!((l2.factor, l2.duration_ms), (0.15, 3000.0));
    }

    #[test]
    fn test_xp_curve() {
        assert_eq!(xp_needed(1), 300);
        assert_eq!(xp_needed(2), 480);
        assert_eq!(xp_needed(3), 768);
        // 300 × 1.6³ = 1228.8: 1228 XP is not yet enough.
        assert_eq!(xp_needed(4), 1229);
    }

    #[test]
    fn test_chariot_tiers() {
        assert_eq!(chariot_tier(1), 0);
        assert_eq!(chariot_tier(5), 1);
        assert_eq!(chariot_tier(14), 2);
        assert_eq!(chariot_tier(30), 3);
    }
}
