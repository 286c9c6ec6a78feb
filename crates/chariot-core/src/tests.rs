#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::components::{Projectile, ProjectilePayload, Ricochet};
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::SimError;
    use crate::events::{DamageSource, GameEvent};
    use crate::state::{GameStateSnapshot, GameSummary, RoundSummary, ScoreBreakdown};
    use crate::types::{ObstacleBox, Position, SimTime, Velocity};

    #[test]
    fn test_upgrade_id_serde_is_snake_case() {
        let json = serde_json::to_string(&UpgradeId::ChainLightning).unwrap();
        assert_eq!(json, "\"chain_lightning\"");
        for id in UpgradeId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
            let back: UpgradeId = serde_json::from_str(&json).unwrap();
            assert_eq!(id, back);
        }
    }

    #[test]
    fn test_upgrade_id_from_str() {
        assert_eq!("rapid_fire".parse::<UpgradeId>(), Ok(UpgradeId::RapidFire));
        assert_eq!("  Bullet_Storm ".parse::<UpgradeId>(), Ok(UpgradeId::BulletStorm));
        assert_eq!(
            "laser".parse::<UpgradeId>(),
            Err(SimError::UnknownUpgrade("laser".to_string()))
        );
    }

    #[test]
    fn test_enemy_type_ordering() {
        assert!(EnemyType::Basic < EnemyType::Strong);
        assert!(EnemyType::Elite < EnemyType::Boss);
        assert_eq!(EnemyType::ALL.len(), 4);
    }

    #[test]
    fn test_command_serde_tagged() {
        let cmd = PlayerCommand::SelectUpgrade {
            upgrade: UpgradeId::Scythe,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"SelectUpgrade\""), "got {json}");
        assert!(json.contains("\"upgrade\":\"scythe\""), "got {json}");

        let back: PlayerCommand =
            serde_json::from_str(r#"{"type":"SetMoveIntent","x":1.0,"y":-0.5}"#).unwrap();
        match back {
            PlayerCommand::SetMoveIntent { x, y } => {
                assert_eq!(x, 1.0);
                assert_eq!(y, -0.5);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(PlayerCommand::ContinueRound.name(), "ContinueRound");
    }

    #[test]
    fn test_event_serde_tagged() {
        let event = GameEvent::RoundComplete {
            summary: RoundSummary {
                round: 3,
                enemies_killed: 10,
                enemies_needed: 10,
                total_killed: 27,
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"RoundComplete\""), "got {json}");

        let damaged = GameEvent::PlayerDamaged {
            amount: 10.0,
            health: 90.0,
            source: DamageSource::Projectile(ProjectileKind::Basic),
        };
        let json = serde_json::to_string(&damaged).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert!(matches!(
            back,
            GameEvent::PlayerDamaged {
                source: DamageSource::Projectile(ProjectileKind::Basic),
                ..
            }
        ));
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, GamePhase::MainMenu);
        assert!(back.game_over.is_none());
    }

    #[test]
    fn test_game_summary_roundtrip() {
        let summary = GameSummary {
            score: 8950,
            breakdown: ScoreBreakdown {
                kills: 4200,
                level: 3500,
                time: 1250,
            },
            total_killed: 42,
            level: 7,
            round: 6,
            game_time_ms: 125_000.0,
        };
        let json = serde_json::to_string(&summary).unwrap();
        let back: GameSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }

    #[test]
    fn test_position_geometry() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-9);

        let east = a.angle_to(&Position::new(10.0, 0.0));
        assert!(east.abs() < 1e-9);
        let south = a.angle_to(&Position::new(0.0, 10.0));
        assert!((south - std::f64::consts::FRAC_PI_2).abs() < 1e-9);

        let moved = a.offset(std::f64::consts::FRAC_PI_2, 100.0);
        assert!(moved.x.abs() < 1e-9);
        assert!((moved.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_position_clamped() {
        let p = Position::new(-50.0, 5000.0).clamped(WORLD_WIDTH, WORLD_HEIGHT, 150.0);
        assert_eq!(p, Position::new(150.0, WORLD_HEIGHT - 150.0));
    }

    #[test]
    fn test_velocity_from_angle() {
        let v = Velocity::from_angle(0.0, 600.0);
        assert!((v.x - 600.0).abs() < 1e-9);
        assert!(v.y.abs() < 1e-9);
        assert!((v.speed() - 600.0).abs() < 1e-9);
        assert!(v.heading().abs() < 1e-9);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..TICK_RATE {
            time.advance(DT_MS);
        }
        assert_eq!(time.tick, TICK_RATE as u64);
        assert!((time.elapsed_ms - 1000.0).abs() < 1e-6);
        time.advance(1500.0);
        assert_eq!(time.whole_seconds(), 2);
    }

    #[test]
    fn test_obstacle_box_contains_inclusive() {
        let b = ObstacleBox::new(1, 100.0, 100.0, 50.0, 20.0);
        assert!(b.contains(&Position::new(100.0, 100.0)));
        assert!(b.contains(&Position::new(150.0, 120.0)));
        assert!(!b.contains(&Position::new(150.1, 120.0)));
        assert!(b.contains_padded(&Position::new(160.0, 90.0), 10.0));
        assert_eq!(b.closest_point(&Position::new(0.0, 110.0)), Position::new(100.0, 110.0));
        assert_eq!(b.bottom_center(), Position::new(125.0, 120.0));
    }

    #[test]
    fn test_entrance_box_present() {
        let entrance = ARENA_OBSTACLES
            .iter()
            .find(|b| b.id == ENTRANCE_BOX_ID)
            .expect("entrance box");
        assert_eq!(entrance.bottom_center(), Position::new(1193.0, 272.0));
    }

    #[test]
    fn test_projectile_kind_and_hit_set() {
        let mut p = Projectile {
            payload: ProjectilePayload::Basic {
                ricochet: Some(Ricochet {
                    bounces: 0,
                    max_bounces: 2,
                }),
            },
            damage: BULLET_DAMAGE,
            level: 0,
            owner_is_player: true,
            fired_at_ms: 0.0,
            lifetime_ms: BULLET_LIFETIME_MS,
            hit_set: Vec::new(),
        };
        assert_eq!(p.kind(), ProjectileKind::Basic);
        assert!(!p.has_hit(7));
        p.hit_set.push(7);
        assert!(p.has_hit(7));

        p.payload = ProjectilePayload::ChainLightning {
            max_hops: 2,
            hop_range: 150.0,
        };
        assert_eq!(p.kind(), ProjectileKind::ChainLightning);
    }

    #[test]
    fn test_sim_error_messages() {
        let err = SimError::InvalidPhase {
            command: "ContinueRound",
            phase: GamePhase::Active,
        };
        assert_eq!(err.to_string(), "command `ContinueRound` is not valid during Active");
        let err = SimError::UpgradeMaxed {
            upgrade: UpgradeId::SlowTime,
            max_level: 2,
        };
        assert!(err.to_string().contains("slow_time"));
    }
}
