//! Weapon firing and projectile hit resolution.
//!
//! Firing goes through the `ProjectileHost` capability so weapon code never
//! touches the world directly: the engine hands in a `WorldHost`, tests hand
//! in a recorder. Hit resolution is a pure function over one projectile and a
//! snapshot of the live enemies; the caller applies the returned damage.

use hecs::World;

use chariot_core::components::{Projectile, ProjectilePayload, Ricochet};
use chariot_core::constants::RICOCHET_RANGE;
use chariot_core::enums::{ProjectileKind, UpgradeId};
use chariot_core::events::{DamageSource, GameEvent};
use chariot_core::types::{Position, Velocity};
use chariot_rules::weapons::*;

use crate::progression::PlayerState;

// --- Firing ---

/// Something projectiles can be spawned into.
pub trait ProjectileHost {
    fn spawn_projectile(&mut self, position: Position, velocity: Velocity, projectile: Projectile);

    /// Auto-attack bullet. `ricochet_level` 0 means no ricochet.
    fn create_basic_bullet(&mut self, origin: Position, heading: f64, ricochet_level: u32, now_ms: f64) {
        let ricochet = (ricochet_level > 0).then(|| Ricochet {
            bounces: 0,
            max_bounces: ricochet_max_bounces(ricochet_level),
        });
        launch(self, origin, heading, ProjectilePayload::Basic { ricochet }, ricochet_level, now_ms);
    }

    fn create_piercing_arrow(&mut self, origin: Position, heading: f64, level: u32, now_ms: f64) {
        let payload = ProjectilePayload::Piercing {
            hits: 0,
            max_hits: piercing_max_hits(level),
        };
        launch(self, origin, heading, payload, level, now_ms);
    }

    fn create_explosive_round(&mut self, origin: Position, heading: f64, level: u32, now_ms: f64) {
        let payload = ProjectilePayload::Explosive {
            radius: explosion_radius(level),
        };
        launch(self, origin, heading, payload, level, now_ms);
    }

    fn create_homing_missile(&mut self, origin: Position, heading: f64, level: u32, now_ms: f64) {
        let payload = ProjectilePayload::Homing {
            strength: homing_strength(level),
            range: homing_range(level),
        };
        launch(self, origin, heading, payload, level, now_ms);
    }

    fn create_chain_lightning(&mut self, origin: Position, heading: f64, level: u32, now_ms: f64) {
        let payload = ProjectilePayload::ChainLightning {
            max_hops: chain_max_hops(level),
            hop_range: chain_hop_range(level),
        };
        launch(self, origin, heading, payload, level, now_ms);
    }
}

fn launch<H: ProjectileHost + ?Sized>(
    host: &mut H,
    origin: Position,
    heading: f64,
    payload: ProjectilePayload,
    level: u32,
    now_ms: f64,
) {
    let mut projectile = Projectile {
        payload,
        damage: 0.0,
        level,
        owner_is_player: true,
        fired_at_ms: now_ms,
        lifetime_ms: 0.0,
        hit_set: Vec::new(),
    };
    // Basic bullet stats do not scale with the ricochet level.
    let stats_level = if projectile.kind() == ProjectileKind::Basic { 0 } else { level };
    let stats = launch_stats(projectile.kind(), stats_level);
    projectile.damage = stats.damage;
    projectile.lifetime_ms = stats.lifetime_ms;
    host.spawn_projectile(origin, Velocity::from_angle(heading, stats.speed), projectile);
}

/// Spawns projectiles as ECS entities and reports them as events.
pub struct WorldHost<'a> {
    pub world: &'a mut World,
    pub events: &'a mut Vec<GameEvent>,
}

impl ProjectileHost for WorldHost<'_> {
    fn spawn_projectile(&mut self, position: Position, velocity: Velocity, projectile: Projectile) {
        self.events.push(GameEvent::ProjectileFired {
            kind: projectile.kind(),
            position,
            heading: velocity.heading(),
        });
        self.world.spawn((position, velocity, projectile));
    }
}

/// Last fire time per weapon. Every weapon starts ready.
#[derive(Debug, Clone, Default)]
pub struct WeaponTimers {
    basic: Option<f64>,
    piercing: Option<f64>,
    explosive: Option<f64>,
    homing: Option<f64>,
    chain: Option<f64>,
}

impl WeaponTimers {
    fn slot(&mut self, kind: ProjectileKind) -> &mut Option<f64> {
        match kind {
            ProjectileKind::Basic => &mut self.basic,
            ProjectileKind::Piercing => &mut self.piercing,
            ProjectileKind::Explosive => &mut self.explosive,
            ProjectileKind::Homing => &mut self.homing,
            ProjectileKind::ChainLightning => &mut self.chain,
        }
    }

    /// Claim the weapon if its cooldown has elapsed.
    pub fn try_fire(&mut self, kind: ProjectileKind, cooldown_ms: f64, now_ms: f64) -> bool {
        let last = self.slot(kind);
        match *last {
            Some(t) if now_ms - t < cooldown_ms => false,
            _ => {
                *last = Some(now_ms);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Fire every weapon whose cooldown is up at `target`. Returns projectiles fired.
pub fn fire_weapons(
    host: &mut impl ProjectileHost,
    timers: &mut WeaponTimers,
    player: &PlayerState,
    target: &Position,
    now_ms: f64,
) -> u32 {
    let origin = player.position;
    let heading = origin.angle_to(target);
    let mut fired = 0;

    if timers.try_fire(ProjectileKind::Basic, player.attack_interval_ms(), now_ms) {
        let ricochet = player.upgrade_level(UpgradeId::Ricochet);
        for h in storm_headings(heading, player.upgrade_level(UpgradeId::BulletStorm)) {
            host.create_basic_bullet(origin, h, ricochet, now_ms);
            fired += 1;
        }
    }

    let specials = [
        (ProjectileKind::Piercing, UpgradeId::PiercingArrows),
        (ProjectileKind::Explosive, UpgradeId::ExplosiveRounds),
        (ProjectileKind::Homing, UpgradeId::HomingMissiles),
        (ProjectileKind::ChainLightning, UpgradeId::ChainLightning),
    ];
    for (kind, upgrade) in specials {
        let level = player.upgrade_level(upgrade);
        let Some(cooldown) = special_cooldown_ms(kind) else {
            continue;
        };
        if level == 0 || !timers.try_fire(kind, cooldown, now_ms) {
            continue;
        }
        match kind {
            ProjectileKind::Piercing => host.create_piercing_arrow(origin, heading, level, now_ms),
            ProjectileKind::Explosive => host.create_explosive_round(origin, heading, level, now_ms),
            ProjectileKind::Homing => {
                for h in homing_headings(heading, level) {
                    host.create_homing_missile(origin, h, level, now_ms);
                    fired += 1;
                }
                continue;
            }
            ProjectileKind::ChainLightning => host.create_chain_lightning(origin, heading, level, now_ms),
            ProjectileKind::Basic => continue,
        }
        fired += 1;
    }
    fired
}

// --- Hit resolution ---

/// A live enemy as seen by hit resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub enemy_id: u32,
    pub position: Position,
}

/// Damage to apply to one enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageApplication {
    pub enemy_id: u32,
    pub amount: f64,
    pub source: DamageSource,
}

/// What a hit did.
#[derive(Debug, Clone, Default)]
pub struct HitOutcome {
    pub damage: Vec<DamageApplication>,
    pub despawn: bool,
    /// New velocity for a bullet that ricocheted.
    pub redirect: Option<Velocity>,
    pub events: Vec<GameEvent>,
}

fn nearest_unhit<'a>(
    targets: &'a [TargetInfo],
    from: &Position,
    range: f64,
    hit_set: &[u32],
) -> Option<&'a TargetInfo> {
    targets
        .iter()
        .filter(|t| !hit_set.contains(&t.enemy_id))
        .map(|t| (t, t.position.distance_to(from)))
        .filter(|(_, d)| *d <= range)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(t, _)| t)
}

/// Area damage around `center` to every target within `radius`.
pub fn explode(center: &Position, damage: f64, radius: f64, targets: &[TargetInfo]) -> Vec<DamageApplication> {
    let amount = explosion_damage(damage, radius);
    targets
        .iter()
        .filter(|t| t.position.distance_to(center) <= radius)
        .map(|t| DamageApplication {
            enemy_id: t.enemy_id,
            amount,
            source: DamageSource::Explosion,
        })
        .collect()
}

/// Resolve `projectile` striking enemy `struck` at `impact`.
///
/// A projectile never damages the same enemy twice; a repeat contact is a
/// no-op. `speed` is kept for a ricochet redirect.
pub fn resolve_hit(
    projectile: &mut Projectile,
    speed: f64,
    struck: &TargetInfo,
    targets: &[TargetInfo],
) -> HitOutcome {
    let mut outcome = HitOutcome::default();
    if projectile.has_hit(struck.enemy_id) {
        return outcome;
    }
    projectile.hit_set.push(struck.enemy_id);

    let direct = DamageApplication {
        enemy_id: struck.enemy_id,
        amount: projectile.damage,
        source: DamageSource::Projectile(projectile.kind()),
    };
    let damage = projectile.damage;

    match &mut projectile.payload {
        ProjectilePayload::Basic { ricochet } => {
            outcome.damage.push(direct);
            outcome.despawn = true;
            if let Some(r) = ricochet {
                if r.bounces < r.max_bounces {
                    if let Some(next) =
                        nearest_unhit(targets, &struck.position, RICOCHET_RANGE, &projectile.hit_set)
                    {
                        r.bounces += 1;
                        outcome.despawn = false;
                        outcome.redirect = Some(Velocity::from_angle(
                            struck.position.angle_to(&next.position),
                            speed,
                        ));
                        outcome.events.push(GameEvent::Ricochet {
                            from_enemy: struck.enemy_id,
                            to_enemy: next.enemy_id,
                        });
                    }
                }
            }
        }
        ProjectilePayload::Piercing { hits, max_hits } => {
            outcome.damage.push(direct);
            *hits += 1;
            outcome.despawn = *hits >= *max_hits;
        }
        ProjectilePayload::Explosive { radius } => {
            let radius = *radius;
            // The struck enemy takes the shell itself, then the blast.
            outcome.damage.push(direct);
            outcome
                .damage
                .extend(explode(&struck.position, damage, radius, targets));
            outcome.events.push(GameEvent::Explosion {
                position: struck.position,
                radius,
            });
            outcome.despawn = true;
        }
        ProjectilePayload::Homing { .. } => {
            outcome.damage.push(direct);
            outcome.despawn = true;
        }
        ProjectilePayload::ChainLightning { max_hops, hop_range } => {
            let (max_hops, hop_range) = (*max_hops, *hop_range);
            outcome.damage.push(direct);
            let mut from = struck.position;
            for hop in 0..max_hops {
                let Some(next) = nearest_unhit(targets, &from, hop_range, &projectile.hit_set).copied()
                else {
                    break;
                };
                projectile.hit_set.push(next.enemy_id);
                outcome.damage.push(DamageApplication {
                    enemy_id: next.enemy_id,
                    amount: chain_hop_damage(damage, hop),
                    source: DamageSource::ChainArc,
                });
                outcome.events.push(GameEvent::ChainArc {
                    from,
                    to: next.position,
                    hop,
                });
                from = next.position;
            }
            outcome.despawn = true;
        }
    }
    outcome
}
