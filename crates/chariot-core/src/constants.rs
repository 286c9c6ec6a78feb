//! Simulation constants and tuning parameters.

use crate::types::ObstacleBox;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Milliseconds per tick.
pub const DT_MS: f64 = 1000.0 / TICK_RATE as f64;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World ---

/// Arena width in pixels.
pub const WORLD_WIDTH: f64 = 2400.0;

/// Arena height in pixels.
pub const WORLD_HEIGHT: f64 = 1800.0;

/// Box number of the gate enemies march in through.
pub const ENTRANCE_BOX_ID: u8 = 3;

/// Static obstacle layout of the arena (walls, gate house, pillars).
pub const ARENA_OBSTACLES: [ObstacleBox; 14] = [
    ObstacleBox::new(1, 0.0, 4.0, 67.0, 1790.0),
    ObstacleBox::new(2, -2.0, 0.0, 994.0, 176.0),
    ObstacleBox::new(3, 990.0, 4.0, 406.0, 268.0),
    ObstacleBox::new(4, 1398.0, 9.0, 1004.0, 169.0),
    ObstacleBox::new(6, 2330.0, 9.0, 70.0, 1784.0),
    ObstacleBox::new(7, 2.0, 1641.0, 2395.0, 160.0),
    ObstacleBox::new(8, 551.0, 1606.0, 97.0, 27.0),
    ObstacleBox::new(9, 1749.0, 1604.0, 91.0, 20.0),
    ObstacleBox::new(10, 2265.0, 1323.0, 60.0, 103.0),
    ObstacleBox::new(11, 2269.0, 453.0, 52.0, 78.0),
    ObstacleBox::new(12, 1846.0, 172.0, 111.0, 23.0),
    ObstacleBox::new(13, 448.0, 168.0, 98.0, 27.0),
    ObstacleBox::new(14, 76.0, 1324.0, 55.0, 103.0),
    ObstacleBox::new(15, 73.0, 452.0, 46.0, 73.0),
];

// --- Player ---

/// Player movement speed (px/s).
pub const PLAYER_SPEED: f64 = 300.0;

/// Player starting and maximum health.
pub const PLAYER_MAX_HEALTH: f64 = 100.0;

/// Base interval between basic attacks (ms).
pub const BASE_ATTACK_INTERVAL_MS: f64 = 500.0;

/// Rapid Fire can never push the basic attack interval below this (ms).
pub const MIN_ATTACK_INTERVAL_MS: f64 = 100.0;

/// Player collision radius used for enemy contact.
pub const PLAYER_HIT_RADIUS: f64 = 40.0;

/// Pickups within this distance of the player are collected.
pub const PICKUP_COLLECT_RADIUS: f64 = 50.0;

// --- Leveling ---

/// XP needed to go from level 1 to level 2.
pub const BASE_XP: f64 = 300.0;

/// Geometric growth of the XP requirement per level.
pub const XP_MULTIPLIER: f64 = 1.6;

/// Levels at which the chariot gains a cosmetic tier.
pub const CHARIOT_TIER_LEVELS: [u32; 3] = [5, 10, 15];

/// Number of upgrade cards offered on level-up.
pub const UPGRADE_OFFER_SIZE: usize = 3;

// --- Rounds ---

/// Enemies required in round 1.
pub const ROUND_BASE_ENEMIES: u32 = 8;

/// Hard cap on enemies per round.
pub const ROUND_MAX_ENEMIES: u32 = 30;

/// Minimum gap between two consecutive spawns (ms).
pub const SPAWN_GAP_MS: f64 = 200.0;

/// Stagger between members of one formation (ms).
pub const FORMATION_MEMBER_STAGGER_MS: f64 = 100.0;

/// Base gap between consecutive formations (ms).
pub const FORMATION_INTERVAL_MS: f64 = 2000.0;

/// Random extra gap between formations, uniform in [0, this) ms.
pub const FORMATION_INTERVAL_JITTER_MS: f64 = 1000.0;

/// Stagger between remainder individuals (ms).
pub const INDIVIDUAL_STAGGER_MS: f64 = 800.0;

/// Rounds at which enemy health gains another +50% tier.
pub const DIFFICULTY_THRESHOLDS: [u32; 8] = [15, 20, 25, 30, 35, 40, 45, 50];

/// Health bonus per difficulty tier.
pub const DIFFICULTY_TIER_BONUS: f64 = 0.5;

/// Positioning deadline base after a round starts (ms).
pub const POSITIONING_FALLBACK_BASE_MS: f64 = 5000.0;

/// Positioning deadline extension per required enemy (ms).
pub const POSITIONING_FALLBACK_PER_ENEMY_MS: f64 = 150.0;

/// Grace period once everything is spawned but not everyone is in place (ms).
pub const POSITIONING_GRACE_MS: f64 = 4000.0;

/// Speed at which enemies travel to their combat slot (px/s).
pub const POSITIONING_SPEED: f64 = 350.0;

/// Minimum duration of the travel to a combat slot (ms).
pub const POSITIONING_MIN_MS: f64 = 1000.0;

// --- Spawner ---

/// Grid spacing inside a spawning formation (px).
pub const FORMATION_SPACING: f64 = 60.0;

/// Spawns closer than this to the player are pushed away.
pub const SPAWN_SAFE_DISTANCE: f64 = 200.0;

/// Distance from the player a pushed spawn is moved to.
pub const SPAWN_PUSH_DISTANCE: f64 = 250.0;

/// Radius of the innermost combat ring; also the minimum stand-off.
pub const COMBAT_RING_BASE_RADIUS: f64 = 450.0;

/// Radius added per outer combat ring.
pub const COMBAT_RING_SPACING: f64 = 120.0;

/// Combat slots per ring.
pub const COMBAT_SLOTS_PER_RING: u32 = 8;

/// Combat slot angle jitter, uniform in [-this, this) rad.
pub const COMBAT_ANGLE_JITTER: f64 = 0.1;

/// Combat slot radius jitter, uniform in [-this, this) px.
pub const COMBAT_RADIUS_JITTER: f64 = 20.0;

/// Combat slots keep this far from the world edge.
pub const COMBAT_EDGE_MARGIN: f64 = 150.0;

/// Angular perturbation attempts when a slot lands in an obstacle.
pub const COMBAT_PERTURB_ATTEMPTS: u32 = 12;

/// Angle step between perturbation attempts (rad).
pub const COMBAT_PERTURB_STEP: f64 = 0.5;

/// Outer (exclusive) radius of the spiral search.
pub const COMBAT_SPIRAL_MAX_RADIUS: f64 = 750.0;

/// Radius step of the spiral search.
pub const COMBAT_SPIRAL_RADIUS_STEP: f64 = 50.0;

/// Angle step of the spiral search (rad).
pub const COMBAT_SPIRAL_ANGLE_STEP: f64 = std::f64::consts::PI / 8.0;

/// Attempts for the random spawn used when no entrance exists.
pub const RANDOM_SPAWN_ATTEMPTS: u32 = 50;

/// Random spawn distance range from the player (px).
pub const RANDOM_SPAWN_MIN_DISTANCE: f64 = 600.0;
pub const RANDOM_SPAWN_MAX_DISTANCE: f64 = 800.0;

/// Random spawns keep this far from the world edge.
pub const RANDOM_SPAWN_MARGIN: f64 = 50.0;

// --- Enemies ---

/// Fraction of an enemy's size used as its collision radius.
pub const ENEMY_HIT_RADIUS_FACTOR: f64 = 0.5;

/// Enemies start avoiding the world edge inside this band (px).
pub const WALL_AVOID_DISTANCE: f64 = 100.0;
pub const WALL_AVOID_STRENGTH: f64 = 0.8;

/// Enemies start avoiding obstacle boxes within this distance (px).
pub const OBSTACLE_AVOID_DISTANCE: f64 = 80.0;
pub const OBSTACLE_AVOID_STRENGTH: f64 = 1.2;

/// Enemies push apart inside this distance (px).
pub const SEPARATION_DISTANCE: f64 = 60.0;
pub const SEPARATION_STRENGTH: f64 = 0.5;

/// Enemy pursuit speed multiplier at level 0 and gain per player level.
pub const ENEMY_SPEED_BASE_FACTOR: f64 = 0.90;
pub const ENEMY_SPEED_PER_LEVEL: f64 = 0.03;

/// Steering output is clamped to this multiple of the adjusted speed.
pub const ENEMY_MAX_SPEED_FACTOR: f64 = 1.5;

/// Below this health fraction enemies get a desperation boost.
pub const DESPERATION_HEALTH_FRACTION: f64 = 0.3;
pub const DESPERATION_SPEED_FACTOR: f64 = 1.5;

// --- Weapons ---

/// Basic bullet speed (px/s).
pub const BULLET_SPEED: f64 = 600.0;

/// Basic bullet damage.
pub const BULLET_DAMAGE: f64 = 25.0;

/// Basic bullet lifetime (ms).
pub const BULLET_LIFETIME_MS: f64 = 3000.0;

/// Projectile collision radius (px).
pub const PROJECTILE_RADIUS: f64 = 8.0;

/// Ricochet bullets jump to enemies within this distance of the struck one.
pub const RICOCHET_RANGE: f64 = 200.0;

/// Special weapon cooldowns (ms).
pub const HOMING_COOLDOWN_MS: f64 = 800.0;
pub const EXPLOSIVE_COOLDOWN_MS: f64 = 1200.0;
pub const CHAIN_COOLDOWN_MS: f64 = 1500.0;
pub const PIERCING_COOLDOWN_MS: f64 = 600.0;

/// Special projectile lifetimes (ms).
pub const PIERCING_LIFETIME_MS: f64 = 4000.0;
pub const EXPLOSIVE_FUSE_MS: f64 = 3000.0;
pub const HOMING_LIFETIME_MS: f64 = 4000.0;
pub const CHAIN_LIFETIME_MS: f64 = 2500.0;

/// Explosion radius at which the explosion multiplier is exactly 1.
pub const EXPLOSION_REFERENCE_RADIUS: f64 = 40.0;

/// Angular spread between homing missiles in one volley (rad).
pub const HOMING_VOLLEY_SPREAD: f64 = 0.4;

/// Fraction of the homing strength applied to the heading error each tick.
pub const HOMING_TURN_GAIN: f64 = 0.2;

/// Angular spread used when bullet storm fires exactly two bullets (rad).
pub const STORM_PAIR_SPREAD: f64 = 0.3;

/// First chain hop damage fraction and its decay per hop.
pub const CHAIN_FIRST_HOP_FACTOR: f64 = 0.8;
pub const CHAIN_HOP_DECAY: f64 = 0.1;

// --- Scythe ---

/// Scythe ellipse centres relative to the player.
pub const SCYTHE_LEFT_OFFSET: (f64, f64) = (-52.4, 48.0);
pub const SCYTHE_RIGHT_OFFSET: (f64, f64) = (50.8, 51.2);

/// Scythe ellipse full width and height (px).
pub const SCYTHE_WIDTH: f64 = 120.0;
pub const SCYTHE_HEIGHT: f64 = 80.0;

/// Extra width/height of the guard ellipses that cancel contact damage.
pub const SCYTHE_GUARD_PADDING: f64 = 30.0;

/// Per-enemy scythe hit cooldown (ms).
pub const SCYTHE_HIT_COOLDOWN_MS: f64 = 150.0;

/// Scythe knockback speed (px/s) and decay time (ms).
pub const SCYTHE_KNOCKBACK_SPEED: f64 = 300.0;
pub const SCYTHE_KNOCKBACK_MS: f64 = 200.0;

/// Knockback angle offset from the player-to-enemy direction (rad).
pub const SCYTHE_KNOCKBACK_ANGLE: f64 = std::f64::consts::FRAC_PI_4;

// --- Upgrades ---

/// Shield regen healing per level (health per second).
pub const SHIELD_REGEN_PER_LEVEL: f64 = 0.10;

/// Rapid Fire interval reduction: `base + per_level * level`.
pub const RAPID_FIRE_BASE_BONUS: f64 = 0.05;
pub const RAPID_FIRE_BONUS_PER_LEVEL: f64 = 0.1;

/// Slow Time enemy speed factor and duration (ms) at levels 1 and 2+.
pub const SLOW_TIME_LEVELS: [(f64, f64); 2] = [(0.3, 2000.0), (0.15, 3000.0)];

/// Player level required before these upgrades can be offered.
pub const RICOCHET_UNLOCK_LEVEL: u32 = 4;
pub const BULLET_STORM_UNLOCK_LEVEL: u32 = 6;
pub const CHAIN_LIGHTNING_UNLOCK_LEVEL: u32 = 8;

// --- Pickups ---

/// Drops are scattered uniformly within this many px of the corpse.
pub const DROP_SCATTER: f64 = 30.0;

/// Chance that a drop is a heart.
pub const HEART_DROP_CHANCE: f64 = 0.10;

/// Fraction of max health restored by a heart.
pub const HEART_HEAL_FRACTION: f64 = 0.25;

// --- Traps ---

/// Trap cluster centres as fractions of the world size.
pub const TRAP_ZONES: [(f64, f64); 4] = [(0.25, 0.35), (0.75, 0.35), (0.75, 0.65), (0.25, 0.65)];

/// Spacing inside a 2x2 trap cluster (px).
pub const TRAP_SPACING: f64 = 40.0;

/// Traps are clamped this far inside the world.
pub const TRAP_EDGE_MARGIN: f64 = 100.0;

/// Traps are not placed within this distance of an obstacle box.
pub const TRAP_OBSTACLE_PADDING: f64 = 50.0;

/// Trap activation and strike radius (px).
pub const TRAP_RADIUS: f64 = 50.0;

/// Trap damage per strike.
pub const TRAP_DAMAGE: f64 = 15.0;

/// Trap cooldown between activations (ms).
pub const TRAP_COOLDOWN_MS: f64 = 1000.0;

/// Delay between activation and the spikes landing (ms).
pub const TRAP_STRIKE_DELAY_MS: f64 = 300.0;

// --- Cleanup ---

/// Projectiles and pickups farther than this from the player are removed.
pub const CLEANUP_DISTANCE: f64 = 1500.0;

/// Maximum number of pickups on the floor.
pub const MAX_PICKUPS: usize = 40;

// --- Scoring ---

pub const SCORE_PER_KILL: u64 = 100;
pub const SCORE_PER_LEVEL: u64 = 500;
pub const SCORE_PER_SECOND: u64 = 10;
