//! Combat steering for enemies pursuing the player.
//!
//! Seek plus wall, obstacle and separation avoidance, clamped to a speed cap,
//! with a desperation boost for badly wounded enemies.

use glam::DVec2;

use chariot_core::constants::*;
use chariot_core::types::{ObstacleBox, Position, Velocity};

/// Input to the steering function for a single enemy.
pub struct SteeringContext<'a> {
    pub position: Position,
    pub player: Position,
    /// Archetype base speed (px/s).
    pub base_speed: f64,
    /// Current health as a fraction of max health.
    pub health_fraction: f64,
    pub player_level: u32,
    /// Slow Time factor, 1.0 when inactive.
    pub slow_factor: f64,
    /// Positions of the other live enemies.
    pub neighbours: &'a [Position],
    pub obstacles: &'a [ObstacleBox],
    pub world_width: f64,
    pub world_height: f64,
}

/// Pursuit speed after player-level scaling and Slow Time.
pub fn adjusted_speed(base_speed: f64, player_level: u32, slow_factor: f64) -> f64 {
    base_speed * (ENEMY_SPEED_BASE_FACTOR + ENEMY_SPEED_PER_LEVEL * player_level as f64) * slow_factor
}

/// Compute the desired velocity for one enemy.
pub fn steer(ctx: &SteeringContext) -> Velocity {
    let pos = ctx.position.to_vec();
    let speed = adjusted_speed(ctx.base_speed, ctx.player_level, ctx.slow_factor);

    let mut v = DVec2::from_angle(ctx.position.angle_to(&ctx.player)) * speed;
    v += wall_avoidance(pos, ctx.world_width, ctx.world_height);
    v += obstacle_avoidance(&ctx.position, ctx.obstacles);
    v += separation(pos, ctx.neighbours);

    let max_speed = speed * ENEMY_MAX_SPEED_FACTOR;
    if v.length() > max_speed {
        v = v.normalize_or_zero() * max_speed;
    }

    if ctx.health_fraction < DESPERATION_HEALTH_FRACTION {
        v *= DESPERATION_SPEED_FACTOR;
    }
    Velocity::from(v)
}

fn wall_avoidance(pos: DVec2, width: f64, height: f64) -> DVec2 {
    let band = WALL_AVOID_DISTANCE;
    let mut push = DVec2::ZERO;
    if pos.x < band {
        push.x += (band - pos.x) * WALL_AVOID_STRENGTH;
    }
    if pos.x > width - band {
        push.x -= (pos.x - (width - band)) * WALL_AVOID_STRENGTH;
    }
    if pos.y < band {
        push.y += (band - pos.y) * WALL_AVOID_STRENGTH;
    }
    if pos.y > height - band {
        push.y -= (pos.y - (height - band)) * WALL_AVOID_STRENGTH;
    }
    push
}

fn obstacle_avoidance(position: &Position, obstacles: &[ObstacleBox]) -> DVec2 {
    let mut push = DVec2::ZERO;
    for obstacle in obstacles {
        let closest = obstacle.closest_point(position);
        let distance = closest.distance_to(position);
        if distance < OBSTACLE_AVOID_DISTANCE {
            // Inside the box the closest point is the position itself; atan2(0, 0)
            // then pushes east, which at least gets the enemy moving.
            let away = closest.angle_to(position);
            push += DVec2::from_angle(away) * (OBSTACLE_AVOID_DISTANCE - distance) * OBSTACLE_AVOID_STRENGTH;
        }
    }
    push
}

fn separation(pos: DVec2, neighbours: &[Position]) -> DVec2 {
    let mut push = DVec2::ZERO;
    for other in neighbours {
        let offset = pos - other.to_vec();
        let distance = offset.length();
        if distance > 0.0 && distance < SEPARATION_DISTANCE {
            push += offset / distance * (SEPARATION_DISTANCE - distance) * SEPARATION_STRENGTH;
        }
    }
    push
}
