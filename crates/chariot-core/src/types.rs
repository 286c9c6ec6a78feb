//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in arena space (pixels).
/// x grows to the east, y grows to the south (screen convention).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in arena space (pixels per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each active tick).
    pub tick: u64,
    /// Elapsed game time in milliseconds. Only advances while play is active.
    pub elapsed_ms: f64,
}

/// Axis-aligned obstacle rectangle in arena space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleBox {
    /// Box number from the arena layout (the entrance is box 3).
    pub id: u8,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    /// Angle from this position toward another, in radians (atan2(dy, dx)).
    pub fn angle_to(&self, other: &Position) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Point at `distance` along `angle` from this position.
    pub fn offset(&self, angle: f64, distance: f64) -> Position {
        Position::from(self.to_vec() + DVec2::from_angle(angle) * distance)
    }

    /// Clamp into the rectangle `[margin, width - margin] x [margin, height - margin]`.
    pub fn clamped(&self, width: f64, height: f64, margin: f64) -> Position {
        Position {
            x: self.x.clamp(margin, width - margin),
            y: self.y.clamp(margin, height - margin),
        }
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Velocity of magnitude `speed` pointing along `angle`.
    pub fn from_angle(angle: f64, speed: f64) -> Self {
        Self::from(DVec2::from_angle(angle) * speed)
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Speed magnitude.
    pub fn speed(&self) -> f64 {
        self.to_vec().length()
    }

    /// Heading in radians (atan2(vy, vx)).
    pub fn heading(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

impl From<DVec2> for Velocity {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl SimTime {
    /// Milliseconds per tick at the default tick rate.
    pub fn dt_ms(&self) -> f64 {
        crate::constants::DT_MS
    }

    /// Advance by one tick of `dt_ms` milliseconds.
    pub fn advance(&mut self, dt_ms: f64) {
        self.tick += 1;
        self.elapsed_ms += dt_ms;
    }

    /// Whole seconds of game time.
    pub fn whole_seconds(&self) -> u64 {
        (self.elapsed_ms / 1000.0).floor() as u64
    }
}

impl ObstacleBox {
    pub const fn new(id: u8, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive point-in-rectangle test.
    pub fn contains(&self, p: &Position) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Inclusive test against the rectangle grown by `padding` on every side.
    pub fn contains_padded(&self, p: &Position, padding: f64) -> bool {
        p.x >= self.x - padding
            && p.x <= self.x + self.width + padding
            && p.y >= self.y - padding
            && p.y <= self.y + self.height + padding
    }

    /// Closest point on (or in) the rectangle to `p`.
    pub fn closest_point(&self, p: &Position) -> Position {
        Position {
            x: p.x.clamp(self.x, self.x + self.width),
            y: p.y.clamp(self.y, self.y + self.height),
        }
    }

    /// Midpoint of the bottom edge.
    pub fn bottom_center(&self) -> Position {
        Position::new(self.x + self.width / 2.0, self.y + self.height)
    }
}
