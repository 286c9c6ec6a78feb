//! Static arena map: world bounds, obstacle boxes, the entrance gate and the
//! spike trap layout. Also spawns the trap entities at game start.

use hecs::World;

use chariot_core::components::Trap;
use chariot_core::constants::*;
use chariot_core::types::{ObstacleBox, Position};

/// The arena an engine plays in.
#[derive(Debug, Clone)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
    pub obstacles: Vec<ObstacleBox>,
    /// Where enemies march in. `None` makes the spawner pick random spots.
    pub entrance: Option<Position>,
}

impl Default for Arena {
    fn default() -> Self {
        Self::standard()
    }
}

impl Arena {
    /// The stock arena: walls, gate house and pillars, entrance below box 3.
    pub fn standard() -> Self {
        let obstacles = ARENA_OBSTACLES.to_vec();
        let entrance = obstacles
            .iter()
            .find(|b| b.id == ENTRANCE_BOX_ID)
            .map(ObstacleBox::bottom_center);
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            obstacles,
            entrance,
        }
    }

    /// An empty field with no obstacles and no entrance.
    pub fn open(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            obstacles: Vec::new(),
            entrance: None,
        }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    /// Point lies inside any obstacle box.
    pub fn is_blocked(&self, p: &Position) -> bool {
        self.obstacles.iter().any(|b| b.contains(p))
    }

    /// Point lies inside the world shrunk by `margin` on every side.
    pub fn in_bounds(&self, p: &Position, margin: f64) -> bool {
        p.x >= margin && p.x <= self.width - margin && p.y >= margin && p.y <= self.height - margin
    }

    pub fn clamp(&self, p: &Position, margin: f64) -> Position {
        p.clamped(self.width, self.height, margin)
    }

    /// Move from `from` toward `to`, sliding along obstacles one axis at a time
    /// and staying inside the world.
    pub fn resolve_move(&self, from: &Position, to: &Position) -> Position {
        let target = self.clamp(to, 0.0);
        if !self.is_blocked(&target) {
            return target;
        }
        let slide_x = Position::new(target.x, from.y);
        if !self.is_blocked(&slide_x) {
            return slide_x;
        }
        let slide_y = Position::new(from.x, target.y);
        if !self.is_blocked(&slide_y) {
            return slide_y;
        }
        *from
    }

    /// Spike trap positions: 2x2 clusters around each trap zone, clamped
    /// inside the world, skipping spots too close to an obstacle.
    pub fn trap_positions(&self) -> Vec<Position> {
        let half = TRAP_SPACING / 2.0;
        let offsets = [(-half, -half), (half, -half), (-half, half), (half, half)];

        TRAP_ZONES
            .iter()
            .flat_map(|&(fx, fy)| {
                let centre = Position::new(self.width * fx, self.height * fy);
                offsets
                    .iter()
                    .map(move |&(dx, dy)| Position::new(centre.x + dx, centre.y + dy))
            })
            .map(|p| self.clamp(&p, TRAP_EDGE_MARGIN))
            .filter(|p| {
                !self
                    .obstacles
                    .iter()
                    .any(|b| b.contains_padded(p, TRAP_OBSTACLE_PADDING))
            })
            .collect()
    }

    /// Spawn one trap entity per trap position.
    pub fn spawn_traps(&self, world: &mut World) -> usize {
        let positions = self.trap_positions();
        for position in &positions {
            world.spawn((*position, Trap::default()));
        }
        positions.len()
    }
}
