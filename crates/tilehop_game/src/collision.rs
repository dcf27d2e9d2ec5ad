//! Tile collision: the level's colliding tiles as a cell set, separate from
//! how the tiles are drawn.
//!
//! World space is y-down (screen convention): positive y is toward the floor
//! and jump velocities are negative.
//!
//! Movement uses **axis-separable move-and-collide**: resolve X against the
//! grid first, then resolve Y from the corrected X. This prevents diagonal
//! tunneling through corners and lets bodies slide along walls.

use glam::Vec2;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

/// Axis-aligned box stored as centre plus half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size / 2.0,
        }
    }

    /// Strict overlap; boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        d.x < self.half.x + other.half.x && d.y < self.half.y + other.half.y
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CollisionMoveResult {
    pub aabb: Aabb,
    pub blocked_left: bool,
    pub blocked_right: bool,
    pub blocked_up: bool,
    pub blocked_down: bool,
}

#[derive(Debug, Clone)]
pub struct CollisionGrid {
    pub cell_size: f32,
    pub width: i32,
    pub height: i32,
    solids: HashSet<GridCell>,
}

impl CollisionGrid {
    pub fn new(cell_size: f32, width: i32, height: i32, solids: HashSet<GridCell>) -> Self {
        Self {
            cell_size,
            width,
            height,
            solids,
        }
    }

    pub fn width_px(&self) -> f32 {
        self.width as f32 * self.cell_size
    }

    pub fn height_px(&self) -> f32 {
        self.height as f32 * self.cell_size
    }

    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return false;
        }
        self.solids.contains(&GridCell { x, y })
    }

    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    pub fn move_and_collide(&self, aabb: Aabb, delta: Vec2) -> CollisionMoveResult {
        const EPS: f32 = 0.0001;

        let resolved_x = self.resolve_axis_x(aabb, delta.x);
        let collided_x = (resolved_x - (aabb.center.x + delta.x)).abs() > EPS;

        let mut moved = aabb;
        moved.center.x = resolved_x;
        let resolved_y = self.resolve_axis_y(moved, delta.y);
        let collided_y = (resolved_y - (aabb.center.y + delta.y)).abs() > EPS;
        moved.center.y = resolved_y;

        CollisionMoveResult {
            aabb: moved,
            blocked_left: collided_x && delta.x < 0.0,
            blocked_right: collided_x && delta.x > 0.0,
            blocked_up: collided_y && delta.y < 0.0,
            blocked_down: collided_y && delta.y > 0.0,
        }
    }

    fn resolve_axis_x(&self, aabb: Aabb, dx: f32) -> f32 {
        if dx == 0.0 {
            return aabb.center.x;
        }

        const EPS: f32 = 0.001;
        let mut candidate_x = aabb.center.x + dx;
        let y0 = self.world_to_cell(aabb.center.y - aabb.half.y + EPS);
        let y1 = self.world_to_cell(aabb.center.y + aabb.half.y - EPS);

        if dx > 0.0 {
            let x_cell = self.world_to_cell(candidate_x + aabb.half.x - EPS);
            for y in y0..=y1 {
                if self.is_solid(x_cell, y) {
                    candidate_x = candidate_x.min(self.cell_min(x_cell) - aabb.half.x);
                }
            }
            // Never push opposite to the direction of travel.
            candidate_x = candidate_x.max(aabb.center.x);
        } else {
            let x_cell = self.world_to_cell(candidate_x - aabb.half.x + EPS);
            for y in y0..=y1 {
                if self.is_solid(x_cell, y) {
                    candidate_x = candidate_x.max(self.cell_max(x_cell) + aabb.half.x);
                }
            }
            candidate_x = candidate_x.min(aabb.center.x);
        }

        candidate_x
    }

    fn resolve_axis_y(&self, aabb: Aabb, dy: f32) -> f32 {
        if dy == 0.0 {
            return aabb.center.y;
        }

        const EPS: f32 = 0.001;
        let mut candidate_y = aabb.center.y + dy;
        let x0 = self.world_to_cell(aabb.center.x - aabb.half.x + EPS);
        let x1 = self.world_to_cell(aabb.center.x + aabb.half.x - EPS);

        if dy > 0.0 {
            // Falling: land on the top edge of the cell below.
            let y_cell = self.world_to_cell(candidate_y + aabb.half.y - EPS);
            for x in x0..=x1 {
                if self.is_solid(x, y_cell) {
                    candidate_y = candidate_y.min(self.cell_min(y_cell) - aabb.half.y);
                }
            }
            candidate_y = candidate_y.max(aabb.center.y);
        } else {
            let y_cell = self.world_to_cell(candidate_y - aabb.half.y + EPS);
            for x in x0..=x1 {
                if self.is_solid(x, y_cell) {
                    candidate_y = candidate_y.max(self.cell_max(y_cell) + aabb.half.y);
                }
            }
            candidate_y = candidate_y.min(aabb.center.y);
        }

        candidate_y
    }

    fn world_to_cell(&self, world: f32) -> i32 {
        (world / self.cell_size).floor() as i32
    }

    fn cell_min(&self, cell: i32) -> f32 {
        cell as f32 * self.cell_size
    }

    fn cell_max(&self, cell: i32) -> f32 {
        (cell + 1) as f32 * self.cell_size
    }
}
