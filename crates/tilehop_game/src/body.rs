//! Arcade-style dynamic body for the player.
//!
//! Integration per step: acceleration (plus gravity) feeds velocity, linear
//! drag slows the x axis only while there is no x acceleration, velocity is
//! clamped, and the displacement is resolved against the tile grid and the
//! world bounds. `blocked` is recomputed from scratch every step, so
//! `blocked.down` means "resting on ground this frame".

use glam::Vec2;

use crate::collision::{Aabb, CollisionGrid};
use crate::config::WorldConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blocked {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub drag: Vec2,
    pub size: Vec2,
    pub max_velocity: f32,
    pub blocked: Blocked,
}

impl PhysicsBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            drag: Vec2::ZERO,
            size,
            max_velocity: 10_000.0,
            blocked: Blocked::default(),
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    pub fn is_grounded(&self) -> bool {
        self.blocked.down
    }

    pub fn step(&mut self, dt: f32, world: &WorldConfig, grid: &CollisionGrid) {
        self.velocity.x += self.acceleration.x * dt;
        if self.acceleration.x == 0.0 && self.drag.x > 0.0 {
            self.velocity.x = move_towards(self.velocity.x, 0.0, self.drag.x * dt);
        }
        self.velocity.y += (world.gravity + self.acceleration.y) * dt;
        self.velocity = self
            .velocity
            .clamp(Vec2::splat(-self.max_velocity), Vec2::splat(self.max_velocity));

        let mut blocked = Blocked::default();
        let mut aabb = self.aabb();

        // Sub-step so no single move skips over a whole tile.
        let delta = self.velocity * dt;
        let max_stride = grid.cell_size * 0.5;
        let substeps = (delta.abs().max_element() / max_stride).ceil().max(1.0) as u32;
        let stride = delta / substeps as f32;
        for _ in 0..substeps {
            let result = grid.move_and_collide(aabb, stride);
            aabb = result.aabb;
            blocked.left |= result.blocked_left;
            blocked.right |= result.blocked_right;
            blocked.up |= result.blocked_up;
            blocked.down |= result.blocked_down;
        }

        self.position = aabb.center;
        self.collide_world_bounds(grid, &mut blocked);

        if (blocked.left && self.velocity.x < 0.0) || (blocked.right && self.velocity.x > 0.0) {
            self.velocity.x = 0.0;
        }
        if (blocked.up && self.velocity.y < 0.0) || (blocked.down && self.velocity.y > 0.0) {
            self.velocity.y = 0.0;
        }
        self.blocked = blocked;
    }

    fn collide_world_bounds(&mut self, grid: &CollisionGrid, blocked: &mut Blocked) {
        let half = self.size / 2.0;
        let max = Vec2::new(grid.width_px(), grid.height_px()) - half;

        if self.position.x <= half.x {
            self.position.x = half.x;
            blocked.left |= self.velocity.x < 0.0;
        } else if self.position.x >= max.x {
            self.position.x = max.x;
            blocked.right |= self.velocity.x > 0.0;
        }
        if self.position.y <= half.y {
            self.position.y = half.y;
            blocked.up |= self.velocity.y < 0.0;
        } else if self.position.y >= max.y {
            self.position.y = max.y;
            blocked.down |= self.velocity.y >= 0.0;
        }
    }
}

fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else if target > current {
        current + max_delta
    } else {
        current - max_delta
    }
}
