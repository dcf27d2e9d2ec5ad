//! Follow camera constrained to the level bounds.
//!
//! The camera keeps its target inside a deadzone around the view centre,
//! closes the remaining distance by `lerp` each step, and never shows space
//! outside the map. The view covers `viewport / zoom` world pixels.

use glam::Vec2;

use crate::config::CameraConfig;

#[derive(Debug, Clone)]
pub struct FollowCamera {
    config: CameraConfig,
    world_size: Vec2,
    center: Vec2,
}

impl FollowCamera {
    pub fn new(config: CameraConfig, world_size: Vec2, target: Vec2) -> Self {
        let mut camera = Self {
            config,
            world_size,
            center: target,
        };
        camera.center = camera.clamp_center(target);
        camera
    }

    pub fn zoom(&self) -> f32 {
        self.config.zoom
    }

    pub fn view_size(&self) -> Vec2 {
        Vec2::new(self.config.viewport_width, self.config.viewport_height) / self.config.zoom
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Top-left corner of the view in world pixels, rounded when
    /// `round_pixels` is set.
    pub fn scroll(&self) -> Vec2 {
        let scroll = self.center - self.view_size() / 2.0;
        if self.config.round_pixels {
            scroll.round()
        } else {
            scroll
        }
    }

    pub fn update(&mut self, target: Vec2) {
        let half_dz = Vec2::new(self.config.deadzone_width, self.config.deadzone_height) / 2.0;
        let desired = Vec2::new(
            deadzone_axis(self.center.x, target.x, half_dz.x),
            deadzone_axis(self.center.y, target.y, half_dz.y),
        );
        let lerp = Vec2::new(self.config.lerp_x, self.config.lerp_y);
        self.center += (desired - self.center) * lerp;
        self.center = self.clamp_center(self.center);
    }

    fn clamp_center(&self, center: Vec2) -> Vec2 {
        let half_view = self.view_size() / 2.0;
        Vec2::new(
            clamp_axis(center.x, half_view.x, self.world_size.x),
            clamp_axis(center.y, half_view.y, self.world_size.y),
        )
    }
}

fn deadzone_axis(center: f32, target: f32, half_dz: f32) -> f32 {
    if target < center - half_dz {
        target + half_dz
    } else if target > center + half_dz {
        target - half_dz
    } else {
        center
    }
}

fn clamp_axis(center: f32, half_view: f32, world: f32) -> f32 {
    if world <= half_view * 2.0 {
        world / 2.0
    } else {
        center.clamp(half_view, world - half_view)
    }
}
