//! Level tuning: player motion, world physics, dust trail, camera and scoring.
//!
//! Every field has a default matching the shipped level, so a config file only
//! needs the values it overrides. `validate` runs once at startup; anything it
//! rejects is fatal.

use glam::Vec2;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::controller::Facing;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Horizontal acceleration magnitude while a direction is held (px/s²).
    pub acceleration: f32,
    /// Linear drag applied while no direction is held (px/s²).
    pub drag: f32,
    /// Jump velocity without the power-up. Negative is upward.
    pub base_jump_velocity: f32,
    pub powerup_jump_velocity: f32,
    pub powerup_duration_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            acceleration: 400.0,
            drag: 300.0,
            base_jump_velocity: -600.0,
            powerup_jump_velocity: -900.0,
            powerup_duration_ms: 1500,
        }
    }
}

impl MotionConfig {
    pub fn powerup_duration_us(&self) -> u64 {
        self.powerup_duration_ms * 1000
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Downward gravity (px/s²), y grows downward.
    pub gravity: f32,
    pub max_velocity: f32,
    pub player_width: f32,
    pub player_height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: 1500.0,
            max_velocity: 10_000.0,
            player_width: 24.0,
            player_height: 24.0,
        }
    }
}

impl WorldConfig {
    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player_width, self.player_height)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TrailConfig {
    pub particle_speed: f32,
    /// Horizontal inset from the sprite's right edge when facing left.
    pub inset_facing_left: f32,
    /// Horizontal inset from the sprite's right edge when facing right.
    pub inset_facing_right: f32,
    /// Vertical inset from the sprite's bottom edge.
    pub inset_feet: f32,
    pub lifespan_ms: u64,
    pub max_alive: usize,
    pub scale_start: f32,
    pub scale_end: f32,
    pub alpha_start: f32,
    pub alpha_end: f32,
    pub frames: Vec<String>,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            particle_speed: 50.0,
            inset_facing_left: 5.0,
            inset_facing_right: 30.0,
            inset_feet: 10.0,
            lifespan_ms: 400,
            max_alive: 8,
            scale_start: 0.03,
            scale_end: 0.05,
            alpha_start: 1.0,
            alpha_end: 0.1,
            frames: vec!["smoke_03.png".to_string(), "smoke_09.png".to_string()],
        }
    }
}

impl TrailConfig {
    /// Emitter offset from the player's centre. The trail sits behind the
    /// direction of travel, near the feet.
    pub fn offset(&self, facing: Facing, player_size: Vec2) -> Vec2 {
        let inset = match facing {
            Facing::Left => self.inset_facing_left,
            Facing::Right => self.inset_facing_right,
        };
        Vec2::new(
            player_size.x / 2.0 - inset,
            player_size.y / 2.0 - self.inset_feet,
        )
    }

    pub fn speed(&self) -> Vec2 {
        Vec2::new(self.particle_speed, 0.0)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub zoom: f32,
    pub lerp_x: f32,
    pub lerp_y: f32,
    pub deadzone_width: f32,
    pub deadzone_height: f32,
    pub round_pixels: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            zoom: 2.0,
            lerp_x: 0.25,
            lerp_y: 0.25,
            deadzone_width: 50.0,
            deadzone_height: 50.0,
            round_pixels: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub motion: MotionConfig,
    pub world: WorldConfig,
    pub trail: TrailConfig,
    pub camera: CameraConfig,
    pub score: ScoreConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ScoreConfig {
    pub coin_value: u32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self { coin_value: 10 }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), String> {
        let m = &self.motion;
        if m.acceleration <= 0.0 {
            return Err("Config validation failed: motion.acceleration must be > 0".to_string());
        }
        if m.drag <= 0.0 {
            return Err("Config validation failed: motion.drag must be > 0".to_string());
        }
        if m.base_jump_velocity >= 0.0 || m.powerup_jump_velocity >= 0.0 {
            return Err(
                "Config validation failed: jump velocities must be negative (upward)".to_string(),
            );
        }
        if m.powerup_duration_ms == 0 {
            return Err(
                "Config validation failed: motion.powerup_duration_ms must be > 0".to_string(),
            );
        }
        if m.drag >= m.acceleration {
            log::warn!(
                "motion.drag ({}) >= motion.acceleration ({}): the player will stop without sliding",
                m.drag,
                m.acceleration
            );
        }

        let w = &self.world;
        if w.gravity < 0.0 {
            return Err("Config validation failed: world.gravity must be >= 0".to_string());
        }
        if w.max_velocity <= 0.0 {
            return Err("Config validation failed: world.max_velocity must be > 0".to_string());
        }
        if w.player_width <= 0.0 || w.player_height <= 0.0 {
            return Err("Config validation failed: player size must be > 0".to_string());
        }

        let t = &self.trail;
        if t.max_alive == 0 || t.lifespan_ms == 0 {
            return Err(
                "Config validation failed: trail.max_alive and trail.lifespan_ms must be > 0"
                    .to_string(),
            );
        }
        if t.frames.is_empty() {
            return Err("Config validation failed: trail.frames is empty".to_string());
        }

        let c = &self.camera;
        if c.zoom <= 0.0 {
            return Err("Config validation failed: camera.zoom must be > 0".to_string());
        }
        if !(c.lerp_x > 0.0 && c.lerp_x <= 1.0 && c.lerp_y > 0.0 && c.lerp_y <= 1.0) {
            return Err("Config validation failed: camera lerp must be in (0, 1]".to_string());
        }
        if c.viewport_width <= 0.0 || c.viewport_height <= 0.0 {
            return Err("Config validation failed: camera viewport must be > 0".to_string());
        }
        if c.deadzone_width < 0.0 || c.deadzone_height < 0.0 {
            return Err("Config validation failed: camera deadzone must be >= 0".to_string());
        }

        if self.score.coin_value == 0 {
            return Err("Config validation failed: score.coin_value must be > 0".to_string());
        }
        Ok(())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    config.validate()?;
    Ok(config)
}
