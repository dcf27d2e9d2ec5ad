//! Level files: one tile layer, the set of tile indices that collide, and
//! named object markers (`spawn`, `coin`, `powerUp`).
//!
//! Loading is strict. A level without exactly one spawn marker, or with a
//! tile layer that does not cover the map, is rejected before any runtime
//! state is built from it.

use glam::Vec2;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::collision::{CollisionGrid, GridCell};

pub const SPAWN_MARKER: &str = "spawn";
pub const COIN_MARKER: &str = "coin";
pub const POWERUP_MARKER: &str = "powerUp";

#[derive(Debug, Deserialize, Clone)]
pub struct LevelFile {
    pub version: String,
    pub level_id: String,
    pub tile_size: u32,
    pub width: i32,
    pub height: i32,
    pub layer: TileLayer,
    /// Tile indices whose `collides` property is set.
    #[serde(default)]
    pub colliding_tiles: Vec<i32>,
    #[serde(default)]
    pub objects: Vec<ObjectMarker>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TileLayer {
    pub id: String,
    /// Row-major tile indices; `-1` is an empty cell.
    pub data: Vec<i32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObjectMarker {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

/// A validated level, ready to build a session from.
#[derive(Debug, Clone)]
pub struct Level {
    pub level_id: String,
    pub layer_id: String,
    pub grid: CollisionGrid,
    pub spawn: Vec2,
    pub coins: Vec<Vec2>,
    pub power_ups: Vec<Vec2>,
}

impl Level {
    pub fn from_file(file: LevelFile) -> Result<Self, String> {
        validate_level(&file)?;

        let colliding: HashSet<i32> = file.colliding_tiles.iter().copied().collect();
        let mut solids = HashSet::new();
        for (i, tile) in file.layer.data.iter().enumerate() {
            if *tile >= 0 && colliding.contains(tile) {
                let i = i as i32;
                solids.insert(GridCell {
                    x: i % file.width,
                    y: i / file.width,
                });
            }
        }
        if solids.is_empty() {
            log::warn!(
                "Level '{}' has no colliding tiles. The player will fall to the world floor.",
                file.level_id
            );
        }
        let grid = CollisionGrid::new(file.tile_size as f32, file.width, file.height, solids);

        let mut spawn = Vec2::ZERO;
        let mut coins = Vec::new();
        let mut power_ups = Vec::new();
        for marker in &file.objects {
            let pos = Vec2::new(marker.x, marker.y);
            match marker.name.as_str() {
                SPAWN_MARKER => spawn = pos,
                COIN_MARKER => coins.push(pos),
                POWERUP_MARKER => power_ups.push(pos),
                other => log::warn!(
                    "Level '{}': ignoring object marker with unknown name '{}'",
                    file.level_id,
                    other
                ),
            }
        }

        Ok(Self {
            level_id: file.level_id,
            layer_id: file.layer.id,
            grid,
            spawn,
            coins,
            power_ups,
        })
    }

    pub fn size_px(&self) -> Vec2 {
        Vec2::new(self.grid.width_px(), self.grid.height_px())
    }
}

pub fn load_level_from_path(path: &Path) -> Result<Level, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let file: LevelFile = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse level JSON {}: {e}", path.display()))?;
    Level::from_file(file)
}

fn validate_level(file: &LevelFile) -> Result<(), String> {
    if file.version != "0.1" {
        return Err(format!(
            "Level validation failed: unsupported version '{}'",
            file.version
        ));
    }
    if file.tile_size == 0 {
        return Err("Level validation failed: tile_size must be > 0".to_string());
    }
    if file.width <= 0 || file.height <= 0 {
        return Err("Level validation failed: width and height must be > 0".to_string());
    }
    let expected = file
        .width
        .checked_mul(file.height)
        .map(|cells| cells as usize)
        .ok_or_else(|| {
            format!(
                "Level validation failed: {}x{} tiles is too large",
                file.width, file.height
            )
        })?;
    if file.layer.data.len() != expected {
        return Err(format!(
            "Level validation failed: layer '{}' has {} tiles, expected {}",
            file.layer.id,
            file.layer.data.len(),
            expected
        ));
    }

    let width_px = file.width as f32 * file.tile_size as f32;
    let height_px = file.height as f32 * file.tile_size as f32;
    let mut spawn_count = 0;
    for marker in &file.objects {
        if marker.x < 0.0 || marker.x > width_px || marker.y < 0.0 || marker.y > height_px {
            return Err(format!(
                "Level validation failed: object '{}' at ({}, {}) is outside the map",
                marker.name, marker.x, marker.y
            ));
        }
        if marker.name == SPAWN_MARKER {
            spawn_count += 1;
        }
    }
    match spawn_count {
        0 => Err("Level validation failed: no 'spawn' object marker".to_string()),
        1 => Ok(()),
        n => Err(format!(
            "Level validation failed: expected one 'spawn' object marker, found {}",
            n
        )),
    }
}
