//! Animation registry for the player and coin clips.
//!
//! Holds clips from `tilehop_core::animation`, keyed by source (`player`,
//! `coin`) and clip name. The built-in set matches the level's sprite sheet;
//! an animation file with the same `source` replaces that source wholesale.

use std::collections::HashMap;
use std::path::Path;

use tilehop_core::animation::{load_animation_set, AnimationClip};

pub const PLAYER_SOURCE: &str = "player";
pub const COIN_SOURCE: &str = "coin";
pub const COIN_FLIP: &str = "coinFlip";

/// source id -> clip name -> clip
pub struct AnimationRegistry {
    clips: HashMap<String, HashMap<String, AnimationClip>>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self {
            clips: HashMap::new(),
        }
    }

    /// Player walk/idle/jump and the coin flip.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        let mut player = HashMap::new();
        player.insert(
            "walk".to_string(),
            AnimationClip::looping(&["tile_0000.png", "tile_0001.png"], 15),
        );
        player.insert(
            "idle".to_string(),
            AnimationClip::looping(&["tile_0000.png"], 1),
        );
        player.insert(
            "jump".to_string(),
            AnimationClip::once(&["tile_0001.png"], 1),
        );
        registry.clips.insert(PLAYER_SOURCE.to_string(), player);

        let mut coin = HashMap::new();
        coin.insert(
            COIN_FLIP.to_string(),
            AnimationClip::looping(&["151", "152"], 6),
        );
        registry.clips.insert(COIN_SOURCE.to_string(), coin);

        registry
    }

    /// Load an animation file and register its clips under its `source`.
    pub fn load_file(&mut self, path: &Path) -> Result<(), String> {
        let set = load_animation_set(path)?;
        if self.clips.contains_key(&set.source) {
            log::info!(
                "Animation source '{}' replaced from {}",
                set.source,
                path.display()
            );
        }
        self.clips.insert(set.source, set.clips);
        Ok(())
    }

    pub fn resolve_clip(&self, source: &str, name: &str) -> Option<&AnimationClip> {
        self.clips.get(source).and_then(|clips| clips.get(name))
    }

    /// Check that every clip the level plays exists.
    pub fn validate_required(&self) -> Result<(), String> {
        let required = [
            (PLAYER_SOURCE, "walk"),
            (PLAYER_SOURCE, "idle"),
            (PLAYER_SOURCE, "jump"),
            (COIN_SOURCE, COIN_FLIP),
        ];
        for (source, name) in required {
            if self.resolve_clip(source, name).is_none() {
                return Err(format!(
                    "Animation registry is missing clip '{}' for source '{}'",
                    name, source
                ));
            }
        }
        Ok(())
    }
}

impl Default for AnimationRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
