//! Key state tracking with both edge-triggered and level-triggered queries.
//!
//! - **Level-triggered (held):** `is_held(key)` is true every frame the key is
//!   down. Movement reads this.
//!
//! - **Edge-triggered (just_pressed / just_released):** true from the
//!   transition until `end_frame()`. The runner calls it after every fixed
//!   step, so each edge reaches exactly one step: a frame with two steps does
//!   not restart twice, and a frame with zero steps keeps its edges for the
//!   next frame's first step.

use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Left,
    Right,
    Up,
    /// Restart the level.
    R,
    /// Toggle physics debug drawing.
    D,
}

impl Key {
    pub const ALL: &'static [Key] = &[Key::Left, Key::Right, Key::Up, Key::R, Key::D];
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        // OS key repeat sends key_down again while held; only the first counts.
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
        }
    }

    /// Bring the held set in line with `keys`, generating the key_down /
    /// key_up transitions a real device would have produced.
    pub fn set_held(&mut self, keys: &[Key]) {
        for &key in Key::ALL {
            if keys.contains(&key) {
                self.key_down(key);
            } else {
                self.key_up(key);
            }
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}
