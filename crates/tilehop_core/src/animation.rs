//! Sprite animation clips played at a fixed frame rate.
//!
//! A clip is a list of frame names, a frame duration and a repeat count.
//! Playback is a pure function of elapsed microseconds, so two runs fed the
//! same fixed steps always show the same frame.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Forever,
    /// Extra plays after the first one; `Times(0)` plays once.
    Times(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub frames: Vec<String>,
    pub frame_duration_us: u64,
    pub repeat: Repeat,
}

impl AnimationClip {
    pub fn new(frames: &[&str], frame_rate: u32, repeat: Repeat) -> Self {
        Self {
            frames: frames.iter().map(|f| (*f).to_string()).collect(),
            frame_duration_us: 1_000_000 / u64::from(frame_rate.max(1)),
            repeat,
        }
    }

    pub fn looping(frames: &[&str], frame_rate: u32) -> Self {
        Self::new(frames, frame_rate, Repeat::Forever)
    }

    pub fn once(frames: &[&str], frame_rate: u32) -> Self {
        Self::new(frames, frame_rate, Repeat::Times(0))
    }

    pub fn is_looping(&self) -> bool {
        self.repeat == Repeat::Forever
    }

    /// Length of one pass through every frame.
    pub fn cycle_us(&self) -> u64 {
        self.frame_duration_us * self.frames.len() as u64
    }

    /// Frame index shown `elapsed_us` after the clip started, and whether the
    /// clip has run out of repeats.
    pub fn sample(&self, elapsed_us: u64) -> (usize, bool) {
        let len = self.frames.len();
        if len == 0 {
            return (0, true);
        }
        let step = elapsed_us / self.frame_duration_us.max(1);
        match self.repeat {
            Repeat::Forever => ((step % len as u64) as usize, false),
            Repeat::Times(extra) => {
                let total = (u64::from(extra) + 1) * len as u64;
                if step >= total {
                    (len - 1, true)
                } else {
                    ((step % len as u64) as usize, false)
                }
            }
        }
    }
}

/// Playback cursor for one sprite.
#[derive(Debug, Clone)]
pub struct AnimationState {
    pub clip_name: String,
    pub frame_index: usize,
    pub elapsed_us: u64,
    pub finished: bool,
}

impl AnimationState {
    pub fn new(clip_name: &str) -> Self {
        Self {
            clip_name: clip_name.to_string(),
            frame_index: 0,
            elapsed_us: 0,
            finished: false,
        }
    }

    /// Start `clip_name` from its first frame. Asking for the clip already
    /// playing changes nothing. Returns true if playback switched.
    pub fn play(&mut self, clip_name: &str) -> bool {
        if self.clip_name == clip_name {
            return false;
        }
        *self = Self::new(clip_name);
        true
    }

    pub fn tick<'a>(&mut self, dt_us: u64, clip: &'a AnimationClip) -> &'a str {
        if !self.finished {
            self.elapsed_us += dt_us;
            let (index, finished) = clip.sample(self.elapsed_us);
            self.frame_index = index;
            self.finished = finished;
        }
        clip.frames
            .get(self.frame_index)
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Every clip of one animation source (`player`, `coin`, ...).
#[derive(Debug, Clone)]
pub struct AnimationSet {
    pub source: String,
    pub clips: HashMap<String, AnimationClip>,
}

#[derive(Debug, Deserialize)]
struct AnimationSetJson {
    version: String,
    source: String,
    clips: HashMap<String, ClipJson>,
}

#[derive(Debug, Deserialize)]
struct ClipJson {
    frames: Vec<String>,
    frame_rate: u32,
    /// -1 repeats forever.
    #[serde(default)]
    repeat: i32,
}

pub fn load_animation_set(path: &Path) -> Result<AnimationSet, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read animation file {}: {e}", path.display()))?;
    let json: AnimationSetJson = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse animation file {}: {e}", path.display()))?;
    validate_animation_set(&json)?;

    let clips = json
        .clips
        .into_iter()
        .map(|(name, clip)| {
            let repeat = if clip.repeat < 0 {
                Repeat::Forever
            } else {
                Repeat::Times(clip.repeat as u32)
            };
            let frames: Vec<&str> = clip.frames.iter().map(String::as_str).collect();
            (name, AnimationClip::new(&frames, clip.frame_rate, repeat))
        })
        .collect();

    log::debug!("Loaded animation source '{}' from {}", json.source, path.display());
    Ok(AnimationSet {
        source: json.source,
        clips,
    })
}

fn validate_animation_set(json: &AnimationSetJson) -> Result<(), String> {
    if json.version != "0.1" {
        return Err(format!(
            "Animation validation failed: unsupported version '{}'",
            json.version
        ));
    }
    if json.source.is_empty() {
        return Err("Animation validation failed: source is empty".to_string());
    }
    for (name, clip) in &json.clips {
        if clip.frames.is_empty() || clip.frames.iter().any(String::is_empty) {
            return Err(format!(
                "Animation validation failed: clip '{}' needs non-empty frame names",
                name
            ));
        }
        if clip.frame_rate == 0 {
            return Err(format!(
                "Animation validation failed: clip '{}' has frame_rate 0",
                name
            ));
        }
        if clip.repeat < -1 {
            return Err(format!(
                "Animation validation failed: clip '{}' has repeat {} (use -1 for forever)",
                name, clip.repeat
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "tilehop_anim_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn coin_flip_alternates_at_six_fps() {
        let clip = AnimationClip::looping(&["151", "152"], 6);
        assert_eq!(clip.frame_duration_us, 166_666);
        assert_eq!(clip.cycle_us(), 333_332);

        let mut state = AnimationState::new("coinFlip");
        assert_eq!(state.tick(16_667, &clip), "151");
        assert_eq!(state.tick(150_000, &clip), "152");
        assert_eq!(state.tick(166_666, &clip), "151");
        assert!(!state.finished);
    }

    #[test]
    fn play_once_holds_last_frame() {
        let clip = AnimationClip::once(&["a", "b"], 10);
        let mut state = AnimationState::new("jump");

        assert_eq!(state.tick(150_000, &clip), "b");
        assert!(!state.finished);
        assert_eq!(state.tick(100_000, &clip), "b");
        assert!(state.finished);
        assert_eq!(state.tick(1_000_000, &clip), "b");
    }

    #[test]
    fn repeat_count_adds_passes() {
        let clip = AnimationClip::new(&["a", "b"], 10, Repeat::Times(1));
        assert_eq!(clip.sample(250_000), (0, false), "second pass");
        assert_eq!(clip.sample(399_999), (1, false));
        assert_eq!(clip.sample(400_000), (1, true));
    }

    #[test]
    fn replaying_current_clip_keeps_progress() {
        let clip = AnimationClip::looping(&["a", "b"], 10);
        let mut state = AnimationState::new("walk");
        state.tick(150_000, &clip);

        assert!(!state.play("walk"));
        assert_eq!(state.frame_index, 1);

        assert!(state.play("idle"));
        assert_eq!(state.clip_name, "idle");
        assert_eq!(state.frame_index, 0);
        assert_eq!(state.elapsed_us, 0);
    }

    #[test]
    fn empty_clip_shows_nothing() {
        let clip = AnimationClip::looping(&[], 10);
        let mut state = AnimationState::new("none");
        assert_eq!(state.tick(16_667, &clip), "");
        assert!(state.finished);
    }

    #[test]
    fn load_animation_set_parses_clips() {
        let path = temp_file_path("valid");
        fs::write(
            &path,
            r#"{
              "version": "0.1",
              "source": "player",
              "clips": {
                "walk": { "frames": ["tile_0000.png", "tile_0001.png"], "frame_rate": 15, "repeat": -1 },
                "jump": { "frames": ["tile_0001.png"], "frame_rate": 10 }
              }
            }"#,
        )
        .expect("write temp file");

        let set = load_animation_set(&path).expect("should parse");
        assert_eq!(set.source, "player");
        assert_eq!(set.clips.len(), 2);

        let walk = &set.clips["walk"];
        assert!(walk.is_looping());
        assert_eq!(walk.frames[1], "tile_0001.png");
        assert_eq!(walk.frame_duration_us, 66_666);
        assert_eq!(set.clips["jump"].repeat, Repeat::Times(0));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_animation_set_rejects_bad_version() {
        let path = temp_file_path("bad_version");
        fs::write(
            &path,
            r#"{ "version": "9.9", "source": "player", "clips": {} }"#,
        )
        .expect("write temp file");
        let err = load_animation_set(&path).expect_err("bad version should fail");
        assert!(err.contains("unsupported version"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_animation_set_rejects_zero_frame_rate() {
        let path = temp_file_path("zero_rate");
        fs::write(
            &path,
            r#"{
              "version": "0.1",
              "source": "coin",
              "clips": { "coinFlip": { "frames": ["151"], "frame_rate": 0 } }
            }"#,
        )
        .expect("write temp file");
        let err = load_animation_set(&path).expect_err("zero frame rate should fail");
        assert!(err.contains("frame_rate 0"));
        let _ = fs::remove_file(path);
    }
}
