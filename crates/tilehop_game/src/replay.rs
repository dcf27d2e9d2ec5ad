//! Scripted input for headless runs.
//!
//! A replay is a script of held-key sets, each kept for a number of frames.
//! Playing it back calls `InputState::set_held` once per frame, so
//! just-pressed edges come from real key transitions exactly as they would
//! from a keyboard.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tilehop_core::input::Key;
use tilehop_core::time::DEFAULT_FIXED_DT_US;

#[derive(Debug, Deserialize, Clone)]
pub struct Replay {
    /// Real time between frames, in microseconds.
    #[serde(default = "default_frame_us")]
    pub frame_us: u64,
    pub script: Vec<ReplayStep>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayStep {
    #[serde(default)]
    pub held: Vec<Key>,
    #[serde(default = "default_step_frames")]
    pub frames: u32,
}

impl Replay {
    pub fn frame_count(&self) -> usize {
        self.script.iter().map(|step| step.frames as usize).sum()
    }

    /// Held keys for every frame in order.
    pub fn frames(&self) -> impl Iterator<Item = &[Key]> + '_ {
        self.script.iter().flat_map(|step| {
            std::iter::repeat(step.held.as_slice()).take(step.frames as usize)
        })
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<Replay, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: Replay = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &Replay) -> Result<(), String> {
    if replay.frame_us == 0 {
        return Err("Replay validation failed: frame_us must be > 0".to_string());
    }
    if replay.script.is_empty() {
        return Err("Replay validation failed: script is empty".to_string());
    }
    if let Some(i) = replay.script.iter().position(|step| step.frames == 0) {
        return Err(format!(
            "Replay validation failed: script step {} lasts 0 frames",
            i
        ));
    }
    Ok(())
}

const fn default_frame_us() -> u64 {
    DEFAULT_FIXED_DT_US
}

const fn default_step_frames() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationRegistry;
    use crate::config::GameConfig;
    use crate::controller::PlayerInput;
    use crate::level::tests::flat_level;
    use crate::session::Session;
    use std::time::{SystemTime, UNIX_EPOCH};
    use tilehop_core::input::InputState;

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "tilehop_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn play(replay: &Replay) -> Session {
        let mut session = Session::new(
            GameConfig::default(),
            flat_level(),
            AnimationRegistry::with_defaults(),
        )
        .expect("default config is valid");
        let mut input = InputState::new();
        for held in replay.frames() {
            input.set_held(held);
            session.update(&PlayerInput::from_state(&input), replay.frame_us);
            input.end_frame();
        }
        session
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "frame_us": 20000,
              "script": [
                { "held": ["right"], "frames": 3 },
                { "held": ["right", "up"] },
                { "frames": 2 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        assert_eq!(replay.frame_us, 20_000);
        assert_eq!(replay.frame_count(), 6);
        let frames: Vec<&[Key]> = replay.frames().collect();
        assert_eq!(frames.len(), 6);
        assert_eq!(frames[0], &[Key::Right][..]);
        assert_eq!(frames[3], &[Key::Right, Key::Up][..]);
        assert!(frames[5].is_empty());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_empty_script() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "script": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty replay should fail");
        assert!(err.contains("script is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_zero_length_step() {
        let replay: Replay = serde_json::from_str(
            r#"{ "script": [ { "held": ["left"] }, { "held": ["up"], "frames": 0 } ] }"#,
        )
        .expect("inline replay parses");
        assert_eq!(replay.frame_us, DEFAULT_FIXED_DT_US);
        let err = validate_replay(&replay).expect_err("zero-frame step should fail");
        assert!(err.contains("step 1 lasts 0 frames"));
    }

    #[test]
    fn held_up_jumps_once() {
        let replay: Replay = serde_json::from_str(
            r#"{ "script": [ { "frames": 3 }, { "held": ["up"], "frames": 150 } ] }"#,
        )
        .expect("inline replay parses");

        let mut session = Session::new(
            GameConfig::default(),
            flat_level(),
            AnimationRegistry::with_defaults(),
        )
        .expect("default config is valid");
        let mut input = InputState::new();
        let mut jumps = 0;
        for held in replay.frames() {
            input.set_held(held);
            let report = session.update(&PlayerInput::from_state(&input), replay.frame_us);
            if report.effects.jumped {
                jumps += 1;
            }
            input.end_frame();
        }
        assert_eq!(jumps, 1, "holding up after landing must not re-jump");
    }

    #[test]
    fn replay_run_is_deterministic() {
        let replay: Replay = serde_json::from_str(
            r#"{
              "script": [
                { "held": ["right"], "frames": 40 },
                { "held": ["right", "up"] },
                { "held": ["right"], "frames": 60 },
                { "held": ["left"], "frames": 45 },
                { "held": ["up"] },
                { "frames": 30 }
              ]
            }"#,
        )
        .expect("inline replay parses");

        let a = play(&replay);
        let b = play(&replay);
        assert_eq!(a.player_position(), b.player_position());
        assert_eq!(a.run().body.velocity, b.run().body.velocity);
        assert_eq!(a.score(), b.score());
        assert_eq!(a.run().player, b.run().player);
        assert_eq!(a.run().now_us, b.run().now_us);
    }
}
