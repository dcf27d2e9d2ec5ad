//! tilehop -- headless level runner.
//!
//! Loads a level, tuning config and animation clips, then drives a `Session`
//! from a replay file through the fixed-timestep clock:
//!
//!   1. `set_held()` -- apply the replay frame as key transitions
//!   2. `Session::advance_frame()` -- feed the frame delta, then run one
//!      `Session::update` per fixed slice, clearing key edges after each
//!
//! Drawing is someone else's job: the runner logs what a renderer would be
//! told (score text, animation frames, camera scroll, trail state).
//!
//! Usage: `tilehop_game [level.json] [replay.json] [config.json]`

mod animation;
mod body;
mod camera;
mod collectibles;
mod collision;
mod config;
mod controller;
mod events;
mod level;
mod particles;
mod powerup;
mod replay;
mod score;
mod session;

use std::path::{Path, PathBuf};

use animation::AnimationRegistry;
use collectibles::CollectibleKind;
use config::{load_config_from_path, GameConfig};
use level::load_level_from_path;
use replay::load_replay_from_path;
use session::Session;
use tilehop_core::input::InputState;
use tilehop_core::time::TimeState;

const LEVEL_PATH: &str = "assets/levels/platformer-level-1.json";
const REPLAY_PATH: &str = "assets/replays/demo_run.json";
const CONFIG_PATH: &str = "assets/config/tuning.json";
const ANIMATION_PATHS: &[&str] = &["assets/animations/player.json"];

fn load_config(path: &Path) -> GameConfig {
    if !path.exists() {
        log::warn!(
            "Config '{}' not found, using built-in tuning.",
            path.display()
        );
        return GameConfig::default();
    }
    load_config_from_path(path)
        .unwrap_or_else(|err| panic!("Failed to load config '{}': {}", path.display(), err))
}

fn load_animations() -> AnimationRegistry {
    let mut registry = AnimationRegistry::with_defaults();
    for anim_path_str in ANIMATION_PATHS {
        let anim_path = Path::new(anim_path_str);
        if !anim_path.exists() {
            log::warn!(
                "Animation file '{}' not found, keeping built-in clips.",
                anim_path.display()
            );
            continue;
        }
        if let Err(err) = registry.load_file(anim_path) {
            log::error!(
                "Failed to load animation file '{}': {}",
                anim_path.display(),
                err
            );
        }
    }
    if let Err(err) = registry.validate_required() {
        panic!("Animation clips incomplete: {}", err);
    }
    registry
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("tilehop starting...");

    let mut args = std::env::args().skip(1);
    let level_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(LEVEL_PATH));
    let replay_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(REPLAY_PATH));
    let config_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_PATH));

    let config = load_config(&config_path);
    let level = load_level_from_path(&level_path).unwrap_or_else(|err| {
        panic!("Failed to load level '{}': {}", level_path.display(), err);
    });
    let replay = load_replay_from_path(&replay_path).unwrap_or_else(|err| {
        panic!("Failed to load replay '{}': {}", replay_path.display(), err);
    });
    let animations = load_animations();

    let mut session = Session::new(config, level, animations)
        .unwrap_or_else(|err| panic!("Failed to start level: {}", err));
    let mut time = TimeState::with_fixed_dt_us(replay.frame_us);
    let mut input = InputState::new();
    log::info!(
        "Replaying {} frames from '{}' at {}us per step",
        replay.frame_count(),
        replay_path.display(),
        time.fixed_dt_us
    );

    let mut jumps = 0u32;
    for held in replay.frames() {
        input.set_held(held);

        for report in session.advance_frame(&mut time, &mut input, replay.frame_us) {
            if report.effects.jumped {
                jumps += 1;
                log::debug!("Jump at step {}", time.fixed_step_count);
            }
            if report.coins_collected > 0 || report.power_ups_collected > 0 {
                log::debug!(
                    "Picked up {} coins and {} power-ups (power-up deadline {:?})",
                    report.coins_collected,
                    report.power_ups_collected,
                    session.run().player.powerup.expires_at_us()
                );
            }
            if report.effects.powerup_expired {
                log::debug!("Jump velocity back to {}", session.run().player.jump_velocity);
            }
            if report.score_changed.is_some() {
                log::info!("{}", session.score_text());
            }
            if report.restarted {
                jumps = 0;
            }
        }

        let run = session.run();
        log::trace!(
            "step {} ({}us): frame '{}', coin '{}', camera scroll {:?}, trail particles {}",
            time.fixed_step_count,
            run.now_us,
            run.player_frame,
            run.coin_frame,
            run.camera.scroll(),
            run.trail.particles().len()
        );
        if let Some(newest) = run.trail.particles().last() {
            log::trace!(
                "  newest dust '{}' at ({:.1}, {:.1}) scale {:.3} alpha {:.2}",
                run.trail.frame_name(newest),
                newest.position.x,
                newest.position.y,
                run.trail.scale(newest),
                run.trail.alpha(newest)
            );
        }
    }

    let run = session.run();
    log::info!(
        "Run of '{}' finished after {} steps: {}, {} jumps, {} coins and {} power-ups left, {} restarts",
        session.level().level_id,
        time.fixed_step_count,
        session.score_text(),
        jumps,
        run.collectibles.live_count(CollectibleKind::Coin),
        run.collectibles.live_count(CollectibleKind::PowerUp),
        session.restarts()
    );
    log::info!(
        "Player at ({:.1}, {:.1}), power-up {}, camera centre {:?} scroll {:?} at zoom {}, debug draw {}",
        session.player_position().x,
        session.player_position().y,
        if run.player.powerup.is_active() {
            "active"
        } else {
            "inactive"
        },
        run.camera.center(),
        run.camera.scroll(),
        run.camera.zoom(),
        session.debug_draw()
    );
}
