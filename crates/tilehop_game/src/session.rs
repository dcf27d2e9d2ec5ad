//! One playthrough of a level.
//!
//! `Session` owns the immutable inputs (config, level, clips) and a
//! [`LevelRun`] holding everything a restart throws away. Restart replaces the
//! whole `LevelRun` in one assignment, so the player, score, pickups, trail,
//! camera and clock can never be partially reset.
//!
//! Step order inside `update`:
//!   1. controller (input -> body commands, power-up expiry, effect requests)
//!   2. restart, if requested, and stop there
//!   3. physics step against the tile grid
//!   4. pickup overlaps -> event queue
//!   5. drain events (score, power-up)
//!   6. dust trail, animations, camera

use glam::Vec2;
use tilehop_core::animation::AnimationState;
use tilehop_core::input::InputState;
use tilehop_core::time::TimeState;

use crate::animation::{AnimationRegistry, COIN_FLIP, COIN_SOURCE, PLAYER_SOURCE};
use crate::body::PhysicsBody;
use crate::camera::FollowCamera;
use crate::collectibles::Collectibles;
use crate::config::GameConfig;
use crate::controller::{FrameEffects, PlayerController, PlayerInput, PlayerState};
use crate::events::{EventQueue, LevelEvent};
use crate::level::Level;
use crate::particles::TrailEmitter;
use crate::score::ScoreTracker;

/// Per-run state. Built fresh at level start and on every restart.
pub struct LevelRun {
    pub now_us: u64,
    pub player: PlayerState,
    pub body: PhysicsBody,
    pub collectibles: Collectibles,
    pub score: ScoreTracker,
    pub events: EventQueue,
    pub trail: TrailEmitter,
    pub camera: FollowCamera,
    pub player_anim: AnimationState,
    pub coin_anim: AnimationState,
    pub player_frame: String,
    pub coin_frame: String,
}

impl LevelRun {
    fn new(config: &GameConfig, level: &Level) -> Self {
        let mut body = PhysicsBody::new(level.spawn, config.world.player_size());
        body.max_velocity = config.world.max_velocity;
        Self {
            now_us: 0,
            player: PlayerState::new(&config.motion),
            body,
            collectibles: Collectibles::from_level(level),
            score: ScoreTracker::new(config.score.coin_value),
            events: EventQueue::new(),
            trail: TrailEmitter::new(config.trail.clone()),
            camera: FollowCamera::new(config.camera, level.size_px(), level.spawn),
            player_anim: AnimationState::new("idle"),
            coin_anim: AnimationState::new(COIN_FLIP),
            player_frame: String::new(),
            coin_frame: String::new(),
        }
    }
}

/// What happened during one step, for the presentation layer.
#[derive(Debug, Clone, Copy)]
pub struct FrameReport {
    pub effects: FrameEffects,
    pub coins_collected: u32,
    pub power_ups_collected: u32,
    /// New score, present only on steps where it changed.
    pub score_changed: Option<u32>,
    pub restarted: bool,
}

pub struct Session {
    config: GameConfig,
    level: Level,
    controller: PlayerController,
    animations: AnimationRegistry,
    run: LevelRun,
    debug_draw: bool,
    restarts: u32,
}

impl Session {
    /// Fails if `config` does not validate.
    pub fn new(
        config: GameConfig,
        level: Level,
        animations: AnimationRegistry,
    ) -> Result<Self, String> {
        config.validate()?;
        let controller = PlayerController::new(&config);
        let run = LevelRun::new(&config, &level);
        log::info!(
            "Level '{}' ready: layer '{}' with {} solid tiles, spawn ({}, {}), {} coins, {} power-ups",
            level.level_id,
            level.layer_id,
            level.grid.solid_count(),
            level.spawn.x,
            level.spawn.y,
            level.coins.len(),
            level.power_ups.len()
        );
        Ok(Self {
            config,
            level,
            controller,
            animations,
            run,
            debug_draw: false,
            restarts: 0,
        })
    }

    /// Feed one frame of `frame_us` to the clock and run every fixed step it
    /// buys. Key edges are cleared after each step, so a press reaches only
    /// the first step of the frame.
    pub fn advance_frame(
        &mut self,
        time: &mut TimeState,
        input: &mut InputState,
        frame_us: u64,
    ) -> Vec<FrameReport> {
        time.feed(frame_us);
        let mut reports = Vec::new();
        while time.should_step() {
            reports.push(self.update(&PlayerInput::from_state(input), time.fixed_dt_us));
            input.end_frame();
        }
        reports
    }

    pub fn update(&mut self, input: &PlayerInput, dt_us: u64) -> FrameReport {
        let run = &mut self.run;
        run.now_us += dt_us;

        let effects = self
            .controller
            .advance(&mut run.player, &mut run.body, input, run.now_us);

        if effects.debug_toggle_requested {
            self.debug_draw = !self.debug_draw;
            log::info!("Physics debug draw: {}", self.debug_draw);
        }

        if effects.restart_requested {
            let had_score = run.score.value() != 0;
            self.restart();
            return FrameReport {
                effects,
                coins_collected: 0,
                power_ups_collected: 0,
                score_changed: had_score.then_some(0),
                restarted: true,
            };
        }

        let dt = dt_us as f32 / 1_000_000.0;
        run.body.step(dt, &self.config.world, &self.level.grid);
        run.collectibles
            .collect_overlapping(&run.body.aabb(), &mut run.events);

        let mut coins_collected = 0;
        let mut power_ups_collected = 0;
        let mut score_changed = None;
        for event in run.events.drain() {
            match event {
                LevelEvent::CoinCollected(id) => {
                    let score = run.score.collect_coin();
                    log::debug!("Coin {:?} collected, score {}", id, score);
                    coins_collected += 1;
                    score_changed = Some(score);
                }
                LevelEvent::PowerUpCollected(id) => {
                    log::debug!("Power-up {:?} collected", id);
                    self.controller
                        .powerups()
                        .activate(&mut run.player, run.now_us);
                    power_ups_collected += 1;
                }
            }
        }

        run.trail.apply(effects.trail);
        run.trail.update(run.body.position, dt_us);

        run.player_anim.play(effects.animation.clip_name());
        if let Some(clip) = self
            .animations
            .resolve_clip(PLAYER_SOURCE, &run.player_anim.clip_name)
        {
            run.player_frame = run.player_anim.tick(dt_us, clip).to_string();
        }
        if let Some(clip) = self.animations.resolve_clip(COIN_SOURCE, COIN_FLIP) {
            run.coin_frame = run.coin_anim.tick(dt_us, clip).to_string();
        }

        run.camera.update(run.body.position);

        FrameReport {
            effects,
            coins_collected,
            power_ups_collected,
            score_changed,
            restarted: false,
        }
    }

    /// Throw away the current run and start the level from its initial state.
    pub fn restart(&mut self) {
        self.run = LevelRun::new(&self.config, &self.level);
        self.restarts += 1;
        log::info!(
            "Level '{}' restarted ({} restarts)",
            self.level.level_id,
            self.restarts
        );
    }

    pub fn run(&self) -> &LevelRun {
        &self.run
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn player_position(&self) -> Vec2 {
        self.run.body.position
    }

    pub fn score(&self) -> u32 {
        self.run.score.value()
    }

    pub fn score_text(&self) -> String {
        self.run.score.text()
    }

    pub fn debug_draw(&self) -> bool {
        self.debug_draw
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }
}
