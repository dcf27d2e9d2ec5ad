//! Player controller: turns one frame of input into body commands, power-up
//! bookkeeping and effect requests for the presentation layer.
//!
//! The controller never draws and never fails. It writes acceleration, drag
//! and jump velocity into the body, and reports which animation to play and
//! what the dust trail should do in the returned [`FrameEffects`].

use glam::Vec2;
use tilehop_core::input::{InputState, Key};

use crate::body::PhysicsBody;
use crate::config::{GameConfig, MotionConfig, TrailConfig};
use crate::powerup::{PowerUpManager, PowerUpState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// Unflipped sprite.
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub facing: Facing,
    /// Jump velocity currently in effect; the power-up value iff it is active.
    pub jump_velocity: f32,
    pub powerup: PowerUpState,
}

impl PlayerState {
    pub fn new(motion: &MotionConfig) -> Self {
        Self {
            facing: Facing::default(),
            jump_velocity: motion.base_jump_velocity,
            powerup: PowerUpState::Inactive,
        }
    }
}

/// Input sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub up_just_pressed: bool,
    pub restart_just_pressed: bool,
    pub debug_just_pressed: bool,
}

impl PlayerInput {
    pub fn from_state(input: &InputState) -> Self {
        Self {
            left: input.is_held(Key::Left),
            right: input.is_held(Key::Right),
            up: input.is_held(Key::Up),
            up_just_pressed: input.is_just_pressed(Key::Up),
            restart_just_pressed: input.is_just_pressed(Key::R),
            debug_just_pressed: input.is_just_pressed(Key::D),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationRequest {
    #[default]
    Idle,
    Walk,
    Jump,
}

impl AnimationRequest {
    pub fn clip_name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Jump => "jump",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrailCommand {
    /// Keep the emitter anchored to the player at `offset`. Emission starts
    /// only when `emit` is set; otherwise the emitter keeps its current state.
    Follow { offset: Vec2, speed: Vec2, emit: bool },
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameEffects {
    pub animation: AnimationRequest,
    pub trail: TrailCommand,
    pub jumped: bool,
    pub powerup_expired: bool,
    pub restart_requested: bool,
    pub debug_toggle_requested: bool,
}

#[derive(Debug, Clone)]
pub struct PlayerController {
    motion: MotionConfig,
    trail: TrailConfig,
    player_size: Vec2,
    powerups: PowerUpManager,
}

impl PlayerController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            motion: config.motion,
            trail: config.trail.clone(),
            player_size: config.world.player_size(),
            powerups: PowerUpManager::new(&config.motion),
        }
    }

    pub fn powerups(&self) -> &PowerUpManager {
        &self.powerups
    }

    pub fn advance(
        &self,
        state: &mut PlayerState,
        body: &mut PhysicsBody,
        input: &PlayerInput,
        now_us: u64,
    ) -> FrameEffects {
        // Expire first so a jump on the deadline frame already uses the base velocity.
        let powerup_expired = self.powerups.update(state, now_us);
        let grounded = body.is_grounded();

        let (mut animation, trail) = if input.left {
            body.acceleration.x = -self.motion.acceleration;
            state.facing = Facing::Left;
            (AnimationRequest::Walk, self.follow(Facing::Left, grounded))
        } else if input.right {
            body.acceleration.x = self.motion.acceleration;
            state.facing = Facing::Right;
            (AnimationRequest::Walk, self.follow(Facing::Right, grounded))
        } else {
            body.acceleration.x = 0.0;
            body.drag.x = self.motion.drag;
            (AnimationRequest::Idle, TrailCommand::Stop)
        };

        if !grounded {
            animation = AnimationRequest::Jump;
        }

        let jumped = grounded && input.up_just_pressed;
        if jumped {
            body.velocity.y = state.jump_velocity;
        }

        FrameEffects {
            animation,
            trail,
            jumped,
            powerup_expired,
            restart_requested: input.restart_just_pressed,
            debug_toggle_requested: input.debug_just_pressed,
        }
    }

    fn follow(&self, facing: Facing, grounded: bool) -> TrailCommand {
        TrailCommand::Follow {
            offset: self.trail.offset(facing, self.player_size),
            speed: self.trail.speed(),
            emit: grounded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Blocked;

    fn setup() -> (PlayerController, PlayerState, PhysicsBody) {
        let config = GameConfig::default();
        let controller = PlayerController::new(&config);
        let state = PlayerState::new(&config.motion);
        let mut body = PhysicsBody::new(Vec2::new(100.0, 100.0), Vec2::new(24.0, 24.0));
        body.blocked = Blocked {
            down: true,
            ..Blocked::default()
        };
        (controller, state, body)
    }

    fn held(left: bool, right: bool) -> PlayerInput {
        PlayerInput {
            left,
            right,
            ..PlayerInput::default()
        }
    }

    #[test]
    fn left_accelerates_left_and_faces_left() {
        let (controller, mut state, mut body) = setup();
        state.facing = Facing::Right;
        let effects = controller.advance(&mut state, &mut body, &held(true, false), 0);

        assert_eq!(body.acceleration.x, -400.0);
        assert_eq!(state.facing, Facing::Left);
        assert_eq!(effects.animation, AnimationRequest::Walk);
        assert_eq!(
            effects.trail,
            TrailCommand::Follow {
                offset: Vec2::new(7.0, 2.0),
                speed: Vec2::new(50.0, 0.0),
                emit: true
            }
        );
    }

    #[test]
    fn right_mirrors_left() {
        let (controller, mut state, mut body) = setup();
        let effects = controller.advance(&mut state, &mut body, &held(false, true), 0);

        assert_eq!(body.acceleration.x, 400.0);
        assert_eq!(state.facing, Facing::Right);
        match effects.trail {
            TrailCommand::Follow { offset, emit, .. } => {
                assert_eq!(offset, Vec2::new(-18.0, 2.0));
                assert!(emit);
            }
            TrailCommand::Stop => panic!("walking should keep the trail following"),
        }
    }

    #[test]
    fn left_wins_when_both_held() {
        let (controller, mut state, mut body) = setup();
        controller.advance(&mut state, &mut body, &held(true, true), 0);
        assert_eq!(body.acceleration.x, -400.0);
        assert_eq!(state.facing, Facing::Left);
    }

    #[test]
    fn no_direction_switches_to_drag() {
        let (controller, mut state, mut body) = setup();
        body.acceleration.x = 400.0;
        let effects = controller.advance(&mut state, &mut body, &PlayerInput::default(), 0);

        assert_eq!(body.acceleration.x, 0.0);
        assert_eq!(body.drag.x, 300.0);
        assert_eq!(effects.animation, AnimationRequest::Idle);
        assert_eq!(effects.trail, TrailCommand::Stop);
    }

    #[test]
    fn airborne_walk_plays_jump_and_does_not_start_trail() {
        let (controller, mut state, mut body) = setup();
        body.blocked.down = false;
        let effects = controller.advance(&mut state, &mut body, &held(false, true), 0);

        assert_eq!(effects.animation, AnimationRequest::Jump);
        match effects.trail {
            TrailCommand::Follow { emit, .. } => assert!(!emit),
            TrailCommand::Stop => panic!("airborne walking keeps following"),
        }
    }

    #[test]
    fn fresh_up_edge_on_ground_jumps() {
        let (controller, mut state, mut body) = setup();
        let input = PlayerInput {
            up: true,
            up_just_pressed: true,
            ..PlayerInput::default()
        };
        let effects = controller.advance(&mut state, &mut body, &input, 0);
        assert!(effects.jumped);
        assert_eq!(body.velocity.y, -600.0);
    }

    #[test]
    fn held_up_does_not_jump_again() {
        let (controller, mut state, mut body) = setup();
        let input = PlayerInput {
            up: true,
            ..PlayerInput::default()
        };
        let effects = controller.advance(&mut state, &mut body, &input, 0);
        assert!(!effects.jumped);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn airborne_up_edge_does_nothing() {
        let (controller, mut state, mut body) = setup();
        body.blocked.down = false;
        body.velocity.y = 123.0;
        let input = PlayerInput {
            up: true,
            up_just_pressed: true,
            ..PlayerInput::default()
        };
        let effects = controller.advance(&mut state, &mut body, &input, 0);
        assert!(!effects.jumped);
        assert_eq!(body.velocity.y, 123.0);
    }

    #[test]
    fn powered_jump_then_expiry_restores_base() {
        let (controller, mut state, mut body) = setup();
        controller.powerups().activate(&mut state, 1_000_000);
        let jump = PlayerInput {
            up: true,
            up_just_pressed: true,
            ..PlayerInput::default()
        };

        controller.advance(&mut state, &mut body, &jump, 2_499_999);
        assert_eq!(body.velocity.y, -900.0);

        body.velocity.y = 0.0;
        let effects = controller.advance(&mut state, &mut body, &jump, 2_500_000);
        assert!(effects.powerup_expired);
        assert!(!state.powerup.is_active());
        assert_eq!(state.jump_velocity, -600.0);
        assert_eq!(body.velocity.y, -600.0);
    }

    #[test]
    fn restart_and_debug_edges_are_reported() {
        let (controller, mut state, mut body) = setup();
        let input = PlayerInput {
            restart_just_pressed: true,
            debug_just_pressed: true,
            ..PlayerInput::default()
        };
        let effects = controller.advance(&mut state, &mut body, &input, 0);
        assert!(effects.restart_requested);
        assert!(effects.debug_toggle_requested);
    }

    #[test]
    fn input_snapshot_reads_held_and_edges() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.key_down(Key::Up);
        let snapshot = PlayerInput::from_state(&input);
        assert!(snapshot.left && snapshot.up && snapshot.up_just_pressed);
        assert!(!snapshot.right && !snapshot.restart_just_pressed);

        input.end_frame();
        let snapshot = PlayerInput::from_state(&input);
        assert!(snapshot.up);
        assert!(!snapshot.up_just_pressed);
    }
}
