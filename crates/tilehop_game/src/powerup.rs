//! Timed jump power-up.
//!
//! Two states: `Inactive` and `Active { expires_at_us }`. Activation stores a
//! single absolute deadline; `update` compares against it once per frame.
//! Nothing is re-armed while active, so the power-up ends on the first step
//! at or past its deadline and ends exactly once.

use crate::config::MotionConfig;
use crate::controller::PlayerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerUpState {
    #[default]
    Inactive,
    Active {
        expires_at_us: u64,
    },
}

impl PowerUpState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    pub fn expires_at_us(&self) -> Option<u64> {
        match self {
            Self::Active { expires_at_us } => Some(*expires_at_us),
            Self::Inactive => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PowerUpManager {
    base_jump_velocity: f32,
    powerup_jump_velocity: f32,
    duration_us: u64,
}

impl PowerUpManager {
    pub fn new(motion: &MotionConfig) -> Self {
        Self {
            base_jump_velocity: motion.base_jump_velocity,
            powerup_jump_velocity: motion.powerup_jump_velocity,
            duration_us: motion.powerup_duration_us(),
        }
    }

    /// Pickup overlap. Collecting again while active restarts the timer.
    pub fn activate(&self, state: &mut PlayerState, now_us: u64) {
        let expires_at_us = now_us + self.duration_us;
        if state.powerup.is_active() {
            log::debug!("Power-up timer restarted, now expires at {}us", expires_at_us);
        } else {
            log::info!("Power-up active until {}us", expires_at_us);
        }
        state.jump_velocity = self.powerup_jump_velocity;
        state.powerup = PowerUpState::Active { expires_at_us };
    }

    /// Returns true on the frame the power-up runs out.
    pub fn update(&self, state: &mut PlayerState, now_us: u64) -> bool {
        match state.powerup {
            PowerUpState::Active { expires_at_us } if now_us >= expires_at_us => {
                state.jump_velocity = self.base_jump_velocity;
                state.powerup = PowerUpState::Inactive;
                log::info!("Power-up expired at {}us", now_us);
                true
            }
            _ => false,
        }
    }
}
