//! Walking dust trail.
//!
//! One emitter that follows the player at an offset. While emitting it spawns
//! one particle per step until `max_alive` particles are live; each particle
//! drifts at the configured speed, grows from `scale_start` to `scale_end`,
//! fades from `alpha_start` to `alpha_end` and dies after `lifespan_ms`.
//! Stopping the emitter lets live particles finish.

use glam::Vec2;

use crate::config::TrailConfig;
use crate::controller::TrailCommand;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub age_us: u64,
    pub frame_index: usize,
}

#[derive(Debug, Clone)]
pub struct TrailEmitter {
    config: TrailConfig,
    offset: Vec2,
    speed: Vec2,
    emitting: bool,
    particles: Vec<Particle>,
    next_frame: usize,
}

impl TrailEmitter {
    pub fn new(config: TrailConfig) -> Self {
        Self {
            config,
            offset: Vec2::ZERO,
            speed: Vec2::ZERO,
            emitting: false,
            particles: Vec::new(),
            next_frame: 0,
        }
    }

    pub fn apply(&mut self, command: TrailCommand) {
        match command {
            TrailCommand::Follow { offset, speed, emit } => {
                self.offset = offset;
                self.speed = speed;
                if emit {
                    self.emitting = true;
                }
            }
            TrailCommand::Stop => self.emitting = false,
        }
    }

    pub fn update(&mut self, anchor: Vec2, dt_us: u64) {
        let lifespan_us = self.config.lifespan_ms * 1000;
        let dt = dt_us as f32 / 1_000_000.0;

        for particle in &mut self.particles {
            particle.age_us += dt_us;
            particle.position += particle.velocity * dt;
        }
        self.particles.retain(|p| p.age_us < lifespan_us);

        if self.emitting && self.particles.len() < self.config.max_alive {
            self.particles.push(Particle {
                position: anchor + self.offset,
                velocity: self.speed,
                age_us: 0,
                frame_index: self.next_frame,
            });
            self.next_frame = (self.next_frame + 1) % self.config.frames.len().max(1);
        }
    }

    pub fn is_emitting(&self) -> bool {
        self.emitting
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn frame_name(&self, particle: &Particle) -> &str {
        self.config
            .frames
            .get(particle.frame_index)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn scale(&self, particle: &Particle) -> f32 {
        lerp(self.config.scale_start, self.config.scale_end, self.life_fraction(particle))
    }

    pub fn alpha(&self, particle: &Particle) -> f32 {
        lerp(self.config.alpha_start, self.config.alpha_end, self.life_fraction(particle))
    }

    fn life_fraction(&self, particle: &Particle) -> f32 {
        let lifespan_us = (self.config.lifespan_ms * 1000).max(1);
        (particle.age_us as f32 / lifespan_us as f32).min(1.0)
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
