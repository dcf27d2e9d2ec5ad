//! Fixed-timestep clock.
//!
//! Frame deltas feed an accumulator; the simulation
//! consumes it in `fixed_dt_us` slices via `should_step()`. Simulation time is
//! kept in integer microseconds so deadlines such as the power-up expiry are
//! reached on exactly the same step on every run.

pub const DEFAULT_FIXED_DT_US: u64 = 16_667;

pub struct TimeState {
    pub fixed_dt_us: u64,
    pub max_accumulator_us: u64,
    accumulator_us: u64,
    /// Simulation time consumed by fixed steps so far.
    pub now_us: u64,
    pub fixed_step_count: u64,
    pub frame_count: u64,
    pub steps_this_frame: u32,
}

impl TimeState {
    pub fn new() -> Self {
        Self::with_fixed_dt_us(DEFAULT_FIXED_DT_US)
    }

    pub fn with_fixed_dt_us(fixed_dt_us: u64) -> Self {
        Self {
            fixed_dt_us: fixed_dt_us.max(1),
            max_accumulator_us: 250_000,
            accumulator_us: 0,
            now_us: 0,
            fixed_step_count: 0,
            frame_count: 0,
            steps_this_frame: 0,
        }
    }

    /// Start a frame that lasted `real_dt_us`.
    pub fn feed(&mut self, mut real_dt_us: u64) {
        // Spiral-of-death cap
        if real_dt_us > self.max_accumulator_us {
            log::warn!(
                "Frame took {:.1}ms, capping accumulator to {}ms",
                real_dt_us as f64 / 1000.0,
                self.max_accumulator_us / 1000
            );
            real_dt_us = self.max_accumulator_us;
        }

        self.accumulator_us += real_dt_us;
        self.steps_this_frame = 0;
        self.frame_count += 1;
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator_us >= self.fixed_dt_us {
            self.accumulator_us -= self.fixed_dt_us;
            self.now_us += self.fixed_dt_us;
            self.fixed_step_count += 1;
            self.steps_this_frame += 1;
            true
        } else {
            false
        }
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new()
    }
}
