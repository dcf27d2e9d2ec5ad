//! Engine-agnostic building blocks shared by the level runtime: key input
//! tracking, the fixed-timestep clock and frame-based animation clips.

pub mod animation;
pub mod input;
pub mod time;
