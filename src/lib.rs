//! AI2100 Runner - a side-scrolling timeline runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, endings)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio and the HUD live outside this crate. They read a
//! [`sim::RunStateView`] between ticks and drain [`sim::GameEvent`]s.

pub mod sim;
pub mod tuning;

pub use sim::{Engine, InputSnapshot, RunStateView, RunVariant};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Playfield configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 960.0;
    pub const PLAYFIELD_HEIGHT: f32 = 540.0;
    /// Ground line (top edge of the floor strip)
    pub const GROUND_Y: f32 = PLAYFIELD_HEIGHT - 64.0;

    /// Nominal frame length in milliseconds (60 Hz). Per-frame constants are
    /// expressed against this.
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Player defaults
    pub const PLAYER_SPAWN_X: f32 = 120.0;
    pub const PLAYER_WIDTH: f32 = 42.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;

    /// Hazard spawn offsets past the right edge
    pub const HAZARD_SPAWN_OFFSET: f32 = 40.0;
    pub const PICKUP_SPAWN_OFFSET: f32 = 20.0;

    /// Hazard footprints
    pub const DRONE_WIDTH: f32 = 40.0;
    pub const DRONE_HEIGHT: f32 = 24.0;
    pub const SPIKE_WIDTH: f32 = 30.0;
    pub const SPIKE_HEIGHT: f32 = 22.0;
}

/// Closest point to `p` inside the axis-aligned box at `min` with size `size`
#[inline]
pub fn closest_point_in_rect(p: Vec2, min: Vec2, size: Vec2) -> Vec2 {
    p.clamp(min, min + size)
}
