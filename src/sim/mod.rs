//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clamped, frame-scaled timestep
//! - Seeded RNG only
//! - Stable iteration order (insertion order, by entity ID)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod ending;
pub mod engine;
pub mod events;
pub mod input;
pub mod physics;
pub mod policy;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{aabb_overlap, circle_rect_overlap};
pub use ending::{Ending, EndingReport};
pub use engine::{Engine, RunStateView};
pub use events::{Cue, EventCategory, GameEvent, Notifications, Toast};
pub use input::{Action, InputSnapshot};
pub use policy::RunMetrics;
pub use state::{
    GameState, Hazard, HazardKind, Milestone, Pickup, Player, RunPhase, RunVariant,
};
