//! Game state and core simulation types
//!
//! Everything a tick mutates lives here. Renderers and the HUD only ever see
//! it through [`super::RunStateView`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ending::EndingReport;
use super::policy::RunMetrics;
use crate::consts::*;
use crate::tuning::Tuning;

/// Which metrics model decides how a run fails or ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunVariant {
    /// Hazards cost a life; the run is over at zero lives
    LethalLives,
    /// Hazards raise risk and erode honor; the run ends with a narrative outcome
    #[default]
    HonorRisk,
}

impl RunVariant {
    /// Notice shown when a run starts
    pub fn intro_notice(self) -> &'static str {
        match self {
            RunVariant::LethalLives => "Collect milestones to progress from 1950 to 2100!",
            RunVariant::HonorRisk => {
                "Play as an AI engineer: collect milestones, manage Honor vs Risk."
            }
        }
    }

    /// Notice shown after a restart
    pub fn restart_notice(self) -> &'static str {
        match self {
            RunVariant::LethalLives => "Restarted from scratch.",
            RunVariant::HonorRisk => "Restarted timeline. Play as an AI engineer.",
        }
    }
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Active gameplay
    Running,
    /// Final milestone reached, ending resolved (honor/risk)
    Ended,
    /// Out of lives (lethal-lives)
    GameOver,
}

impl RunPhase {
    pub fn is_running(self) -> bool {
        self == RunPhase::Running
    }
}

/// A narrative checkpoint on the timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub year: u32,
    pub text: String,
}

impl Milestone {
    pub fn new(year: u32, text: impl Into<String>) -> Self {
        Self {
            year,
            text: text.into(),
        }
    }
}

/// The player avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (negative = up)
    pub vy: f32,
    pub on_ground: bool,
    /// Ticks of dash boost remaining (> 0 blocks a new dash)
    pub dash_ticks: u32,
    /// Ticks of hazard immunity remaining
    pub invuln_ticks: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, GROUND_Y - PLAYER_HEIGHT),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vy: 0.0,
            on_ground: true,
            dash_ticks: 0,
            invuln_ticks: 0,
        }
    }
}

impl Player {
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_ticks > 0
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_ticks > 0
    }
}

/// Hazard types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Aerial, spawns at a random height and outruns the scroll
    Drone,
    /// Sits on the ground
    Spike,
}

/// A hazard entity (axis-aligned box)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward speed per frame, fixed at spawn
    pub speed: f32,
    /// Risk added on hit (honor/risk)
    pub penalty: f32,
}

impl Hazard {
    /// Right edge has passed the left boundary
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// A milestone pickup (circle)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    /// Leftward speed per frame, fixed at spawn
    pub speed: f32,
    /// Index into the timeline, captured at spawn
    pub milestone: usize,
    /// Honor granted on collect (honor/risk)
    pub value: f32,
}

impl Pickup {
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.radius < 0.0
    }
}

/// Complete mutable run state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub variant: RunVariant,
    pub phase: RunPhase,
    /// Score (never decreases within a run)
    pub score: u32,
    pub metrics: RunMetrics,
    /// Current scroll speed
    pub speed: f32,
    /// Simulated time in milliseconds (sum of clamped deltas)
    pub elapsed_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Index into the timeline (saturates at the last milestone)
    pub stage: usize,
    /// Resolved once when the run ends (honor/risk)
    pub ending: Option<EndingReport>,
    pub player: Player,
    /// Active hazards, in spawn order
    pub hazards: Vec<Hazard>,
    /// Active pickups, in spawn order
    pub pickups: Vec<Pickup>,
    pub muted: bool,
    pub presentation: bool,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh run state for the given variant
    pub fn new(variant: RunVariant, tuning: &Tuning) -> Self {
        Self {
            variant,
            phase: RunPhase::Running,
            score: 0,
            metrics: RunMetrics::initial(variant, tuning),
            speed: tuning.scoring.base_speed,
            elapsed_ms: 0.0,
            time_ticks: 0,
            stage: 0,
            ending: None,
            player: Player::default(),
            hazards: Vec::new(),
            pickups: Vec::new(),
            muted: false,
            presentation: false,
            next_id: 1,
        }
    }

    /// Reset everything a run owns. Mute and presentation are player
    /// preferences and survive.
    pub fn reset(&mut self, tuning: &Tuning) {
        let muted = self.muted;
        let presentation = self.presentation;
        *self = Self::new(self.variant, tuning);
        self.muted = muted;
        self.presentation = presentation;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Last valid stage index for this timeline
    pub fn final_stage(tuning: &Tuning) -> usize {
        tuning.timeline.len().saturating_sub(1)
    }

    pub fn entity_count(&self) -> usize {
        self.hazards.len() + self.pickups.len()
    }
}
