//! Game balance and tuning
//!
//! Every constant the simulation reads lives here so a run can be replayed
//! or rebalanced from a JSON document without touching the sim code. Two
//! presets mirror the two run variants.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::consts::PLAYFIELD_WIDTH;
use crate::sim::{Milestone, RunVariant};

/// Errors raised when a tuning document is unreadable or violates its bounds.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("milestone timeline must contain at least one entry")]
    EmptyTimeline,
    #[error("{field} must be between {min:.4} and {max:.4} (got {value:.4})")]
    RangeViolation {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },
    #[error("{field} minimum {min:.2} exceeds maximum {max:.2}")]
    InvertedBounds {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{field} must be at least one tick")]
    ZeroDuration { field: &'static str },
}

/// Player movement constants (per nominal frame)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Downward acceleration added to vertical velocity every frame
    pub gravity: f32,
    /// Upward speed given by a jump
    pub jump_velocity: f32,
    /// Horizontal speed while left/right is held
    pub move_speed: f32,
    /// Extra forward speed while a dash is active
    pub dash_speed: f32,
    /// Dash length in ticks
    pub dash_ticks: u32,
    /// Horizontal clamp: distance kept from the left edge
    pub left_margin: f32,
    /// Horizontal clamp: distance kept from the right edge
    pub right_margin: f32,
    /// Ceiling applied to the per-tick delta before integration (ms)
    pub max_frame_ms: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            jump_velocity: 11.0,
            move_speed: 2.6,
            dash_speed: 2.6,
            dash_ticks: 10,
            left_margin: 40.0,
            right_margin: 100.0,
            max_frame_ms: 32.0,
        }
    }
}

/// Spawn rates and entity templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub hazard_chance_base: f32,
    /// Added to the hazard chance per point of score
    pub hazard_chance_per_score: f32,
    pub hazard_chance_cap: f32,
    pub pickup_chance_base: f32,
    /// Added to the pickup chance per stage reached
    pub pickup_chance_per_stage: f32,
    pub pickup_chance_cap: f32,
    /// Probability that a spawned hazard is an aerial drone
    pub drone_weight: f32,
    /// Drones move this much faster than the scroll speed
    pub drone_speed_bonus: f32,
    /// Drone top edge sits this far above the ground, plus a random span
    pub drone_height_min: f32,
    pub drone_height_span: f32,
    pub drone_penalty: f32,
    pub spike_penalty: f32,
    /// Pickup center sits this far above the ground, plus a random span
    pub pickup_height_min: f32,
    pub pickup_height_span: f32,
    pub pickup_radius: f32,
    pub pickup_value: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            hazard_chance_base: 0.018,
            hazard_chance_per_score: 0.0006,
            hazard_chance_cap: 0.12,
            pickup_chance_base: 0.01,
            pickup_chance_per_stage: 0.002,
            pickup_chance_cap: 0.05,
            drone_weight: 0.6,
            drone_speed_bonus: 1.2,
            drone_height_min: 70.0,
            drone_height_span: 110.0,
            drone_penalty: 5.0,
            spike_penalty: 8.0,
            pickup_height_min: 100.0,
            pickup_height_span: 140.0,
            pickup_radius: 12.0,
            pickup_value: 10.0,
        }
    }
}

/// Score and scroll speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    pub score_per_pickup: u32,
    pub base_speed: f32,
    pub max_speed: f32,
    /// Scroll speed gained per point of score
    pub speed_per_score: f32,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            score_per_pickup: 6,
            base_speed: 3.0,
            max_speed: 7.5,
            speed_per_score: 0.008,
        }
    }
}

/// Lethal-lives metric model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivesTuning {
    pub initial_lives: u8,
    /// Invulnerability after losing a life (ticks)
    pub invuln_ticks: u32,
}

impl Default for LivesTuning {
    fn default() -> Self {
        Self {
            initial_lives: 3,
            invuln_ticks: 60,
        }
    }
}

/// Cumulative honor/risk metric model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HonorRiskTuning {
    pub initial_honor: f32,
    pub honor_min: f32,
    pub honor_max: f32,
    pub initial_risk: f32,
    pub risk_min: f32,
    pub risk_max: f32,
    /// Honor lost per point of hazard penalty
    pub honor_loss_per_penalty: f32,
    /// Honor gained per point of pickup value
    pub honor_gain_per_value: f32,
    /// Multiplier applied to risk every tick
    pub risk_decay: f32,
    /// Invulnerability after a hazard hit (ticks)
    pub invuln_ticks: u32,
}

impl Default for HonorRiskTuning {
    fn default() -> Self {
        Self {
            initial_honor: 50.0,
            honor_min: 0.0,
            honor_max: 100.0,
            initial_risk: 0.0,
            risk_min: 0.0,
            risk_max: 200.0,
            honor_loss_per_penalty: 0.3,
            honor_gain_per_value: 0.8,
            risk_decay: 0.998,
            invuln_ticks: 40,
        }
    }
}

/// Ending trigger and outcome bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndingTuning {
    /// Score required (together with the final stage) to end the run
    pub score_threshold: u32,
    pub uplift_min_honor: f32,
    pub uplift_max_risk: f32,
    pub breakdown_max_honor: f32,
    pub breakdown_min_risk: f32,
}

impl Default for EndingTuning {
    fn default() -> Self {
        Self {
            score_threshold: 30,
            uplift_min_honor: 65.0,
            uplift_max_risk: 30.0,
            breakdown_max_honor: 35.0,
            breakdown_min_risk: 60.0,
        }
    }
}

/// Complete balance sheet for one run variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub physics: PhysicsTuning,
    pub spawn: SpawnTuning,
    pub scoring: ScoringTuning,
    pub lives: LivesTuning,
    pub honor_risk: HonorRiskTuning,
    pub ending: EndingTuning,
    /// How long a toast stays up (ticks)
    pub toast_ticks: u32,
    /// Narrative checkpoints, in order
    pub timeline: Vec<Milestone>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::honor_risk()
    }
}

impl Tuning {
    /// Constants of the honor/risk revision
    pub fn honor_risk() -> Self {
        Self {
            physics: PhysicsTuning::default(),
            spawn: SpawnTuning::default(),
            scoring: ScoringTuning::default(),
            lives: LivesTuning::default(),
            honor_risk: HonorRiskTuning::default(),
            ending: EndingTuning::default(),
            toast_ticks: 200,
            timeline: honor_risk_timeline(),
        }
    }

    /// Constants of the lethal-lives revision
    pub fn lethal_lives() -> Self {
        Self {
            physics: PhysicsTuning {
                move_speed: 2.4,
                dash_speed: 2.4,
                ..PhysicsTuning::default()
            },
            spawn: SpawnTuning {
                hazard_chance_base: 0.02,
                hazard_chance_per_score: 0.0,
                pickup_chance_per_stage: 0.0,
                drone_speed_bonus: 1.0,
                drone_height_min: 60.0,
                drone_height_span: 120.0,
                pickup_height_min: 80.0,
                pickup_height_span: 160.0,
                ..SpawnTuning::default()
            },
            scoring: ScoringTuning {
                score_per_pickup: 5,
                max_speed: 8.0,
                speed_per_score: 0.01,
                ..ScoringTuning::default()
            },
            lives: LivesTuning::default(),
            honor_risk: HonorRiskTuning::default(),
            ending: EndingTuning::default(),
            toast_ticks: 180,
            timeline: lives_timeline(),
        }
    }

    pub fn for_variant(variant: RunVariant) -> Self {
        match variant {
            RunVariant::LethalLives => Self::lethal_lives(),
            RunVariant::HonorRisk => Self::honor_risk(),
        }
    }

    /// Parse a tuning document. Missing sections fall back to the
    /// honor/risk preset values.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Self::from_json_for(RunVariant::HonorRisk, json)
    }

    /// Parse a tuning document on top of a variant's preset. Any field the
    /// document leaves out keeps the preset value; arrays such as the
    /// timeline are replaced whole.
    pub fn from_json_for(variant: RunVariant, json: &str) -> Result<Self, TuningError> {
        let overrides: Value = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(Self::for_variant(variant))?;
        overlay(&mut merged, overrides);
        let tuning: Tuning = serde_json::from_value(merged)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every bound the simulation relies on.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.timeline.is_empty() {
            return Err(TuningError::EmptyTimeline);
        }
        if self.physics.dash_ticks == 0 {
            return Err(TuningError::ZeroDuration { field: "physics.dash_ticks" });
        }
        if self.toast_ticks == 0 {
            return Err(TuningError::ZeroDuration { field: "toast_ticks" });
        }
        range("physics.max_frame_ms", self.physics.max_frame_ms, 1.0, 1000.0)?;
        range("physics.gravity", self.physics.gravity, 0.0, 10.0)?;
        let max_margin = PLAYFIELD_WIDTH / 2.0;
        range("physics.left_margin", self.physics.left_margin, 0.0, max_margin)?;
        range("physics.right_margin", self.physics.right_margin, 0.0, max_margin)?;

        // Spawn chances must stay strictly below 1.
        let spawn = &self.spawn;
        range("spawn.hazard_chance_cap", spawn.hazard_chance_cap, 0.0, 0.99)?;
        range("spawn.pickup_chance_cap", spawn.pickup_chance_cap, 0.0, 0.99)?;
        range("spawn.hazard_chance_base", spawn.hazard_chance_base, 0.0, spawn.hazard_chance_cap)?;
        range("spawn.pickup_chance_base", spawn.pickup_chance_base, 0.0, spawn.pickup_chance_cap)?;
        range("spawn.hazard_chance_per_score", spawn.hazard_chance_per_score, 0.0, 1.0)?;
        range("spawn.pickup_chance_per_stage", spawn.pickup_chance_per_stage, 0.0, 1.0)?;
        range("spawn.drone_weight", spawn.drone_weight, 0.0, 1.0)?;

        ordered("scoring.speed", self.scoring.base_speed, self.scoring.max_speed)?;

        let hr = &self.honor_risk;
        ordered("honor_risk.honor", hr.honor_min, hr.honor_max)?;
        ordered("honor_risk.risk", hr.risk_min, hr.risk_max)?;
        range("honor_risk.initial_honor", hr.initial_honor, hr.honor_min, hr.honor_max)?;
        range("honor_risk.initial_risk", hr.initial_risk, hr.risk_min, hr.risk_max)?;
        range("honor_risk.risk_decay", hr.risk_decay, f32::MIN_POSITIVE, 1.0)?;
        Ok(())
    }
}

/// Recursively copy `top` over `base`. Objects merge key by key; anything
/// else replaces.
fn overlay(base: &mut Value, top: Value) {
    match (base, top) {
        (Value::Object(base), Value::Object(top)) => {
            for (key, value) in top {
                match base.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, top) => *base = top,
    }
}

fn range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), TuningError> {
    if !(min..=max).contains(&value) {
        return Err(TuningError::RangeViolation { field, min, max, value });
    }
    Ok(())
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), TuningError> {
    // NaN on either side counts as inverted
    if !(min <= max) {
        return Err(TuningError::InvertedBounds { field, min, max });
    }
    Ok(())
}

fn honor_risk_timeline() -> Vec<Milestone> {
    [
        (1950, "Turing, formal ideas of intelligence"),
        (1980, "Expert systems - early industry uses"),
        (2000, "Search, recommendations, and games"),
        (2020, "Deep learning & large models widely used"),
        (2050, "Copilots in workplaces; strong augmentation"),
        (2080, "City-scale systems & automated governance"),
        (2100, "Human+AI partners shape society"),
    ]
    .into_iter()
    .map(|(year, text)| Milestone::new(year, text))
    .collect()
}

fn lives_timeline() -> Vec<Milestone> {
    [
        (1950, "1950s: Alan Turing proposes the 'Imitation Game', the Turing Test."),
        (1980, "1980s: Expert systems used in medicine, but brittle."),
        (2000, "2000s: AI in search engines, recommendation, chess, daily life."),
        (2020, "2020s: Deep learning and large language models widely adopted."),
        (2050, "2050: AI copilots standard at work; universal translators fluent."),
        (2080, "2080: AI helps govern smart cities and climate systems."),
        (2100, "2100: Human + AI collaboration in most creative and civic fields."),
    ]
    .into_iter()
    .map(|(year, text)| Milestone::new(year, text))
    .collect()
}
