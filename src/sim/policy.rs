//! Run-outcome policies
//!
//! Both run variants share spawning, physics and collision. What differs is
//! how a hazard hit or a pickup changes the run's metrics and how the run
//! can finish. That difference is captured by [`RunMetrics`].

use serde::{Deserialize, Serialize};

use super::state::{HazardKind, RunVariant};
use crate::tuning::Tuning;

/// Metrics for the active policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RunMetrics {
    /// Each hit costs one life; zero lives ends the run
    LethalLives { lives: u8 },
    /// Hits raise risk and erode honor; pickups restore honor
    HonorRisk { honor: f32, risk: f32 },
}

impl RunMetrics {
    pub fn initial(variant: RunVariant, tuning: &Tuning) -> Self {
        match variant {
            RunVariant::LethalLives => RunMetrics::LethalLives {
                lives: tuning.lives.initial_lives,
            },
            RunVariant::HonorRisk => RunMetrics::HonorRisk {
                honor: tuning.honor_risk.initial_honor,
                risk: tuning.honor_risk.initial_risk,
            },
        }
    }

    /// Apply a hazard hit. Returns the invulnerability window to grant.
    pub fn apply_hit(&mut self, penalty: f32, tuning: &Tuning) -> u32 {
        match self {
            RunMetrics::LethalLives { lives } => {
                *lives = lives.saturating_sub(1);
                tuning.lives.invuln_ticks
            }
            RunMetrics::HonorRisk { honor, risk } => {
                let hr = &tuning.honor_risk;
                *risk = (*risk + penalty).clamp(hr.risk_min, hr.risk_max);
                *honor = (*honor - penalty * hr.honor_loss_per_penalty)
                    .clamp(hr.honor_min, hr.honor_max);
                hr.invuln_ticks
            }
        }
    }

    /// Apply a pickup reward
    pub fn apply_collect(&mut self, value: f32, tuning: &Tuning) {
        if let RunMetrics::HonorRisk { honor, .. } = self {
            let hr = &tuning.honor_risk;
            *honor = (*honor + value * hr.honor_gain_per_value).clamp(hr.honor_min, hr.honor_max);
        }
    }

    /// Per-tick drift: risk decays toward zero, both metrics re-clamped
    pub fn settle(&mut self, tuning: &Tuning) {
        if let RunMetrics::HonorRisk { honor, risk } = self {
            let hr = &tuning.honor_risk;
            *risk = (*risk * hr.risk_decay).clamp(hr.risk_min, hr.risk_max);
            *honor = honor.clamp(hr.honor_min, hr.honor_max);
        }
    }

    /// No lives left
    pub fn is_exhausted(&self) -> bool {
        matches!(self, RunMetrics::LethalLives { lives: 0 })
    }

    pub fn lives(&self) -> Option<u8> {
        match *self {
            RunMetrics::LethalLives { lives } => Some(lives),
            RunMetrics::HonorRisk { .. } => None,
        }
    }

    pub fn honor(&self) -> Option<f32> {
        match *self {
            RunMetrics::HonorRisk { honor, .. } => Some(honor),
            RunMetrics::LethalLives { .. } => None,
        }
    }

    pub fn risk(&self) -> Option<f32> {
        match *self {
            RunMetrics::HonorRisk { risk, .. } => Some(risk),
            RunMetrics::LethalLives { .. } => None,
        }
    }

    /// Toast shown when a hazard connects
    pub fn hit_message(&self, kind: HazardKind) -> &'static str {
        match (self, kind) {
            (RunMetrics::LethalLives { .. }, HazardKind::Drone) => {
                "Misuse & hype can smack progress. Literacy and guardrails matter."
            }
            (RunMetrics::LethalLives { .. }, HazardKind::Spike) => {
                "Legacy constraints bite: update policies, not just models."
            }
            (RunMetrics::HonorRisk { .. }, _) => {
                "You encountered an unregulated hazard. Risk increased."
            }
        }
    }
}
