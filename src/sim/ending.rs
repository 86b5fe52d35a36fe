//! Run endings for the honor/risk variant
//!
//! The run ends once the final milestone has been collected and the score
//! threshold is met. The outcome is classified from honor and risk at that
//! moment and never recomputed.

use serde::{Deserialize, Serialize};

use super::policy::RunMetrics;
use crate::tuning::{EndingTuning, Tuning};

/// Narrative outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ending {
    Uplift,
    Breakdown,
    Mixed,
}

impl Ending {
    pub fn title(self) -> &'static str {
        match self {
            Ending::Uplift => "Uplift - Partnership Achieved",
            Ending::Breakdown => "Breakdown - Unchecked Risk",
            Ending::Mixed => "Mixed Future - Coexistence with Tradeoffs",
        }
    }

    pub fn body(self) -> &'static str {
        match self {
            Ending::Uplift => {
                "Your stewardship led to broadly beneficial outcomes. AIs amplify human \
                 creativity and prosperity. The engineer is celebrated as a systems steward."
            }
            Ending::Breakdown => {
                "Design choices prioritized short-term gains. Systems drifted, leading to \
                 runaway coordination failures. The world faces a difficult re-stabilization."
            }
            Ending::Mixed => {
                "The future is neither utopia nor collapse. Regulations, audits, and cultural \
                 adaptation shape a negotiated balance."
            }
        }
    }
}

/// Final outcome with the metrics it was decided on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndingReport {
    pub ending: Ending,
    pub honor: f32,
    pub risk: f32,
    pub score: u32,
}

impl EndingReport {
    pub fn summary(&self) -> String {
        format!(
            "{}. Honor: {}, Risk: {}, Score: {}. Press R to play again.",
            self.ending.title(),
            self.honor.round(),
            self.risk.round(),
            self.score
        )
    }
}

/// Classify honor/risk into an outcome. Bounds are inclusive.
pub fn classify(honor: f32, risk: f32, bands: &EndingTuning) -> Ending {
    if honor >= bands.uplift_min_honor && risk <= bands.uplift_max_risk {
        Ending::Uplift
    } else if honor <= bands.breakdown_max_honor && risk >= bands.breakdown_min_risk {
        Ending::Breakdown
    } else {
        Ending::Mixed
    }
}

/// Resolve the ending if its trigger is met. Returns `None` while the run
/// should continue, and always `None` for the lethal-lives policy.
pub fn evaluate(
    metrics: &RunMetrics,
    stage: usize,
    score: u32,
    tuning: &Tuning,
) -> Option<EndingReport> {
    let RunMetrics::HonorRisk { honor, risk } = *metrics else {
        return None;
    };
    let final_stage = tuning.timeline.len().saturating_sub(1);
    if stage < final_stage || score < tuning.ending.score_threshold {
        return None;
    }
    Some(EndingReport {
        ending: classify(honor, risk, &tuning.ending),
        honor,
        risk,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_bands() {
        let bands = EndingTuning::default();
        assert_eq!(classify(70.0, 10.0, &bands), Ending::Uplift);
        assert_eq!(classify(20.0, 80.0, &bands), Ending::Breakdown);
        assert_eq!(classify(50.0, 50.0, &bands), Ending::Mixed);
    }

    #[test]
    fn test_classify_inclusive_bounds() {
        let bands = EndingTuning::default();
        assert_eq!(classify(65.0, 30.0, &bands), Ending::Uplift);
        assert_eq!(classify(35.0, 60.0, &bands), Ending::Breakdown);
        assert_eq!(classify(64.99, 30.0, &bands), Ending::Mixed);
        assert_eq!(classify(65.0, 30.01, &bands), Ending::Mixed);
    }

    #[test]
    fn test_evaluate_requires_stage_and_score() {
        let tuning = Tuning::honor_risk();
        let metrics = RunMetrics::HonorRisk {
            honor: 80.0,
            risk: 5.0,
        };
        let last = tuning.timeline.len() - 1;

        assert!(evaluate(&metrics, last - 1, 100, &tuning).is_none());
        assert!(evaluate(&metrics, last, 29, &tuning).is_none());

        let report = evaluate(&metrics, last, 30, &tuning).unwrap();
        assert_eq!(report.ending, Ending::Uplift);
        assert_eq!(report.score, 30);
        assert!(report.summary().starts_with("Uplift"));
    }

    #[test]
    fn test_evaluate_ignores_lives_policy() {
        let tuning = Tuning::lethal_lives();
        let metrics = RunMetrics::LethalLives { lives: 3 };
        assert!(evaluate(&metrics, 6, 1000, &tuning).is_none());
    }
}
