//! Hazard and pickup spawning
//!
//! Each tick rolls independently for one hazard and one pickup. Both
//! chances grow with progress and are capped below 1. New entities appear
//! just past the right edge and take the current scroll speed with them.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Hazard, HazardKind, Pickup};
use crate::consts::*;
use crate::tuning::{ScoringTuning, SpawnTuning, Tuning};

/// Scroll speed for a given score
pub fn scroll_speed(score: u32, scoring: &ScoringTuning) -> f32 {
    (scoring.base_speed + score as f32 * scoring.speed_per_score).min(scoring.max_speed)
}

/// Per-tick hazard spawn probability
pub fn hazard_chance(score: u32, spawn: &SpawnTuning) -> f32 {
    (spawn.hazard_chance_base + score as f32 * spawn.hazard_chance_per_score)
        .min(spawn.hazard_chance_cap)
}

/// Per-tick pickup spawn probability
pub fn pickup_chance(stage: usize, spawn: &SpawnTuning) -> f32 {
    (spawn.pickup_chance_base + stage as f32 * spawn.pickup_chance_per_stage)
        .min(spawn.pickup_chance_cap)
}

/// What a spawn roll produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spawned {
    pub hazard: bool,
    pub pickup: bool,
}

/// Roll for this tick's spawns and append whatever comes up
pub fn maybe_spawn<R: Rng + ?Sized>(state: &mut GameState, tuning: &Tuning, rng: &mut R) -> Spawned {
    let mut spawned = Spawned::default();
    if rng.random::<f32>() < hazard_chance(state.score, &tuning.spawn) {
        spawn_hazard(state, tuning, rng);
        spawned.hazard = true;
    }
    if rng.random::<f32>() < pickup_chance(state.stage, &tuning.spawn) {
        spawn_pickup(state, tuning, rng);
        spawned.pickup = true;
    }
    spawned
}

/// Append one hazard at the right edge
pub fn spawn_hazard<R: Rng + ?Sized>(state: &mut GameState, tuning: &Tuning, rng: &mut R) {
    let spawn = &tuning.spawn;
    let x = PLAYFIELD_WIDTH + HAZARD_SPAWN_OFFSET;
    let id = state.next_entity_id();

    let hazard = if rng.random::<f32>() < spawn.drone_weight {
        let lift = spawn.drone_height_min + rng.random::<f32>() * spawn.drone_height_span;
        Hazard {
            id,
            kind: HazardKind::Drone,
            pos: Vec2::new(x, GROUND_Y - lift),
            size: Vec2::new(DRONE_WIDTH, DRONE_HEIGHT),
            speed: state.speed + spawn.drone_speed_bonus,
            penalty: spawn.drone_penalty,
        }
    } else {
        Hazard {
            id,
            kind: HazardKind::Spike,
            pos: Vec2::new(x, GROUND_Y - SPIKE_HEIGHT),
            size: Vec2::new(SPIKE_WIDTH, SPIKE_HEIGHT),
            speed: state.speed,
            penalty: spawn.spike_penalty,
        }
    };

    log::debug!("Spawned {:?} hazard {} at y={:.1}", hazard.kind, id, hazard.pos.y);
    state.hazards.push(hazard);
}

/// Append one pickup carrying the current milestone
pub fn spawn_pickup<R: Rng + ?Sized>(state: &mut GameState, tuning: &Tuning, rng: &mut R) {
    let spawn = &tuning.spawn;
    let lift = spawn.pickup_height_min + rng.random::<f32>() * spawn.pickup_height_span;
    let id = state.next_entity_id();
    let milestone = state.stage.min(GameState::final_stage(tuning));

    log::debug!("Spawned pickup {} for milestone {}", id, milestone);
    state.pickups.push(Pickup {
        id,
        pos: Vec2::new(PLAYFIELD_WIDTH + PICKUP_SPAWN_OFFSET, GROUND_Y - lift),
        radius: spawn.pickup_radius,
        speed: state.speed,
        milestone,
        value: spawn.pickup_value,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::RunVariant;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Generator that returns the same word forever
    struct FixedRng(u32);

    impl rand::RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.0
        }

        fn next_u64(&mut self) -> u64 {
            (u64::from(self.0) << 32) | u64::from(self.0)
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for (i, byte) in dst.iter_mut().enumerate() {
                *byte = self.0.to_le_bytes()[i % 4];
            }
        }
    }

    #[test]
    fn test_chances_grow_and_cap() {
        let spawn = SpawnTuning::default();
        assert!((hazard_chance(0, &spawn) - 0.018).abs() < 1e-6);
        assert!(hazard_chance(50, &spawn) > hazard_chance(10, &spawn));
        assert_eq!(hazard_chance(100_000, &spawn), spawn.hazard_chance_cap);
        assert!(hazard_chance(u32::MAX, &spawn) < 1.0);

        assert!((pickup_chance(0, &spawn) - 0.01).abs() < 1e-6);
        assert!(pickup_chance(6, &spawn) > pickup_chance(0, &spawn));
        assert!(pickup_chance(usize::MAX, &spawn) < 1.0);
    }

    #[test]
    fn test_scroll_speed_capped() {
        let scoring = ScoringTuning::default();
        assert_eq!(scroll_speed(0, &scoring), 3.0);
        assert!(scroll_speed(100, &scoring) > 3.0);
        assert_eq!(scroll_speed(10_000, &scoring), 7.5);
    }

    #[test]
    fn test_low_rolls_spawn_drone_and_pickup() {
        let tuning = Tuning::honor_risk();
        let mut state = GameState::new(RunVariant::HonorRisk, &tuning);
        let mut rng = FixedRng(0);

        let spawned = maybe_spawn(&mut state, &tuning, &mut rng);
        assert_eq!(spawned, Spawned { hazard: true, pickup: true });

        let hazard = &state.hazards[0];
        assert_eq!(hazard.kind, HazardKind::Drone);
        assert_eq!(hazard.pos.x, PLAYFIELD_WIDTH + HAZARD_SPAWN_OFFSET);
        assert_eq!(hazard.pos.y, GROUND_Y - 70.0);
        assert!((hazard.speed - (state.speed + 1.2)).abs() < 1e-6);

        let pickup = &state.pickups[0];
        assert_eq!(pickup.milestone, 0);
        assert_eq!(pickup.pos.y, GROUND_Y - 100.0);
        assert_eq!(pickup.speed, state.speed);
    }

    #[test]
    fn test_high_rolls_spawn_nothing() {
        let tuning = Tuning::honor_risk();
        let mut state = GameState::new(RunVariant::HonorRisk, &tuning);
        let mut rng = FixedRng(u32::MAX);

        for _ in 0..100 {
            assert_eq!(maybe_spawn(&mut state, &tuning, &mut rng), Spawned::default());
        }
        assert_eq!(state.entity_count(), 0);
    }

    #[test]
    fn test_spike_sits_on_ground() {
        let mut tuning = Tuning::honor_risk();
        tuning.spawn.drone_weight = 0.0;
        let mut state = GameState::new(RunVariant::HonorRisk, &tuning);
        let mut rng = Pcg32::seed_from_u64(7);

        spawn_hazard(&mut state, &tuning, &mut rng);
        let spike = &state.hazards[0];
        assert_eq!(spike.kind, HazardKind::Spike);
        assert_eq!(spike.pos.y + spike.size.y, GROUND_Y);
        assert_eq!(spike.speed, state.speed);
        assert_eq!(spike.penalty, 8.0);
    }

    #[test]
    fn test_pickup_milestone_clamped() {
        let tuning = Tuning::honor_risk();
        let mut state = GameState::new(RunVariant::HonorRisk, &tuning);
        state.stage = 99;
        let mut rng = Pcg32::seed_from_u64(1);

        spawn_pickup(&mut state, &tuning, &mut rng);
        assert_eq!(state.pickups[0].milestone, tuning.timeline.len() - 1);
    }

    #[test]
    fn test_seeded_spawns_are_deterministic() {
        let tuning = Tuning::honor_risk();
        let mut a = GameState::new(RunVariant::HonorRisk, &tuning);
        let mut b = GameState::new(RunVariant::HonorRisk, &tuning);
        let mut rng_a = Pcg32::seed_from_u64(42);
        let mut rng_b = Pcg32::seed_from_u64(42);

        for _ in 0..500 {
            maybe_spawn(&mut a, &tuning, &mut rng_a);
            maybe_spawn(&mut b, &tuning, &mut rng_b);
        }
        assert!(!a.hazards.is_empty());
        assert_eq!(a.hazards, b.hazards);
        assert_eq!(a.pickups, b.pickups);
    }
}
