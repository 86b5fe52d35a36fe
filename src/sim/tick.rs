//! One simulation tick
//!
//! Order within a tick is fixed:
//!  1. Clamp the frame delta
//!  2. Player physics (input, dash, jump, gravity, clamps)
//!  3. Scroll speed from score
//!  4. Spawn rolls
//!  5. Move hazards and pickups
//!  6. Hazard pass, then pickup pass
//!  7. Metric drift and clamping
//!  8. Ending / game-over check
//!
//! Nothing here fails; every input produces a valid next state.

use rand::Rng;

use super::collision::{resolve_hazards, resolve_pickups};
use super::ending;
use super::events::{EventCategory, Notifications};
use super::input::InputSnapshot;
use super::physics::integrate_player;
use super::spawner::{maybe_spawn, scroll_speed};
use super::state::{GameState, RunPhase};
use crate::consts::FRAME_MS;
use crate::tuning::Tuning;

const JUMP_CAPTION: &str = "Upskill: jump to higher capability.";
const DASH_CAPTION: &str = "Dash = automation boost: faster iteration, not teleportation.";
const GAME_OVER_TEXT: &str = "Game Over. Press R.";

/// Clamp a host frame delta into `[0, max_ms]`. Non-finite deltas count as 0.
pub fn clamp_frame(dt_ms: f32, max_ms: f32) -> f32 {
    if dt_ms.is_finite() {
        dt_ms.clamp(0.0, max_ms)
    } else {
        0.0
    }
}

/// Advance a running game by one tick. Halted runs are left untouched.
pub fn step<R: Rng + ?Sized>(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut R,
    events: &mut Notifications,
    input: &InputSnapshot,
    dt_ms: f32,
) {
    if !state.phase.is_running() {
        return;
    }

    let dt = clamp_frame(dt_ms, tuning.physics.max_frame_ms);
    let step = dt / FRAME_MS;
    state.time_ticks += 1;
    state.elapsed_ms += f64::from(dt);
    let now = state.time_ticks;

    let motion = integrate_player(&mut state.player, input, &tuning.physics, step);
    if motion.dash_started {
        events.push(EventCategory::DashStarted, "Dash", now);
        if state.presentation {
            events.push(EventCategory::Caption, DASH_CAPTION, now);
        }
    }
    if motion.jumped {
        events.push(EventCategory::JumpPerformed, "Jump", now);
        if state.presentation {
            events.push(EventCategory::Caption, JUMP_CAPTION, now);
        }
    }

    state.speed = scroll_speed(state.score, &tuning.scoring);
    maybe_spawn(state, tuning, rng);

    for hazard in &mut state.hazards {
        hazard.pos.x -= hazard.speed * step;
    }
    for pickup in &mut state.pickups {
        pickup.pos.x -= pickup.speed * step;
    }

    resolve_hazards(state, tuning, events);
    resolve_pickups(state, tuning, events);

    state.metrics.settle(tuning);

    check_run_end(state, tuning, events);
}

/// Move a running game to its terminal phase if its end condition holds.
/// Runs at most once per run: the phase change makes later calls no-ops.
fn check_run_end(state: &mut GameState, tuning: &Tuning, events: &mut Notifications) {
    if !state.phase.is_running() {
        return;
    }

    if let Some(report) = ending::evaluate(&state.metrics, state.stage, state.score, tuning) {
        log::info!(
            "Run ended at tick {}: {:?} (honor {:.1}, risk {:.1}, score {})",
            state.time_ticks,
            report.ending,
            report.honor,
            report.risk,
            report.score
        );
        state.phase = RunPhase::Ended;
        state.ending = Some(report);
        events.push(EventCategory::RunEnded, report.summary(), state.time_ticks);
    } else if state.metrics.is_exhausted() {
        log::info!(
            "Game over at tick {} with score {}",
            state.time_ticks,
            state.score
        );
        state.phase = RunPhase::GameOver;
        events.push(EventCategory::RunEnded, GAME_OVER_TEXT, state.time_ticks);
    }
}
