//! The engine instance
//!
//! Owns the run state, the tuning it was built with, the seeded random
//! source and the notification queue. A host calls [`Engine::tick`] once per
//! frame with the elapsed time and the held actions, renders from the
//! returned view, and drains events for its HUD and audio.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::ending::EndingReport;
use super::events::{EventCategory, GameEvent, Notifications, Toast};
use super::input::{Action, InputSnapshot};
use super::policy::RunMetrics;
use super::state::{GameState, Hazard, Milestone, Pickup, Player, RunPhase, RunVariant};
use super::tick;
use crate::tuning::{Tuning, TuningError};

/// Read-only view of the engine between ticks
#[derive(Debug, Clone, Serialize)]
pub struct RunStateView<'a> {
    pub variant: RunVariant,
    pub phase: RunPhase,
    pub player: &'a Player,
    pub hazards: &'a [Hazard],
    pub pickups: &'a [Pickup],
    pub metrics: RunMetrics,
    pub score: u32,
    pub stage: usize,
    /// Milestone at the current stage
    pub milestone: Option<&'a Milestone>,
    pub speed: f32,
    pub elapsed_ms: f64,
    pub time_ticks: u64,
    pub ending: Option<EndingReport>,
    pub muted: bool,
    pub presentation: bool,
    pub toast: Option<&'a Toast>,
}

impl RunStateView<'_> {
    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn lives(&self) -> Option<u8> {
        self.metrics.lives()
    }

    pub fn honor(&self) -> Option<f32> {
        self.metrics.honor()
    }

    pub fn risk(&self) -> Option<f32> {
        self.metrics.risk()
    }
}

/// A single run of the game with its own random source
pub struct Engine<R = Pcg32> {
    state: GameState,
    tuning: Tuning,
    rng: R,
    seed: u64,
    events: Notifications,
    last_input: InputSnapshot,
}

impl Engine<Pcg32> {
    /// Engine with the variant's preset tuning
    pub fn new(variant: RunVariant, seed: u64) -> Self {
        // Presets are covered by the tuning tests
        Self::assemble(variant, Tuning::for_variant(variant), seed)
    }

    /// Engine with custom tuning. Tuning that fails [`Tuning::validate`]
    /// is rejected, since the tick relies on its bounds.
    pub fn with_tuning(
        variant: RunVariant,
        tuning: Tuning,
        seed: u64,
    ) -> Result<Self, TuningError> {
        Self::seeded(variant, tuning, seed)
    }
}

impl<R: Rng + SeedableRng> Engine<R> {
    /// Engine driven by any seedable generator
    pub fn seeded(
        variant: RunVariant,
        tuning: Tuning,
        seed: u64,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::assemble(variant, tuning, seed))
    }

    fn assemble(variant: RunVariant, tuning: Tuning, seed: u64) -> Self {
        let state = GameState::new(variant, &tuning);
        let mut events = Notifications::new(tuning.toast_ticks);
        events.push(EventCategory::Notice, variant.intro_notice(), 0);
        log::info!("Engine created: {:?}, seed {}", variant, seed);
        Self {
            state,
            tuning,
            rng: R::seed_from_u64(seed),
            seed,
            events,
            last_input: InputSnapshot::default(),
        }
    }

    /// Advance by one frame. `dt_ms` is clamped internally.
    ///
    /// Mute, presentation and restart react to the press, not the hold.
    /// Restart takes effect before the tick is simulated, even if the run
    /// has ended.
    pub fn tick(&mut self, dt_ms: f32, input: &InputSnapshot) -> RunStateView<'_> {
        let previous = std::mem::replace(&mut self.last_input, *input);

        if input.pressed_since(&previous, Action::Restart) {
            self.restart();
        }
        if input.pressed_since(&previous, Action::MuteToggle) {
            self.state.muted = !self.state.muted;
            let text = if self.state.muted { "Muted" } else { "Unmuted" };
            self.events
                .push(EventCategory::SettingToggled, text, self.state.time_ticks);
        }
        if input.pressed_since(&previous, Action::PresentationToggle) {
            self.state.presentation = !self.state.presentation;
            let text = if self.state.presentation {
                "Presentation ON"
            } else {
                "Presentation OFF"
            };
            self.events
                .push(EventCategory::SettingToggled, text, self.state.time_ticks);
        }

        tick::step(
            &mut self.state,
            &self.tuning,
            &mut self.rng,
            &mut self.events,
            input,
            dt_ms,
        );
        self.events.tick_toast();

        self.view()
    }

    /// Reset the run and replay the same random sequence
    pub fn restart(&mut self) {
        self.restart_with_seed(self.seed);
    }

    /// Reset the run with a new random sequence
    pub fn restart_with_seed(&mut self, seed: u64) {
        log::info!(
            "Restarting run (previous score {}, phase {:?}), seed {}",
            self.state.score,
            self.state.phase,
            seed
        );
        self.seed = seed;
        self.rng = R::seed_from_u64(seed);
        self.state.reset(&self.tuning);
        self.events.push(
            EventCategory::Notice,
            self.state.variant.restart_notice(),
            self.state.time_ticks,
        );
    }

    pub fn view(&self) -> RunStateView<'_> {
        let state = &self.state;
        RunStateView {
            variant: state.variant,
            phase: state.phase,
            player: &state.player,
            hazards: &state.hazards,
            pickups: &state.pickups,
            metrics: state.metrics,
            score: state.score,
            stage: state.stage,
            milestone: self.tuning.timeline.get(state.stage),
            speed: state.speed,
            elapsed_ms: state.elapsed_ms,
            time_ticks: state.time_ticks,
            ending: state.ending,
            muted: state.muted,
            presentation: state.presentation,
            toast: self.events.toast(),
        }
    }

    /// Take all notifications raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scripted scenarios and tests. Hosts drive
    /// the run through [`Engine::tick`] only.
    #[doc(hidden)]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
