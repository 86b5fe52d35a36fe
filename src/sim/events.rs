//! Notifications emitted by the simulation
//!
//! The engine appends [`GameEvent`]s as things happen; the presentation layer
//! drains them between ticks. The engine also keeps a single "current toast"
//! with an expiry countdown so a HUD can show the latest message without
//! tracking timers itself.

use serde::{Deserialize, Serialize};

use super::state::RunVariant;

/// Event categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// General notice (intro, restart)
    Notice,
    /// A hazard connected
    RiskHit,
    /// A milestone pickup was collected
    MilestoneCollected,
    DashStarted,
    JumpPerformed,
    /// Ending resolved or game over
    RunEnded,
    /// Explanatory line shown in presentation mode
    Caption,
    /// Mute or presentation mode flipped
    SettingToggled,
}

/// A tone the presentation layer may play for an event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub freq_hz: f32,
    pub duration_s: f32,
}

impl EventCategory {
    /// Whether this event replaces the current toast
    pub fn shows_toast(self) -> bool {
        !matches!(self, EventCategory::DashStarted | EventCategory::JumpPerformed)
    }

    /// Beep associated with this event, if any. Hit and collect tones
    /// differ between the run variants.
    pub fn cue(self, variant: RunVariant) -> Option<Cue> {
        let (freq_hz, duration_s) = match (self, variant) {
            (EventCategory::DashStarted, _) => (520.0, 0.04),
            (EventCategory::JumpPerformed, _) => (740.0, 0.06),
            (EventCategory::RiskHit, RunVariant::LethalLives) => (260.0, 0.08),
            (EventCategory::RiskHit, RunVariant::HonorRisk) => (260.0, 0.06),
            (EventCategory::MilestoneCollected, RunVariant::LethalLives) => (840.0, 0.05),
            (EventCategory::MilestoneCollected, RunVariant::HonorRisk) => (880.0, 0.05),
            _ => return None,
        };
        Some(Cue { freq_hz, duration_s })
    }
}

/// A discrete notification record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub category: EventCategory,
    pub text: String,
    /// Tick on which the event was raised
    pub tick: u64,
}

impl GameEvent {
    /// Tone to play, suppressed while muted
    pub fn cue(&self, variant: RunVariant, muted: bool) -> Option<Cue> {
        if muted { None } else { self.category.cue(variant) }
    }
}

/// Latest displayable message and its remaining lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub category: EventCategory,
    pub text: String,
    pub ticks_left: u32,
}

/// Pending events plus the current toast
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    pending: Vec<GameEvent>,
    toast: Option<Toast>,
    toast_ticks: u32,
}

impl Notifications {
    pub fn new(toast_ticks: u32) -> Self {
        Self {
            pending: Vec::new(),
            toast: None,
            toast_ticks,
        }
    }

    pub fn push(&mut self, category: EventCategory, text: impl Into<String>, tick: u64) {
        let text = text.into();
        log::debug!("[{:?}] {}", category, text);
        if category.shows_toast() {
            self.toast = Some(Toast {
                category,
                text: text.clone(),
                ticks_left: self.toast_ticks,
            });
        }
        self.pending.push(GameEvent {
            category,
            text,
            tick,
        });
    }

    /// Take every event raised since the last drain, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[GameEvent] {
        &self.pending
    }

    /// Count the toast down by one tick, clearing it at zero
    pub fn tick_toast(&mut self) {
        if let Some(toast) = &mut self.toast {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
            if toast.ticks_left == 0 {
                self.toast = None;
            }
        }
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }
}
