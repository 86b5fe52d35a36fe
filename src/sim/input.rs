//! Per-tick input snapshot
//!
//! The host samples its input devices once per tick and hands the engine
//! the set of logical actions currently held. Key mapping is the host's job.

use serde::{Deserialize, Serialize};

/// Logical actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Jump,
    Dash,
    MuteToggle,
    PresentationToggle,
    Restart,
}

/// Actions held during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub dash: bool,
    pub mute_toggle: bool,
    pub presentation_toggle: bool,
    pub restart: bool,
}

impl InputSnapshot {
    /// Builder-style helper: hold one more action
    pub fn with(mut self, action: Action) -> Self {
        self.set(action, true);
        self
    }

    pub fn set(&mut self, action: Action, held: bool) {
        *self.slot(action) = held;
    }

    pub fn is_held(&self, action: Action) -> bool {
        match action {
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Jump => self.jump,
            Action::Dash => self.dash,
            Action::MuteToggle => self.mute_toggle,
            Action::PresentationToggle => self.presentation_toggle,
            Action::Restart => self.restart,
        }
    }

    /// Held now but not in `previous`
    pub fn pressed_since(&self, previous: &InputSnapshot, action: Action) -> bool {
        self.is_held(action) && !previous.is_held(action)
    }

    fn slot(&mut self, action: Action) -> &mut bool {
        match action {
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Jump => &mut self.jump,
            Action::Dash => &mut self.dash,
            Action::MuteToggle => &mut self.mute_toggle,
            Action::PresentationToggle => &mut self.presentation_toggle,
            Action::Restart => &mut self.restart,
        }
    }
}

impl FromIterator<Action> for InputSnapshot {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::with)
    }
}
