//! Demo controller
//!
//! Plays the game from a [`RunStateView`] the way an idle/attract mode
//! would: hop over anything that would hit a standing player, reach for
//! pickups in jump range, and otherwise drift back to the spawn column.

use super::input::{Action, InputSnapshot};
use super::state::Hazard;
use super::RunStateView;
use crate::consts::{GROUND_Y, PLAYER_SPAWN_X};

/// Jump when a threat is this many frames away
const JUMP_LEAD_FRAMES: f32 = 14.0;
/// Highest pickup center (above ground) a jump can reach
const PICKUP_REACH: f32 = 150.0;
/// Horizontal window in which a pickup is worth jumping for
const PICKUP_WINDOW: f32 = 40.0;
/// Dead zone around the spawn column
const HOME_SLACK: f32 = 20.0;

/// Choose the actions to hold this tick
pub fn drive(view: &RunStateView<'_>) -> InputSnapshot {
    let mut input = InputSnapshot::default();
    if !view.is_running() {
        return input;
    }

    let player = view.player;
    let standing_top = GROUND_Y - player.size.y;
    let front = player.pos.x + player.size.x;

    let threat = view
        .hazards
        .iter()
        .filter(|h| h.pos.x + h.size.x > player.pos.x)
        .filter(|h| hits_standing_player(h, standing_top))
        .map(|h| (h.pos.x - front) / h.speed.max(0.1))
        .fold(f32::INFINITY, f32::min);

    if threat <= JUMP_LEAD_FRAMES {
        if player.on_ground {
            input.set(Action::Jump, true);
        }
        return input;
    }

    let center_x = player.pos.x + player.size.x / 2.0;
    let target = view
        .pickups
        .iter()
        .filter(|p| GROUND_Y - p.pos.y <= PICKUP_REACH)
        .filter(|p| p.pos.x > player.pos.x)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    if let Some(pickup) = target {
        if (pickup.pos.x - center_x).abs() <= PICKUP_WINDOW {
            input.set(Action::Jump, player.on_ground);
        }
        return input;
    }

    if player.pos.x > PLAYER_SPAWN_X + HOME_SLACK {
        input.set(Action::Left, true);
    } else if player.pos.x < PLAYER_SPAWN_X - HOME_SLACK {
        input.set(Action::Right, true);
    }
    input
}

fn hits_standing_player(hazard: &Hazard, standing_top: f32) -> bool {
    hazard.pos.y + hazard.size.y > standing_top
}
