//! Collision detection and response
//!
//! The player is an axis-aligned box, hazards are boxes and pickups are
//! circles. Each tick runs one pass over hazards and one over pickups;
//! every entity is retired at most once, either for leaving the screen or
//! for touching the player.

use glam::Vec2;

use super::events::{EventCategory, Notifications};
use super::state::GameState;
use crate::closest_point_in_rect;
use crate::tuning::Tuning;

/// Strict box overlap: touching edges do not count
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

/// Circle vs box, touching counts as overlap
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect_pos: Vec2, rect_size: Vec2) -> bool {
    let nearest = closest_point_in_rect(center, rect_pos, rect_size);
    center.distance_squared(nearest) <= radius * radius
}

/// Retire off-screen hazards and resolve hazard hits. Returns the number
/// of hits applied this tick.
pub fn resolve_hazards(state: &mut GameState, tuning: &Tuning, events: &mut Notifications) -> u32 {
    let mut hits = 0;
    let GameState {
        player,
        hazards,
        metrics,
        time_ticks,
        ..
    } = state;

    hazards.retain(|hazard| {
        if hazard.is_off_screen() {
            return false;
        }
        if player.is_invulnerable()
            || !aabb_overlap(player.pos, player.size, hazard.pos, hazard.size)
        {
            return true;
        }

        // The hit grants invulnerability right away, so no other hazard can
        // land this tick.
        player.invuln_ticks = metrics.apply_hit(hazard.penalty, tuning);
        log::debug!(
            "Hazard {} ({:?}) hit player, metrics now {:?}",
            hazard.id,
            hazard.kind,
            metrics
        );
        events.push(
            EventCategory::RiskHit,
            metrics.hit_message(hazard.kind),
            *time_ticks,
        );
        hits += 1;
        false
    });

    hits
}

/// Retire off-screen pickups and resolve collects. Returns the number of
/// pickups collected this tick.
pub fn resolve_pickups(state: &mut GameState, tuning: &Tuning, events: &mut Notifications) -> u32 {
    let mut collected = 0;
    let final_stage = GameState::final_stage(tuning);
    let GameState {
        player,
        pickups,
        metrics,
        score,
        stage,
        time_ticks,
        ..
    } = state;

    pickups.retain(|pickup| {
        if pickup.is_off_screen() {
            return false;
        }
        if !circle_rect_overlap(pickup.pos, pickup.radius, player.pos, player.size) {
            return true;
        }

        *score = score.saturating_add(tuning.scoring.score_per_pickup);
        metrics.apply_collect(pickup.value, tuning);

        let text = match tuning.timeline.get(pickup.milestone.min(final_stage)) {
            Some(milestone) => format!("{}: {}", milestone.year, milestone.text),
            None => String::from("Milestone reached"),
        };
        log::debug!("Pickup {} collected, score {}", pickup.id, score);
        events.push(EventCategory::MilestoneCollected, text, *time_ticks);

        if *stage < final_stage {
            *stage += 1;
        }
        collected += 1;
        false
    });

    collected
}
