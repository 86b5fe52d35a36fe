//! Player movement
//!
//! Speeds and gravity are per nominal frame; `step` is the clamped tick
//! delta divided by the nominal frame length, so a 60 Hz tick is exactly 1.
//! Dash and invulnerability count ticks, not time.

use super::input::InputSnapshot;
use super::state::Player;
use crate::consts::{GROUND_Y, PLAYFIELD_WIDTH};
use crate::tuning::PhysicsTuning;

/// What the integrator did this tick that the outside world may care about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Motion {
    pub dash_started: bool,
    pub jumped: bool,
}

/// Advance the player by one tick
pub fn integrate_player(
    player: &mut Player,
    input: &InputSnapshot,
    physics: &PhysicsTuning,
    step: f32,
) -> Motion {
    let mut motion = Motion::default();

    if input.left {
        player.pos.x -= physics.move_speed * step;
    }
    if input.right {
        player.pos.x += physics.move_speed * step;
    }

    // A zero-length frame moves nothing, so it must not start a dash or
    // jump either.
    let live = step > 0.0;

    // Level-triggered: holding dash re-arms it as soon as the last one ends
    if live && input.dash && !player.is_dashing() {
        player.dash_ticks = physics.dash_ticks;
        motion.dash_started = true;
    }
    if live && player.is_dashing() {
        player.pos.x += physics.dash_speed * step;
        player.dash_ticks -= 1;
    }

    if live && input.jump && player.on_ground {
        player.vy = -physics.jump_velocity;
        player.on_ground = false;
        motion.jumped = true;
    }

    player.vy += physics.gravity * step;
    player.pos.y += player.vy * step;

    if player.bottom() >= GROUND_Y {
        player.pos.y = GROUND_Y - player.size.y;
        player.vy = 0.0;
        player.on_ground = true;
    } else {
        player.on_ground = false;
    }

    let max_x = PLAYFIELD_WIDTH - physics.right_margin;
    player.pos.x = player.pos.x.clamp(physics.left_margin, max_x);

    player.invuln_ticks = player.invuln_ticks.saturating_sub(1);

    motion
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::Action;

    fn physics() -> PhysicsTuning {
        PhysicsTuning::default()
    }

    #[test]
    fn test_idle_player_stays_grounded() {
        let mut player = Player::default();
        for _ in 0..100 {
            integrate_player(&mut player, &InputSnapshot::default(), &physics(), 1.0);
            assert!(player.on_ground);
            assert_eq!(player.bottom(), GROUND_Y);
            assert_eq!(player.vy, 0.0);
        }
    }

    #[test]
    fn test_jump_and_land() {
        let mut player = Player::default();
        let jump = InputSnapshot::default().with(Action::Jump);

        let motion = integrate_player(&mut player, &jump, &physics(), 1.0);
        assert!(motion.jumped);
        assert!(!player.on_ground);
        assert!((player.vy - (-11.0 + 0.6)).abs() < 1e-5);

        let mut ticks = 1;
        while !player.on_ground {
            integrate_player(&mut player, &InputSnapshot::default(), &physics(), 1.0);
            assert!(player.bottom() <= GROUND_Y);
            ticks += 1;
            assert!(ticks < 100, "player never landed");
        }
        assert_eq!(player.bottom(), GROUND_Y);
        assert_eq!(player.vy, 0.0);
    }

    #[test]
    fn test_no_double_jump() {
        let mut player = Player::default();
        let jump = InputSnapshot::default().with(Action::Jump);
        integrate_player(&mut player, &jump, &physics(), 1.0);

        // Airborne: jump input must not change velocity beyond gravity
        let mut with_jump = player.clone();
        let mut without_jump = player.clone();
        let motion = integrate_player(&mut with_jump, &jump, &physics(), 1.0);
        integrate_player(&mut without_jump, &InputSnapshot::default(), &physics(), 1.0);
        assert!(!motion.jumped);
        assert_eq!(with_jump.vy, without_jump.vy);
        assert_eq!(with_jump.pos, without_jump.pos);
    }

    #[test]
    fn test_dash_not_retriggered_while_active() {
        let mut player = Player::default();
        let dash = InputSnapshot::default().with(Action::Dash);
        let mut starts = Vec::new();
        for tick in 0..20 {
            if integrate_player(&mut player, &dash, &physics(), 1.0).dash_started {
                starts.push(tick);
            }
        }
        assert_eq!(starts, vec![0, 10]);
    }

    #[test]
    fn test_dash_moves_forward() {
        let mut player = Player::default();
        let start_x = player.pos.x;
        let dash = InputSnapshot::default().with(Action::Dash);
        integrate_player(&mut player, &dash, &physics(), 1.0);
        assert!((player.pos.x - (start_x + 2.6)).abs() < 1e-5);
        assert_eq!(player.dash_ticks, 9);
    }

    #[test]
    fn test_horizontal_clamp() {
        let mut player = Player::default();
        let left = InputSnapshot::default().with(Action::Left);
        for _ in 0..200 {
            integrate_player(&mut player, &left, &physics(), 1.0);
        }
        assert_eq!(player.pos.x, 40.0);

        let right = InputSnapshot::default().with(Action::Right);
        for _ in 0..1000 {
            integrate_player(&mut player, &right, &physics(), 1.0);
        }
        assert_eq!(player.pos.x, PLAYFIELD_WIDTH - 100.0);
    }

    #[test]
    fn test_invulnerability_counts_down() {
        let mut player = Player {
            invuln_ticks: 2,
            ..Player::default()
        };
        integrate_player(&mut player, &InputSnapshot::default(), &physics(), 1.0);
        assert_eq!(player.invuln_ticks, 1);
        integrate_player(&mut player, &InputSnapshot::default(), &physics(), 1.0);
        integrate_player(&mut player, &InputSnapshot::default(), &physics(), 1.0);
        assert_eq!(player.invuln_ticks, 0);
    }

    #[test]
    fn test_zero_step_starts_nothing() {
        let mut player = Player::default();
        let both = InputSnapshot::default().with(Action::Jump).with(Action::Dash);

        let motion = integrate_player(&mut player, &both, &physics(), 0.0);
        assert_eq!(motion, Motion::default());
        assert!(player.on_ground);
        assert_eq!(player.vy, 0.0);
        assert_eq!(player.dash_ticks, 0);
        assert_eq!(player.pos, Player::default().pos);

        // The next real frame still honours the held actions
        let motion = integrate_player(&mut player, &both, &physics(), 1.0);
        assert!(motion.jumped && motion.dash_started);
        assert_eq!(player.dash_ticks, physics().dash_ticks - 1);
    }

    #[test]
    fn test_zero_step_keeps_active_dash() {
        let mut player = Player::default();
        let dash = InputSnapshot::default().with(Action::Dash);
        integrate_player(&mut player, &dash, &physics(), 1.0);
        let left = player.dash_ticks;

        integrate_player(&mut player, &dash, &physics(), 0.0);
        assert_eq!(player.dash_ticks, left);
    }

    #[test]
    fn test_step_scales_motion() {
        let mut slow = Player::default();
        let mut fast = Player::default();
        let right = InputSnapshot::default().with(Action::Right);
        integrate_player(&mut slow, &right, &physics(), 1.0);
        integrate_player(&mut fast, &right, &physics(), 1.5);
        assert!((fast.pos.x - slow.pos.x - 1.3).abs() < 1e-4);
    }
}
