//! Collision & motion evaluator
//!
//! Runs once per sim tick while Playing: advances every falling object by
//! the current fall speed, then tests it against the player and the bottom
//! bound. Speed tracks the live fall speed each tick, not a value
//! snapshotted at spawn. The overlap test runs before the exit-bound test
//! so an object straddling the bottom boundary is still fatal, and
//! evaluation halts as soon as a collision ends the run.

use super::registry::Visit;
use super::state::{GamePhase, GameState};

pub fn advance_falling(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let fall_speed = state.fall_speed;
    let bottom = state.height;
    let player_pos = state.player.pos;
    let mut fatal = false;

    state.objects.visit_mut(|obj| {
        obj.pos.y += fall_speed;
        if obj.contains(player_pos) {
            fatal = true;
            Visit::RemoveAndHalt
        } else if obj.pos.y > bottom {
            // Off-screen escape, no penalty
            Visit::Remove
        } else {
            Visit::Keep
        }
    });

    if fatal {
        state.report_fatal_collision();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{ControlMode, GameEvent};
    use glam::Vec2;

    fn playing_state() -> GameState {
        let mut state = GameState::new(3, 800.0, 600.0, ControlMode::Keys);
        state.start();
        state.drain_events();
        state
    }

    #[test]
    fn test_objects_fall_by_current_speed() {
        let mut state = playing_state();
        state.objects.insert(Vec2::new(100.0, 0.0));

        advance_falling(&mut state);
        let y = state.objects.iter().next().unwrap().pos.y;
        assert_eq!(y, BASE_FALL_SPEED);

        // Speed is read live, not snapshotted at spawn
        state.fall_speed = 9.0;
        advance_falling(&mut state);
        let y = state.objects.iter().next().unwrap().pos.y;
        assert_eq!(y, BASE_FALL_SPEED + 9.0);
    }

    #[test]
    fn test_exit_bound_removes_without_penalty() {
        let mut state = playing_state();
        state.objects.insert(Vec2::new(100.0, 599.0));

        advance_falling(&mut state);
        assert!(state.objects.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_overlap_is_fatal_and_freezes_time() {
        let mut state = playing_state();
        state.elapsed_secs = 8;
        // Directly above the player, one tick from overlap
        let player = state.player.pos;
        state
            .objects
            .insert(Vec2::new(player.x, player.y - OBJECT_HALF_HEIGHT - BASE_FALL_SPEED));

        advance_falling(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.elapsed_secs, 8);
        assert!(state.objects.is_empty());
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::GameOver { final_secs: 8 },
                GameEvent::RestartAvailable
            ]
        );
    }

    #[test]
    fn test_overlap_takes_precedence_over_exit() {
        let mut state = playing_state();
        // Park the player low enough that an object can straddle the
        // bottom bound and still contain the player position
        state.player.pos.y = state.height - 10.0;
        let player = state.player.pos;
        state
            .objects
            .insert(Vec2::new(player.x, state.height - BASE_FALL_SPEED + 1.0));

        advance_falling(&mut state);
        // y now exceeds the bottom bound, but the overlap wins
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_halts_after_fatal_collision() {
        let mut state = playing_state();
        let player = state.player.pos;
        state
            .objects
            .insert(Vec2::new(player.x, player.y - BASE_FALL_SPEED));
        state.objects.insert(Vec2::new(700.0, 100.0));

        advance_falling(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        // The second object was never advanced this tick
        let survivor = state.objects.iter().next().unwrap();
        assert_eq!(survivor.pos.y, 100.0);
    }

    #[test]
    fn test_no_motion_outside_playing() {
        let mut state = GameState::new(3, 800.0, 600.0, ControlMode::Keys);
        state.objects.insert(Vec2::new(100.0, 50.0));

        advance_falling(&mut state);
        assert_eq!(state.objects.iter().next().unwrap().pos.y, 50.0);
    }
}
