//! Fixed timestep simulation tick
//!
//! One call advances the session by one tick: transition inputs first,
//! then player motion, then the motion/collision evaluator, then this
//! tick's timer callbacks (spawn, survival time, level-advance offer).

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

use super::motion;
use super::state::{ControlMode, GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start action (FIGHT button); one-shot
    pub start: bool,
    /// Restart action; one-shot, valid from GameOver
    pub restart: bool,
    /// Accept a pending level-advance offer; one-shot
    pub advance_level: bool,
    /// Direction keys currently held (Keys mode)
    pub left_held: bool,
    pub right_held: bool,
    /// Latest pointer position (Pointer mode)
    pub pointer_x: Option<f32>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Transition inputs first; invalid ones are silent no-ops
    if input.start {
        state.start();
    }
    if input.restart {
        state.restart();
    }
    if input.advance_level {
        state.accept_level_advance();
    }

    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    // Player motion; the mode is fixed for the session
    match state.control_mode {
        ControlMode::Keys => {
            if input.left_held {
                state.player.step_left(state.width);
            }
            if input.right_held {
                state.player.step_right(state.width);
            }
        }
        ControlMode::Pointer => {
            if let Some(pointer_x) = input.pointer_x {
                state.player.follow_pointer(pointer_x, state.width);
            }
        }
    }

    // Motion and collision run before this tick's timer callbacks
    motion::advance_falling(state);
    if state.phase != GamePhase::Playing {
        return;
    }

    for id in state.timers.tick() {
        if id == state.spawn_timer {
            spawn_falling_object(state);
        } else if id == state.survival_timer {
            state.elapsed_secs += 1;
            let secs = state.elapsed_secs;
            state.push_event(GameEvent::ScoreUpdate(secs));
        } else if id == state.offer_timer {
            state.offer_level_advance();
        }
    }
}

/// Create one falling object at a uniformly random horizontal position
/// within the playable band, at the top edge
fn spawn_falling_object(state: &mut GameState) {
    let x = state
        .rng
        .random_range(EDGE_MARGIN..=state.width - EDGE_MARGIN);
    state.objects.insert(Vec2::new(x, 0.0));
}
