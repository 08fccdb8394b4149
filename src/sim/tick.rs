//! Fixed timestep simulation tick
//!
//! Advances the session by one step: phase transitions on one-shot input,
//! then (while playing) paddle, ball physics, and terminal checks in that
//! order.

use super::physics;
use super::state::{GameEvent, GamePhase, GameState, SignSource};
use crate::consts::*;
use crate::input::HeldKeys;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Directions currently held
    pub held: HeldKeys,
    /// Pause toggle edge
    pub pause: bool,
    /// Confirm/restart edge
    pub confirm: bool,
}

/// Apply held directions to the paddle. Right first, then left.
pub fn move_paddle(state: &mut GameState, held: HeldKeys) {
    if held.right() {
        state.paddle.move_right(PADDLE_SPEED);
    }
    if held.left() {
        state.paddle.move_left(PADDLE_SPEED);
    }
}

/// Advance the session by one step
pub fn tick(state: &mut GameState, input: &TickInput, signs: &mut dyn SignSource) {
    match state.phase {
        GamePhase::AttractWait => {
            if input.confirm {
                start_play(state, signs);
            }
        }

        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
                state.push_event(GameEvent::Paused);
                log::info!("Paused");
                return;
            }
            play(state, input);
        }

        GamePhase::Paused => {
            // Resuming consumes the step so a pause round-trip is a no-op
            if input.pause {
                state.phase = GamePhase::Playing;
                state.push_event(GameEvent::Resumed);
                log::info!("Resumed");
            }
        }

        GamePhase::BallLost => {
            state.serve(signs);
            resume(state, input);
        }

        GamePhase::LevelCleared => {
            state.build_field();
            state.serve(signs);
            resume(state, input);
        }

        GamePhase::GameOver => {
            if input.confirm {
                *state = GameState::new();
                state.push_event(GameEvent::Reset);
                log::info!("Back to title");
            }
        }
    }
}

/// Begin a play-through from the title screen
fn start_play(state: &mut GameState, signs: &mut dyn SignSource) {
    *state = GameState::new();
    state.push_event(GameEvent::Started);
    state.build_field();
    state.serve(signs);
    state.phase = GamePhase::Playing;
    log::info!("Game started");
}

/// Leave a transient phase; a pause edge seen meanwhile lands in `Paused`
fn resume(state: &mut GameState, input: &TickInput) {
    if input.pause {
        state.phase = GamePhase::Paused;
        state.push_event(GameEvent::Paused);
        log::info!("Paused");
    } else {
        state.phase = GamePhase::Playing;
    }
}

/// One live gameplay tick
fn play(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    move_paddle(state, input.held);

    let outcome = physics::step(state);

    if outcome.missed {
        state.lives = state.lives.saturating_sub(1);
        state.push_event(GameEvent::BallLost { lives: state.lives });
        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            state.push_event(GameEvent::GameOver);
            log::info!(
                "Game over: score {}, level {}, {} ticks",
                state.score,
                state.level,
                state.time_ticks
            );
        } else {
            state.phase = GamePhase::BallLost;
            log::info!("Ball lost, {} lives left", state.lives);
        }
        return;
    }

    if state.bricks.is_empty() {
        state.level += 1;
        state.ball.scale_speed(1.0 + BALL_SPEED_INCREMENT);
        state.phase = GamePhase::LevelCleared;
        state.push_event(GameEvent::LevelCleared { level: state.level });
        log::info!("Level cleared, now level {} (score {})", state.level, state.score);
    }
}
