//! Ball movement and collision response
//!
//! Every check runs after the move and is independent of the others, so a
//! ball touching a wall and a brick in the same tick reflects off both. A
//! corner overlap can flip the same axis twice; that is accepted behavior.

use glam::Vec2;

use super::bricks::{BrickField, BrickId};
use super::state::{GameEvent, GameState, Obstacle, Paddle};
use crate::consts::*;

/// Result of one physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// Brick destroyed this tick, if any (at most one)
    pub destroyed: Option<BrickId>,
    /// Ball fell below the bottom edge
    pub missed: bool,
}

/// Ball touches the left or right wall (post-move)
#[inline]
pub fn hits_side_wall(pos: Vec2, radius: f32) -> bool {
    pos.x <= 0.0 || pos.x >= SCREEN_WIDTH - radius
}

/// Ball touches the top edge
#[inline]
pub fn hits_ceiling(pos: Vec2) -> bool {
    pos.y <= 0.0
}

/// Ball center is on the paddle's top face band.
///
/// Only the top face is checked; contact point does not bend the rebound.
pub fn hits_paddle(pos: Vec2, radius: f32, paddle: &Paddle) -> bool {
    let in_band = paddle.y - radius <= pos.y && pos.y <= paddle.y;
    let in_span = paddle.x <= pos.x && pos.x <= paddle.x + paddle.width;
    in_band && in_span
}

/// Ball fell out of the play area
#[inline]
pub fn below_screen(pos: Vec2) -> bool {
    pos.y > SCREEN_HEIGHT
}

/// Find the brick to break, scanning the field once.
///
/// The scan only identifies the brick; removal happens afterwards.
pub fn brick_hit(field: &BrickField, pos: Vec2) -> Option<BrickId> {
    field.first_hit(pos.x, pos.y)
}

/// Advance the ball one tick and resolve every collision.
///
/// Pushes a `Bounce` event per reflection and a `BrickDestroyed` event for
/// the broken brick. Score is credited here.
pub fn step(state: &mut GameState) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    state.ball.pos += state.ball.vel;
    let pos = state.ball.pos;
    let radius = state.ball.radius;

    if hits_side_wall(pos, radius) {
        state.ball.vel.x = -state.ball.vel.x;
        state.push_event(GameEvent::Bounce(Obstacle::SideWall));
    }

    if hits_ceiling(pos) {
        state.ball.vel.y = -state.ball.vel.y;
        state.push_event(GameEvent::Bounce(Obstacle::Ceiling));
    }

    if hits_paddle(pos, radius, &state.paddle) {
        state.ball.vel.y = -state.ball.vel.y;
        state.push_event(GameEvent::Bounce(Obstacle::Paddle));
    }

    if let Some(id) = brick_hit(&state.bricks, pos) {
        state.bricks.remove(id);
        state.ball.vel.y = -state.ball.vel.y;
        state.score += BRICK_SCORE;
        state.push_event(GameEvent::BrickDestroyed { id });
        state.push_event(GameEvent::Bounce(Obstacle::Brick));
        log::debug!("Brick {} destroyed, score {}", id, state.score);
        outcome.destroyed = Some(id);
    }

    outcome.missed = below_screen(pos);
    outcome
}
