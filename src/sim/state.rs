//! Game state and core simulation types
//!
//! One `GameState` owns everything a play-through mutates. It is replaced
//! wholesale when a new play-through begins.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bricks::{BrickField, BrickId};
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    AttractWait,
    /// Active gameplay
    Playing,
    /// Ticking suspended, only pause-toggle observed
    Paused,
    /// Ball fell out; lives already decremented, re-serve on next step
    BallLost,
    /// Out of lives, waiting for confirm
    GameOver,
    /// Field emptied; rebuild and re-serve on next step
    LevelCleared,
}

impl GamePhase {
    /// Phases that want the player's attention on the lives indicator
    pub fn needs_attention(self) -> bool {
        matches!(self, GamePhase::Paused | GamePhase::BallLost | GamePhase::GameOver)
    }
}

/// What bounced the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obstacle {
    SideWall,
    Ceiling,
    Paddle,
    Brick,
}

/// Side effects produced by a tick, drained by the frame driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A reflection happened (collision cue)
    Bounce(Obstacle),
    /// A brick was removed from the field
    BrickDestroyed { id: BrickId },
    /// A fresh brick grid was laid out
    FieldBuilt,
    /// Ball placed at center with a new direction
    Served,
    /// Play-through started from the title screen
    Started,
    Paused,
    Resumed,
    BallLost { lives: u8 },
    LevelCleared { level: u32 },
    GameOver,
    /// Back to the title screen with fresh bookkeeping
    Reset,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Self::center(),
            vel: Vec2::new(BALL_START_SPEED, -BALL_START_SPEED),
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    fn center() -> Vec2 {
        Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0)
    }

    /// Re-center and head upward, horizontal sign from `sign`.
    ///
    /// Speed magnitudes are kept; only the direction changes.
    pub fn serve(&mut self, sign: f32) {
        self.pos = Self::center();
        self.vel = Vec2::new(self.vel.x.abs() * sign.signum(), -self.vel.y.abs());
    }

    /// Scale both velocity components (level-up)
    pub fn scale_speed(&mut self, factor: f32) {
        self.vel *= factor;
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (SCREEN_WIDTH - PADDLE_WIDTH) / 2.0,
            y: PADDLE_Y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }
}

impl Paddle {
    /// Furthest the left edge may travel
    #[inline]
    pub fn max_x(&self) -> f32 {
        SCREEN_WIDTH - self.width
    }

    pub fn move_right(&mut self, step: f32) {
        self.x = (self.x + step).min(self.max_x());
    }

    pub fn move_left(&mut self, step: f32) {
        self.x = (self.x - step).max(0.0);
    }
}

/// Source of the random horizontal serve direction
pub trait SignSource {
    /// Returns `1.0` or `-1.0`
    fn next_sign(&mut self) -> f32;
}

/// Seeded coin flips for real play
#[derive(Debug, Clone)]
pub struct SeededSigns {
    rng: Pcg32,
}

impl SeededSigns {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl SignSource for SeededSigns {
    fn next_sign(&mut self) -> f32 {
        if self.rng.random_bool(0.5) { 1.0 } else { -1.0 }
    }
}

/// Replays a fixed cycle of signs (tests, attract demos)
#[derive(Debug, Clone)]
pub struct ScriptedSigns {
    signs: Vec<f32>,
    next: usize,
}

impl ScriptedSigns {
    pub fn new(signs: &[f32]) -> Self {
        Self {
            signs: signs.to_vec(),
            next: 0,
        }
    }
}

impl SignSource for ScriptedSigns {
    fn next_sign(&mut self) -> f32 {
        if self.signs.is_empty() {
            return 1.0;
        }
        let sign = self.signs[self.next % self.signs.len()];
        self.next += 1;
        sign
    }
}

/// Complete game state for one play-through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Player lives
    pub lives: u8,
    /// Score
    pub score: u32,
    /// Current level (1-based)
    pub level: u32,
    /// Simulation tick counter (Playing ticks only)
    pub time_ticks: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickField,
    /// Pending side effects for the driver
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh state on the title screen
    pub fn new() -> Self {
        Self {
            phase: GamePhase::AttractWait,
            lives: START_LIVES,
            score: 0,
            level: 1,
            time_ticks: 0,
            ball: Ball::default(),
            paddle: Paddle::default(),
            bricks: BrickField::default(),
            events: Vec::new(),
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take pending events in production order
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Serve the ball from the center
    pub fn serve(&mut self, signs: &mut dyn SignSource) {
        self.ball.serve(signs.next_sign());
        self.push_event(GameEvent::Served);
        log::debug!("Serve: vel=({:.2}, {:.2})", self.ball.vel.x, self.ball.vel.y);
    }

    /// Lay out a full grid for the current level
    pub fn build_field(&mut self) {
        self.bricks.create(BRICK_ROWS, BRICK_COLUMNS);
        self.push_event(GameEvent::FieldBuilt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new();
        assert_eq!(state.phase, GamePhase::AttractWait);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(state.bricks.is_empty());
        assert_eq!(state.paddle.x, 65.0);
        assert_eq!(state.paddle.y, 118.0);
    }

    #[test]
    fn test_serve_keeps_speed() {
        let mut ball = Ball::default();
        ball.pos = Vec2::new(10.0, 100.0);
        ball.vel = Vec2::new(1.69, 1.69);

        ball.serve(-1.0);
        assert_eq!(ball.pos, Vec2::new(80.0, 64.0));
        assert_eq!(ball.vel, Vec2::new(-1.69, -1.69));

        ball.serve(1.0);
        assert_eq!(ball.vel, Vec2::new(1.69, -1.69));
    }

    #[test]
    fn test_paddle_clamps() {
        let mut paddle = Paddle::default();
        paddle.x = 1.0;
        paddle.move_left(PADDLE_SPEED);
        assert_eq!(paddle.x, 0.0);

        paddle.x = 128.0;
        paddle.move_right(PADDLE_SPEED);
        assert_eq!(paddle.x, 130.0);
    }

    #[test]
    fn test_scripted_signs_cycle() {
        let mut signs = ScriptedSigns::new(&[1.0, -1.0]);
        assert_eq!(signs.next_sign(), 1.0);
        assert_eq!(signs.next_sign(), -1.0);
        assert_eq!(signs.next_sign(), 1.0);

        let mut empty = ScriptedSigns::new(&[]);
        assert_eq!(empty.next_sign(), 1.0);
    }

    #[test]
    fn test_state_json_round_trip() {
        let mut state = GameState::new();
        state.phase = GamePhase::Playing;
        state.build_field();
        state.bricks.remove(3);
        state.score = 10;
        state.lives = 2;
        state.ball.pos = Vec2::new(42.5, 77.0);
        state.ball.vel = Vec2::new(-1.3, 1.3);
        state.paddle.x = 12.0;

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.phase, GamePhase::Playing);
        assert_eq!((restored.lives, restored.score, restored.level), (2, 10, 1));
        assert_eq!(restored.ball, state.ball);
        assert_eq!(restored.paddle, state.paddle);
        assert!(restored.bricks.iter().eq(state.bricks.iter()));
        // Pending events are not part of a snapshot
        assert!(restored.events.is_empty());
    }

    #[test]
    fn test_seeded_signs_are_deterministic() {
        let mut a = SeededSigns::new(42);
        let mut b = SeededSigns::new(42);
        for _ in 0..32 {
            let sign = a.next_sign();
            assert!(sign == 1.0 || sign == -1.0);
            assert_eq!(sign, b.next_sign());
        }
    }
}
