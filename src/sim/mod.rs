//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Randomness only through an injected `SignSource`
//! - Stable iteration order (brick list order)
//! - No rendering or platform dependencies

pub mod bricks;
pub mod physics;
pub mod state;
pub mod tick;

pub use bricks::{Brick, BrickField, BrickId};
pub use physics::StepOutcome;
pub use state::{
    Ball, GameEvent, GamePhase, GameState, Obstacle, Paddle, ScriptedSigns, SeededSigns,
    SignSource,
};
pub use tick::{TickInput, move_paddle, tick};
