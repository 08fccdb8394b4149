//! Badge Breakout - brick breaking on a 160x128 handheld
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, session phases)
//! - `input`: Raw key transitions to held keys and one-shot actions
//! - `game`: Frame driver tying the sim to the peripherals
//! - `renderer`: Drawing surface seam and a text rasterizer
//! - `platform`: Input, audio and LED peripheral seams
//! - `audio`: Beep synthesis

pub mod audio;
pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Display dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 160.0;
    pub const SCREEN_HEIGHT: f32 = 128.0;

    /// Paddle defaults - rides 10px above the bottom edge
    pub const PADDLE_WIDTH: f32 = 30.0;
    pub const PADDLE_HEIGHT: f32 = 5.0;
    pub const PADDLE_Y: f32 = SCREEN_HEIGHT - 10.0;
    /// Paddle travel per tick while a direction is held
    pub const PADDLE_SPEED: f32 = 3.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 3.0;
    /// Per-axis speed at level 1 (pixels per tick)
    pub const BALL_START_SPEED: f32 = 1.0;
    /// Both velocity components grow by this fraction on every field clear
    pub const BALL_SPEED_INCREMENT: f32 = 0.3;

    /// Brick grid
    pub const BRICK_ROWS: usize = 3;
    pub const BRICK_COLUMNS: usize = 8;
    pub const BRICK_WIDTH: f32 = SCREEN_WIDTH / BRICK_COLUMNS as f32;
    pub const BRICK_HEIGHT: f32 = 10.0;
    /// Inset on each side between a grid cell and the drawn brick
    pub const BRICK_MARGIN: f32 = 1.0;
    /// Row color bands (0xRRGGBB), picked by `row % len`
    pub const BRICK_PALETTE: [u32; 3] = [0xFF0000, 0x00FF00, 0x0000FF];

    /// Bookkeeping
    pub const BRICK_SCORE: u32 = 10;
    pub const START_LIVES: u8 = 3;
}
