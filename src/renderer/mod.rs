//! Drawing surface
//!
//! The game positions a fixed set of shapes (paddle, ball, bricks, status
//! text) and asks for a frame explicitly. Rasterizing is the surface's job.

#[cfg(not(target_arch = "wasm32"))]
pub mod text;

use crate::sim::{Brick, BrickId};

#[cfg(not(target_arch = "wasm32"))]
pub use text::TextSurface;

/// A retained-mode display with manual refresh
pub trait Surface {
    /// Paddle top-left corner
    fn move_paddle(&mut self, x: f32, y: f32);
    /// Ball center
    fn move_ball(&mut self, x: f32, y: f32);
    fn add_brick(&mut self, brick: &Brick);
    fn remove_brick(&mut self, id: BrickId);
    fn clear_bricks(&mut self);
    /// Show a status line, or hide it with `None`
    fn set_status(&mut self, text: Option<&str>);
    /// Push the current shapes to the screen
    fn present(&mut self);
}
