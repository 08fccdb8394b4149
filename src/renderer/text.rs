//! Text-mode rasterizer for the native build
//!
//! Each character cell covers 2x4 pixels of the 160x128 screen.

use std::io::{self, Write};

use crossterm::{cursor, queue, style::Print, terminal};

use super::Surface;
use crate::consts::*;
use crate::sim::{Brick, BrickId};

/// Pixels per character cell
pub const CELL_W: f32 = 2.0;
pub const CELL_H: f32 = 4.0;
pub const COLS: usize = (SCREEN_WIDTH / CELL_W) as usize;
pub const ROWS: usize = (SCREEN_HEIGHT / CELL_H) as usize;

/// Where the status label sits (pixels)
const STATUS_X: f32 = 30.0;
const STATUS_Y: f32 = 64.0;

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

/// Surface that draws characters into a writer on every present
pub struct TextSurface<W: Write> {
    out: W,
    paddle: Rect,
    ball: (f32, f32),
    bricks: Vec<(BrickId, Rect, char)>,
    status: Option<String>,
    frame: String,
    frames: u64,
}

impl<W: Write> TextSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            paddle: Rect {
                x: (SCREEN_WIDTH - PADDLE_WIDTH) / 2.0,
                y: PADDLE_Y,
                w: PADDLE_WIDTH,
                h: PADDLE_HEIGHT,
            },
            ball: (SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
            bricks: Vec::new(),
            status: None,
            frame: String::new(),
            frames: 0,
        }
    }

    /// Last rendered frame
    pub fn frame(&self) -> &str {
        &self.frame
    }

    /// Number of frames presented
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn brick_count(&self) -> usize {
        self.bricks.len()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Redraw every row in place, inside one synchronized update
    fn flush_frame(&mut self) -> io::Result<()> {
        queue!(self.out, terminal::BeginSynchronizedUpdate)?;
        for (row, line) in self.frame.lines().enumerate() {
            queue!(self.out, cursor::MoveTo(0, row as u16), Print(line))?;
        }
        queue!(self.out, terminal::EndSynchronizedUpdate)?;
        self.out.flush()
    }

    fn rasterize(&self) -> String {
        let mut grid = vec![[' '; COLS]; ROWS];

        for (_, rect, glyph) in &self.bricks {
            fill(&mut grid, *rect, *glyph);
        }
        fill(&mut grid, self.paddle, '=');

        let (bx, by) = self.ball;
        if let Some((col, row)) = cell_at(bx, by) {
            grid[row][col] = 'o';
        }

        if let Some(text) = &self.status {
            if let Some((col, row)) = cell_at(STATUS_X, STATUS_Y) {
                for (slot, ch) in grid[row][col..].iter_mut().zip(text.chars()) {
                    *slot = ch;
                }
            }
        }

        let mut frame = String::with_capacity((COLS + 1) * ROWS);
        for row in &grid {
            frame.extend(row.iter());
            frame.push('\n');
        }
        frame
    }
}

/// Character cell containing a pixel, if on screen
fn cell_at(x: f32, y: f32) -> Option<(usize, usize)> {
    if x < 0.0 || y < 0.0 {
        return None;
    }
    let col = (x / CELL_W) as usize;
    let row = (y / CELL_H) as usize;
    (col < COLS && row < ROWS).then_some((col, row))
}

fn fill(grid: &mut [[char; COLS]], rect: Rect, glyph: char) {
    let col_start = (rect.x / CELL_W).max(0.0) as usize;
    let col_end = (((rect.x + rect.w) / CELL_W).ceil() as usize).min(COLS);
    let row_start = (rect.y / CELL_H).max(0.0) as usize;
    let row_end = (((rect.y + rect.h) / CELL_H).ceil() as usize).min(ROWS);
    for row in grid.iter_mut().take(row_end).skip(row_start) {
        for cell in row.iter_mut().take(col_end).skip(col_start) {
            *cell = glyph;
        }
    }
}

/// Glyph for a brick's color band
fn brick_glyph(color: u32) -> char {
    match color {
        0xFF0000 => '#',
        0x00FF00 => '%',
        _ => '+',
    }
}

impl<W: Write> Surface for TextSurface<W> {
    fn move_paddle(&mut self, x: f32, y: f32) {
        self.paddle.x = x;
        self.paddle.y = y;
    }

    fn move_ball(&mut self, x: f32, y: f32) {
        self.ball = (x, y);
    }

    fn add_brick(&mut self, brick: &Brick) {
        let rect = Rect {
            x: brick.x,
            y: brick.y,
            w: brick.width,
            h: brick.height,
        };
        self.bricks.push((brick.id, rect, brick_glyph(brick.color())));
    }

    fn remove_brick(&mut self, id: BrickId) {
        self.bricks.retain(|(b, _, _)| *b != id);
    }

    fn clear_bricks(&mut self) {
        self.bricks.clear();
    }

    fn set_status(&mut self, text: Option<&str>) {
        self.status = text.map(str::to_owned);
    }

    fn present(&mut self) {
        self.frame = self.rasterize();
        self.frames += 1;
        if let Err(e) = self.flush_frame() {
            log::warn!("Frame write failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BrickField;

    fn lines(surface: &TextSurface<Vec<u8>>) -> Vec<String> {
        surface.frame().lines().map(str::to_owned).collect()
    }

    #[test]
    fn test_frame_dimensions() {
        let mut surface = TextSurface::new(Vec::new());
        surface.present();
        let lines = lines(&surface);
        assert_eq!(lines.len(), ROWS);
        assert!(lines.iter().all(|l| l.chars().count() == COLS));
        assert_eq!(surface.frames(), 1);
    }

    #[test]
    fn test_draws_shapes() {
        let mut surface = TextSurface::new(Vec::new());
        surface.move_ball(80.0, 64.0);
        surface.move_paddle(0.0, PADDLE_Y);
        surface.present();
        let lines = lines(&surface);

        assert_eq!(lines[16].chars().nth(40), Some('o'));
        let paddle_row = &lines[(PADDLE_Y / CELL_H) as usize];
        assert!(paddle_row.starts_with(&"=".repeat(15)));
    }

    #[test]
    fn test_bricks_added_and_removed() {
        let mut field = BrickField::default();
        field.create(BRICK_ROWS, BRICK_COLUMNS);
        let mut surface = TextSurface::new(Vec::new());
        for brick in field.iter() {
            surface.add_brick(brick);
        }
        assert_eq!(surface.brick_count(), 24);
        surface.present();
        assert!(lines(&surface)[0].contains('#'));

        surface.remove_brick(0);
        assert_eq!(surface.brick_count(), 23);
        surface.clear_bricks();
        assert_eq!(surface.brick_count(), 0);
    }

    #[test]
    fn test_status_overlay() {
        let mut surface = TextSurface::new(Vec::new());
        surface.set_status(Some("Paused"));
        surface.present();
        assert!(lines(&surface)[16].contains("Paused"));
        assert_eq!(surface.status(), Some("Paused"));

        surface.set_status(None);
        surface.present();
        assert!(!surface.frame().contains("Paused"));
    }

    #[test]
    fn test_present_writes_rows_in_place() {
        let mut surface = TextSurface::new(Vec::new());
        surface.set_status(Some("Paused"));
        surface.present();
        let out = String::from_utf8(surface.into_inner()).unwrap();

        let mut first_row = Vec::new();
        queue!(first_row, cursor::MoveTo(0, 0)).unwrap();
        let mut status_row = Vec::new();
        queue!(status_row, cursor::MoveTo(0, 16)).unwrap();

        assert!(out.contains(std::str::from_utf8(&first_row).unwrap()));
        let status_at = out.find(std::str::from_utf8(&status_row).unwrap()).unwrap();
        assert!(out[status_at..].contains("Paused"));
        assert!(!out.contains('\n'));
    }
}
