//! The brick field
//!
//! A flat list of live bricks laid out on a rows x columns grid. A brick
//! exists while it is in the list; removal is the only way it dies.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Stable brick identity, unique within one field's lifetime
pub type BrickId = u32;

/// A single brick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: BrickId,
    /// Drawn top-left corner
    pub x: f32,
    pub y: f32,
    /// Drawn size (grid cell minus margins)
    pub width: f32,
    pub height: f32,
    /// Grid row, only used to pick a color band
    pub row: usize,
}

impl Brick {
    /// Color band for this brick (0xRRGGBB)
    pub fn color(&self) -> u32 {
        BRICK_PALETTE[self.row % BRICK_PALETTE.len()]
    }

    /// Whether `(px, py)` is strictly inside the brick's cell footprint.
    ///
    /// The footprint is a full grid cell anchored at the drawn corner, so it
    /// overlaps the next cell's margin by one pixel.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        let cell_w = self.width + 2.0 * BRICK_MARGIN;
        let cell_h = self.height + 2.0 * BRICK_MARGIN;
        self.x < px && px < self.x + cell_w && self.y < py && py < self.y + cell_h
    }
}

/// All live bricks of the current level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrickField {
    bricks: Vec<Brick>,
    next_id: BrickId,
}

impl BrickField {
    /// Replace the field with a full `rows x columns` grid
    pub fn create(&mut self, rows: usize, columns: usize) {
        self.bricks.clear();
        self.bricks.reserve(rows * columns);

        let cell_width = SCREEN_WIDTH / columns.max(1) as f32;
        for row in 0..rows {
            for col in 0..columns {
                let id = self.next_id;
                self.next_id += 1;
                self.bricks.push(Brick {
                    id,
                    x: col as f32 * cell_width + BRICK_MARGIN,
                    y: row as f32 * BRICK_HEIGHT + BRICK_MARGIN,
                    width: cell_width - 2.0 * BRICK_MARGIN,
                    height: BRICK_HEIGHT - 2.0 * BRICK_MARGIN,
                    row,
                });
            }
        }
        log::debug!("Built {}x{} field ({} bricks)", rows, columns, self.bricks.len());
    }

    /// Remove a brick by id. Unknown ids are ignored.
    pub fn remove(&mut self, id: BrickId) -> Option<Brick> {
        let index = self.bricks.iter().position(|b| b.id == id)?;
        Some(self.bricks.remove(index))
    }

    /// First brick in list order whose footprint contains the point
    pub fn first_hit(&self, px: f32, py: f32) -> Option<BrickId> {
        self.bricks.iter().find(|b| b.contains(px, py)).map(|b| b.id)
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    /// Keep only the bricks matching `keep`
    #[cfg(test)]
    pub fn retain(&mut self, keep: impl FnMut(&Brick) -> bool) {
        self.bricks.retain(keep);
    }
}
