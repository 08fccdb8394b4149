//! Lives shown on a row of RGB LEDs
//!
//! One LED per remaining life. Emphasis (paused, ball lost, game over)
//! switches the lit color so the row catches the eye.

use super::LivesIndicator;

/// Number of LEDs on the strip
pub const LED_COUNT: usize = 5;

/// Lit color in normal play (0xRRGGBB)
pub const LIFE_COLOR: u32 = 0x00_20_00;
/// Lit color while the game wants attention
pub const ATTENTION_COLOR: u32 = 0x40_10_00;
pub const OFF: u32 = 0x00_00_00;

/// Frame buffer for the LED strip
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedRow {
    pixels: [u32; LED_COUNT],
}

impl LedRow {
    pub fn pixels(&self) -> &[u32; LED_COUNT] {
        &self.pixels
    }

    /// Number of LEDs currently lit
    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != OFF).count()
    }
}

impl LivesIndicator for LedRow {
    fn show_lives(&mut self, lives: u8, emphasis: bool) {
        let color = if emphasis { ATTENTION_COLOR } else { LIFE_COLOR };
        let lit = (lives as usize).min(LED_COUNT);
        for (i, pixel) in self.pixels.iter_mut().enumerate() {
            *pixel = if i < lit { color } else { OFF };
        }
        log::debug!("Lives LEDs: {:06X?}", self.pixels);
    }
}
