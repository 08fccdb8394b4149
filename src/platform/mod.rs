//! Platform abstraction layer
//!
//! Seams to the board's peripherals:
//! - Button events (shift register on the device)
//! - Speaker output
//! - Lives indicator (LED strip)
//!
//! plus stand-ins used by the native build and tests.

pub mod leds;
#[cfg(not(target_arch = "wasm32"))]
pub mod native;

use std::collections::VecDeque;

use crate::input::{Key, KeyEvent};

pub use leds::LedRow;
#[cfg(not(target_arch = "wasm32"))]
pub use native::{LogAudio, TerminalKeys, TerminalSession};

/// Non-blocking source of raw key transitions
pub trait InputSource {
    /// Next pending event, or `None` if nothing is queued right now
    fn next_event(&mut self) -> Option<KeyEvent>;
}

/// Fire-and-forget sample playback
pub trait AudioOut {
    /// Start playing unsigned 8-bit mono samples, replacing any current sound
    fn play_samples(&mut self, samples: &[u8], sample_rate: u32);
}

/// Something that shows the remaining lives
pub trait LivesIndicator {
    fn show_lives(&mut self, lives: u8, emphasis: bool);
}

/// In-memory FIFO of key events
#[derive(Debug, Clone, Default)]
pub struct QueuedKeys {
    queue: VecDeque<KeyEvent>,
}

impl QueuedKeys {
    pub fn push(&mut self, event: KeyEvent) {
        self.queue.push_back(event);
    }

    /// Queue a press immediately followed by a release
    pub fn tap(&mut self, key: Key) {
        self.push(KeyEvent::pressed(key));
        self.push(KeyEvent::released(key));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl InputSource for QueuedKeys {
    fn next_event(&mut self) -> Option<KeyEvent> {
        self.queue.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queued_keys_fifo() {
        let mut keys = QueuedKeys::default();
        keys.tap(Key::Pause);
        keys.push(KeyEvent::pressed(Key::Left));
        assert_eq!(keys.len(), 3);

        assert_eq!(keys.next_event(), Some(KeyEvent::pressed(Key::Pause)));
        assert_eq!(keys.next_event(), Some(KeyEvent::released(Key::Pause)));
        assert_eq!(keys.next_event(), Some(KeyEvent::pressed(Key::Left)));
        assert_eq!(keys.next_event(), None);
        assert!(keys.is_empty());
    }
}
