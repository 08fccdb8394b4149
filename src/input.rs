//! Button input mapping
//!
//! Turns raw key transitions into a held-keys set plus one-shot actions.
//! The mapper drains every pending event before the frame's game logic runs,
//! so a press and release inside one frame is still seen.

use crate::platform::InputSource;

/// The four button roles, indexed as the shift register reports them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A: start, restart
    Confirm,
    /// B: pause toggle
    Pause,
    /// SELECT: move left
    Left,
    /// START: move right
    Right,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::Confirm, Key::Pause, Key::Left, Key::Right];

    /// Map a raw key number (0..=3) to its role
    pub fn from_index(index: u8) -> Option<Key> {
        Self::ALL.get(index as usize).copied()
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Pressed,
    Released,
}

/// One raw transition from the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Raw key number as reported by the hardware
    pub key_number: u8,
    pub transition: Transition,
}

impl KeyEvent {
    pub fn pressed(key: Key) -> Self {
        Self {
            key_number: key as u8,
            transition: Transition::Pressed,
        }
    }

    pub fn released(key: Key) -> Self {
        Self {
            key_number: key as u8,
            transition: Transition::Released,
        }
    }
}

/// Set of keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys(u8);

impl HeldKeys {
    pub fn contains(self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    /// Copy with `key` added
    pub fn with(self, key: Key) -> Self {
        Self(self.0 | key.bit())
    }

    fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    fn remove(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    #[inline]
    pub fn left(self) -> bool {
        self.contains(Key::Left)
    }

    #[inline]
    pub fn right(self) -> bool {
        self.contains(Key::Right)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Edge-triggered actions raised during one drain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actions {
    /// Confirm was released at least once
    pub confirm: bool,
    /// Pause was released an odd number of times
    pub pause: bool,
}

/// Tracks held keys across frames
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    held: HeldKeys,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> HeldKeys {
        self.held
    }

    /// Apply one transition, returning the one-shot action it raises
    pub fn apply(&mut self, event: KeyEvent) -> Option<Key> {
        let Some(key) = Key::from_index(event.key_number) else {
            log::warn!("Ignoring unknown key number {}", event.key_number);
            return None;
        };

        match event.transition {
            Transition::Pressed => {
                self.held.insert(key);
                None
            }
            Transition::Released => {
                self.held.remove(key);
                matches!(key, Key::Confirm | Key::Pause).then_some(key)
            }
        }
    }

    /// Drain every pending event from `source`
    pub fn drain(&mut self, source: &mut dyn InputSource) -> Actions {
        let mut actions = Actions::default();
        while let Some(event) = source.next_event() {
            match self.apply(event) {
                Some(Key::Confirm) => actions.confirm = true,
                Some(Key::Pause) => actions.pause = !actions.pause,
                _ => {}
            }
        }
        actions
    }
}
