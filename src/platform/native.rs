//! Native stand-ins for the board peripherals
//!
//! Buttons come from the terminal's key events, the speaker is a log line.
//! Terminals that report key releases give true held keys; elsewhere a
//! direction latches until the other one or a stop key is pressed.

use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{cursor, execute, terminal};

use super::{AudioOut, InputSource};
use crate::input::{Key, KeyEvent};

/// Raw mode plus alternate screen, restored on drop
pub struct TerminalSession {
    out: Stdout,
    releases: bool,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            terminal::Clear(terminal::ClearType::All)
        )?;

        let releases = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if releases {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::info!("Terminal key releases reported: {}", releases);
        Ok(Self { out, releases })
    }

    /// Whether the terminal sends key release events
    pub fn releases_reported(&self) -> bool {
        self.releases
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.releases {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            self.out,
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Key events polled from the terminal without blocking
#[derive(Debug, Default)]
pub struct TerminalKeys {
    releases: bool,
    latched: Option<Key>,
    pending: VecDeque<KeyEvent>,
    quit: bool,
}

impl TerminalKeys {
    pub fn new(releases_reported: bool) -> Self {
        Self {
            releases: releases_reported,
            ..Self::default()
        }
    }

    /// Quit key seen (q, Esc, Ctrl-C)
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Turn one terminal key event into board key transitions
    pub fn translate(&mut self, key: event::KeyEvent) {
        let is_press = matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat);
        let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if is_press && (ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)) {
            self.quit = true;
            return;
        }

        if !self.releases {
            if is_press {
                self.latch_press(key.code);
            }
            return;
        }

        let Some(button) = button_for(key.code) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press => self.pending.push_back(KeyEvent::pressed(button)),
            KeyEventKind::Release => self.pending.push_back(KeyEvent::released(button)),
            KeyEventKind::Repeat => {}
        }
    }

    /// Press-only terminals: buttons tap, directions latch
    fn latch_press(&mut self, code: KeyCode) {
        if matches!(code, KeyCode::Down | KeyCode::Char('j')) {
            self.release_latched();
            return;
        }
        match button_for(code) {
            Some(button @ (Key::Confirm | Key::Pause)) => {
                self.pending.push_back(KeyEvent::pressed(button));
                self.pending.push_back(KeyEvent::released(button));
            }
            Some(direction) => {
                if self.latched != Some(direction) {
                    self.release_latched();
                    self.pending.push_back(KeyEvent::pressed(direction));
                    self.latched = Some(direction);
                }
            }
            None => {}
        }
    }

    fn release_latched(&mut self) {
        if let Some(previous) = self.latched.take() {
            self.pending.push_back(KeyEvent::released(previous));
        }
    }

    fn poll_terminal(&mut self) -> io::Result<()> {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                self.translate(key);
            }
        }
        Ok(())
    }
}

/// Board button bound to a terminal key
fn button_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Enter | KeyCode::Char(' ') => {
            Some(Key::Confirm)
        }
        KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Char('p') => Some(Key::Pause),
        KeyCode::Left | KeyCode::Char('h') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Key::Right),
        _ => None,
    }
}

impl InputSource for TerminalKeys {
    fn next_event(&mut self) -> Option<KeyEvent> {
        if self.pending.is_empty() {
            if let Err(e) = self.poll_terminal() {
                log::warn!("Terminal input failed: {}", e);
            }
        }
        self.pending.pop_front()
    }
}

/// Speaker stand-in that logs each sound
#[derive(Debug, Default)]
pub struct LogAudio {
    /// Sounds played so far
    pub played: u64,
}

impl AudioOut for LogAudio {
    fn play_samples(&mut self, samples: &[u8], sample_rate: u32) {
        self.played += 1;
        log::debug!("Beep: {} samples @ {} Hz", samples.len(), sample_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> event::KeyEvent {
        event::KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    fn drained(keys: &mut TerminalKeys) -> Vec<KeyEvent> {
        keys.pending.drain(..).collect()
    }

    #[test]
    fn test_press_and_release_map_to_transitions() {
        let mut keys = TerminalKeys::new(true);
        keys.translate(key(KeyCode::Left, KeyEventKind::Press));
        keys.translate(key(KeyCode::Left, KeyEventKind::Repeat));
        keys.translate(key(KeyCode::Left, KeyEventKind::Release));
        keys.translate(key(KeyCode::Char('a'), KeyEventKind::Press));
        keys.translate(key(KeyCode::Char('a'), KeyEventKind::Release));
        assert_eq!(
            drained(&mut keys),
            vec![
                KeyEvent::pressed(Key::Left),
                KeyEvent::released(Key::Left),
                KeyEvent::pressed(Key::Confirm),
                KeyEvent::released(Key::Confirm),
            ]
        );
    }

    #[test]
    fn test_press_only_buttons_tap() {
        let mut keys = TerminalKeys::new(false);
        keys.translate(key(KeyCode::Char('b'), KeyEventKind::Press));
        assert_eq!(
            drained(&mut keys),
            vec![KeyEvent::pressed(Key::Pause), KeyEvent::released(Key::Pause)]
        );
    }

    #[test]
    fn test_press_only_directions_latch() {
        let mut keys = TerminalKeys::new(false);
        keys.translate(key(KeyCode::Left, KeyEventKind::Press));
        // Auto-repeat of the latched direction adds nothing
        keys.translate(key(KeyCode::Left, KeyEventKind::Press));
        assert_eq!(drained(&mut keys), vec![KeyEvent::pressed(Key::Left)]);

        keys.translate(key(KeyCode::Right, KeyEventKind::Press));
        assert_eq!(
            drained(&mut keys),
            vec![KeyEvent::released(Key::Left), KeyEvent::pressed(Key::Right)]
        );

        keys.translate(key(KeyCode::Down, KeyEventKind::Press));
        assert_eq!(drained(&mut keys), vec![KeyEvent::released(Key::Right)]);
        keys.translate(key(KeyCode::Down, KeyEventKind::Press));
        assert!(drained(&mut keys).is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut keys = TerminalKeys::new(true);
        keys.translate(key(KeyCode::Char('x'), KeyEventKind::Press));
        assert!(!keys.quit_requested());
        assert!(drained(&mut keys).is_empty());

        keys.translate(event::KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        ));
        assert!(keys.quit_requested());

        let mut keys = TerminalKeys::new(false);
        keys.translate(key(KeyCode::Esc, KeyEventKind::Press));
        assert!(keys.quit_requested());
    }

    #[test]
    fn test_log_audio_counts() {
        let mut audio = LogAudio::default();
        audio.play_samples(&[128; 4], 8000);
        audio.play_samples(&[128; 4], 8000);
        assert_eq!(audio.played, 2);
    }
}
