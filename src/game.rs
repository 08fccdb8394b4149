//! Frame driver
//!
//! Each step drains input, ticks the simulation once, fans the resulting
//! events out to the peripherals, and tells the caller how long to sleep.
//! The phase alone decides the cadence: gameplay ticks at the frame rate,
//! waiting phases poll slowly, transient phases hold their message.

use std::time::Duration;

use crate::audio::{AudioManager, SoundEffect};
use crate::input::InputMapper;
use crate::platform::{AudioOut, InputSource, LivesIndicator};
use crate::renderer::Surface;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, SeededSigns, SignSource, TickInput, tick};

pub const TITLE_MESSAGE: &str = "Press A to Start";
pub const PAUSED_MESSAGE: &str = "Paused. B to resume.";
pub const GAME_OVER_MESSAGE: &str = "Game Over. A to Restart.";

/// Borrowed peripherals for one step
pub struct Io<'a> {
    pub input: &'a mut dyn InputSource,
    pub surface: &'a mut dyn Surface,
    pub audio: &'a mut dyn AudioOut,
    pub lives: &'a mut dyn LivesIndicator,
}

/// Game instance holding the session and its input tracking
pub struct Game {
    state: GameState,
    mapper: InputMapper,
    signs: Box<dyn SignSource>,
    audio: AudioManager,
    settings: Settings,
    /// Last (lives, emphasis) pushed to the lives indicator
    shown_lives: Option<(u8, bool)>,
}

impl Game {
    /// New game with a seeded serve RNG
    pub fn new(settings: Settings) -> Self {
        let seed = settings.effective_seed();
        log::info!("Serve seed: {}", seed);
        Self::with_signs(settings, Box::new(SeededSigns::new(seed)))
    }

    /// New game with an explicit serve direction source
    pub fn with_signs(settings: Settings, signs: Box<dyn SignSource>) -> Self {
        let mut audio = AudioManager::new(settings.volume);
        audio.set_muted(!settings.sound);
        Self {
            state: GameState::new(),
            mapper: InputMapper::new(),
            signs,
            audio,
            settings,
            shown_lives: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scenario setup
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Draw the title screen before the first step
    pub fn attach(&mut self, io: &mut Io<'_>) {
        self.place_shapes(io);
        io.surface.set_status(Some(TITLE_MESSAGE));
        io.surface.present();
        self.sync_lives(io);
    }

    /// Run one step and return how long to wait before the next
    pub fn step(&mut self, io: &mut Io<'_>) -> Duration {
        let actions = self.mapper.drain(io.input);
        let input = TickInput {
            held: self.mapper.held(),
            pause: actions.pause,
            confirm: actions.confirm,
        };

        tick(&mut self.state, &input, self.signs.as_mut());

        let mut message_changed = false;
        for event in self.state.drain_events() {
            message_changed |= self.apply_event(event, io);
        }

        if self.state.phase == GamePhase::Playing {
            self.place_shapes(io);
            io.surface.present();
        } else if message_changed {
            io.surface.present();
        }

        self.sync_lives(io);
        self.cadence()
    }

    /// Sleep that goes with the current phase
    pub fn cadence(&self) -> Duration {
        match self.state.phase {
            GamePhase::Playing => self.settings.frame_interval(),
            GamePhase::BallLost => self.settings.ball_lost_delay(),
            GamePhase::LevelCleared => self.settings.level_clear_delay(),
            GamePhase::AttractWait | GamePhase::Paused | GamePhase::GameOver => {
                self.settings.poll_interval()
            }
        }
    }

    /// Forward one event; returns true when the status text changed
    fn apply_event(&mut self, event: GameEvent, io: &mut Io<'_>) -> bool {
        match event {
            GameEvent::Bounce(obstacle) => {
                self.audio.play(SoundEffect::for_bounce(obstacle), io.audio);
                false
            }
            GameEvent::BrickDestroyed { id } => {
                io.surface.remove_brick(id);
                false
            }
            GameEvent::FieldBuilt => {
                io.surface.clear_bricks();
                for brick in self.state.bricks.iter() {
                    io.surface.add_brick(brick);
                }
                false
            }
            GameEvent::Started | GameEvent::Served | GameEvent::Resumed => {
                io.surface.set_status(None);
                true
            }
            GameEvent::Paused => {
                io.surface.set_status(Some(PAUSED_MESSAGE));
                true
            }
            GameEvent::BallLost { lives } => {
                if lives == 0 {
                    return false;
                }
                let text = format!("Ball lost! {} left", lives);
                io.surface.set_status(Some(text.as_str()));
                true
            }
            GameEvent::LevelCleared { level } => {
                let text = format!("Score: {}. Level {}", self.state.score, level);
                io.surface.set_status(Some(text.as_str()));
                true
            }
            GameEvent::GameOver => {
                io.surface.set_status(Some(GAME_OVER_MESSAGE));
                true
            }
            GameEvent::Reset => {
                self.place_shapes(io);
                io.surface.clear_bricks();
                io.surface.set_status(Some(TITLE_MESSAGE));
                true
            }
        }
    }

    fn place_shapes(&self, io: &mut Io<'_>) {
        let ball = self.state.ball.pos;
        io.surface.move_paddle(self.state.paddle.x, self.state.paddle.y);
        io.surface.move_ball(ball.x, ball.y);
    }

    fn sync_lives(&mut self, io: &mut Io<'_>) {
        let current = (self.state.lives, self.state.phase.needs_attention());
        if self.shown_lives != Some(current) {
            io.lives.show_lives(current.0, current.1);
            self.shown_lives = Some(current);
        }
    }
}
