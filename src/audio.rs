//! Collision beeps
//!
//! Procedurally generated, no sample files. The speaker takes unsigned 8-bit
//! samples centered on 128; one beep is five periods of a sine wave.

use crate::platform::AudioOut;
use crate::sim::Obstacle;

/// Playback rate of the beep
pub const BEEP_SAMPLE_RATE: u32 = 8000;
/// Samples in one beep
pub const BEEP_LEN: usize = 100;
/// Samples per sine period (400 Hz at 8 kHz)
pub const BEEP_PERIOD: usize = 20;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a side wall or the ceiling
    WallHit,
    /// Ball hits paddle
    PaddleHit,
    /// Ball breaks a brick
    BrickBreak,
}

impl SoundEffect {
    /// Effect for a bounce off `obstacle`
    pub fn for_bounce(obstacle: Obstacle) -> Self {
        match obstacle {
            Obstacle::SideWall | Obstacle::Ceiling => SoundEffect::WallHit,
            Obstacle::Paddle => SoundEffect::PaddleHit,
            Obstacle::Brick => SoundEffect::BrickBreak,
        }
    }
}

/// Build the beep waveform at the given volume (0.0 - 1.0)
pub fn beep_tone(volume: f32) -> Vec<u8> {
    let amplitude = 127.0 * volume.clamp(0.0, 1.0);
    (0..BEEP_LEN)
        .map(|i| {
            let phase = std::f32::consts::TAU * i as f32 / BEEP_PERIOD as f32;
            (128.0 + amplitude * phase.sin()) as u8
        })
        .collect()
}

/// Audio manager for the game
pub struct AudioManager {
    tone: Vec<u8>,
    volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl AudioManager {
    pub fn new(volume: f32) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        Self {
            tone: beep_tone(volume),
            volume,
            muted: false,
        }
    }

    /// Set volume (0.0 - 1.0), regenerating the tone
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.tone = beep_tone(self.volume);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_silent(&self) -> bool {
        self.muted || self.volume <= 0.0
    }

    /// Play a sound effect. Every effect is the same beep on this board.
    pub fn play(&self, effect: SoundEffect, out: &mut dyn AudioOut) {
        if self.is_silent() {
            return;
        }
        log::trace!("Sound {:?}", effect);
        out.play_samples(&self.tone, BEEP_SAMPLE_RATE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(usize, u32)>,
    }

    impl AudioOut for Recorder {
        fn play_samples(&mut self, samples: &[u8], sample_rate: u32) {
            self.calls.push((samples.len(), sample_rate));
        }
    }

    #[test]
    fn test_beep_tone_shape() {
        let tone = beep_tone(1.0);
        assert_eq!(tone.len(), BEEP_LEN);
        assert_eq!(tone[0], 128);
        // Quarter period is the crest, three quarters the trough
        assert!(tone[5] >= 254);
        assert!(tone[15] <= 2);
        assert_eq!(tone.iter().max(), Some(&tone[5]));
    }

    #[test]
    fn test_quiet_tone_is_flat() {
        assert!(beep_tone(0.0).iter().all(|&s| s == 128));
    }

    #[test]
    fn test_play_and_mute() {
        let mut audio = AudioManager::default();
        let mut out = Recorder::default();
        audio.play(SoundEffect::PaddleHit, &mut out);
        assert_eq!(out.calls, vec![(BEEP_LEN, BEEP_SAMPLE_RATE)]);

        audio.set_muted(true);
        audio.play(SoundEffect::WallHit, &mut out);
        assert_eq!(out.calls.len(), 1);

        audio.set_muted(false);
        audio.set_volume(0.0);
        assert!(audio.is_silent());
    }

    #[test]
    fn test_effect_for_bounce() {
        assert_eq!(SoundEffect::for_bounce(Obstacle::Ceiling), SoundEffect::WallHit);
        assert_eq!(SoundEffect::for_bounce(Obstacle::Paddle), SoundEffect::PaddleHit);
        assert_eq!(SoundEffect::for_bounce(Obstacle::Brick), SoundEffect::BrickBreak);
    }
}
