//! Runtime settings
//!
//! Loop cadence, serve RNG seed and sound. Read once at startup from an
//! optional JSON file; never written back.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Loop cadence ===
    /// Sleep between gameplay ticks (ms)
    pub frame_ms: u64,
    /// Sleep between input polls while waiting (paused, title, game over)
    pub poll_ms: u64,
    /// How long the "ball lost" message stays up
    pub ball_lost_delay_ms: u64,
    /// How long the level-clear message stays up
    pub level_clear_delay_ms: u64,

    /// Serve direction RNG seed; random when absent
    pub seed: Option<u64>,

    // === Audio ===
    pub sound: bool,
    /// Beep volume (0.0 - 1.0)
    pub volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_ms: 20,
            poll_ms: 100,
            ball_lost_delay_ms: 1000,
            level_clear_delay_ms: 1000,
            seed: None,
            sound: true,
            volume: 1.0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Bad settings in {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }

    pub fn ball_lost_delay(&self) -> Duration {
        Duration::from_millis(self.ball_lost_delay_ms)
    }

    pub fn level_clear_delay(&self) -> Duration {
        Duration::from_millis(self.level_clear_delay_ms)
    }

    /// Seed to use for this run
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
