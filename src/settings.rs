//! Game settings
//!
//! Read from a JSON file next to the binary. Every field has a default, so a
//! partial file (or none at all) is fine.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    /// Logical screen width; new platforms appear here
    pub screen_width: f32,
    /// Falling below this y ends the run
    pub screen_height: f32,

    // === Simulation ===
    /// Time between ticks
    pub tick_interval_ms: u64,
    /// Chance per tick of spawning a platform (0.0 - 1.0)
    pub spawn_probability: f64,
    /// Fixed RNG seed; random when unset
    pub seed: Option<u64>,

    // === Storage ===
    /// Where the best score is kept
    pub score_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            tick_interval_ms: TICK_INTERVAL_MS,
            spawn_probability: SPAWN_PROBABILITY,
            seed: None,

            score_file: PathBuf::from("platform_jump_scores.json"),
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "platform_jump.json";

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Clamp out-of-range values back to something playable
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.screen_width.is_nan() || self.screen_width <= 0.0 {
            self.screen_width = defaults.screen_width;
        }
        if self.screen_height.is_nan() || self.screen_height <= 0.0 {
            self.screen_height = defaults.screen_height;
        }
        self.tick_interval_ms = self.tick_interval_ms.max(1);
        self.spawn_probability = if self.spawn_probability.is_nan() {
            defaults.spawn_probability
        } else {
            self.spawn_probability.clamp(0.0, 1.0)
        };
        self
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings.sanitized()
                }
                Err(e) => {
                    log::warn!("Ignoring invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to `path` as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
