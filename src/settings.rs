//! Game settings
//!
//! Read from a JSON file next to the binary. Missing keys take their default,
//! and a missing or broken file falls back to defaults entirely.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{FRAME_RATE, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frame-rate cap (0 = uncapped). Physics is per frame, so this is also game speed.
    pub frame_rate: u32,
    /// Window size; the width is also the right-hand world bound
    pub screen_width: f32,
    pub screen_height: f32,
    /// Directory holding `<id>.level.png` / `<id>.metadata.json` pairs
    pub levels_dir: PathBuf,
    /// Level played on Start and Replay
    pub level: u32,
    /// Coin placement seed; random per process when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_rate: FRAME_RATE,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            levels_dir: PathBuf::from("levels"),
            level: 1,
            seed: None,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "settings.json";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring invalid settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Seed for this process: the configured one, or fresh entropy
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
