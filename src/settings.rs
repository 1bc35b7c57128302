//! Host settings and preferences
//!
//! Gameplay tuning is fixed in `consts`; these only steer the host: seeding,
//! audio mix and the headless demo.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed run seed; `None` derives one from the clock
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Demo ===
    /// Ticks to simulate in the headless demo
    pub demo_ticks: u64,
    /// Draw the playfield to the terminal every `frame_every` ticks (0 = never)
    pub frame_every: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            demo_ticks: 3600,
            frame_every: 600,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `path`, falling back to defaults on any failure
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    /// Seed to run with
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
