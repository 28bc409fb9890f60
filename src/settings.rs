//! Game settings
//!
//! Loaded once at startup from an optional JSON file; any field may be
//! omitted and falls back to the default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Runtime configuration for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    /// Screen width in pixels (wrap boundary)
    pub screen_width: f32,
    /// Screen height in pixels (wrap boundary)
    pub screen_height: f32,
    /// Frames per second the session runner paces to
    pub target_fps: u32,

    // === Gameplay ===
    /// Lives at session start and after restart
    pub starting_lives: u32,
    /// RNG seed; a fresh seed is drawn from the clock when absent
    pub seed: Option<u64>,

    // === Effects ===
    /// Particle bursts on destroyed blocks
    pub particles: bool,
    /// Per-burst particle cap
    pub max_particles_per_burst: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            target_fps: TARGET_FPS,

            starting_lives: SHIP_START_LIVES,
            seed: None,

            particles: true,
            max_particles_per_burst: MAX_PARTICLES_PER_BURST,
        }
    }
}

impl Settings {
    /// Screen bounds as a vector
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Frame duration in milliseconds for the configured rate
    pub fn frame_ms(&self) -> u64 {
        (1000 / self.target_fps.max(1) as u64).max(1)
    }

    /// Effective particle cap (0 when particles are disabled)
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.max_particles_per_burst
        }
    }

    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str, path: &Path) -> Result<Self, SettingsError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json, path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.screen_width > 0.0 && self.screen_width.is_finite()) {
            return Err(SettingsError::Invalid {
                field: "screen_width",
                reason: format!("must be a positive number, got {}", self.screen_width),
            });
        }
        if !(self.screen_height > 0.0 && self.screen_height.is_finite()) {
            return Err(SettingsError::Invalid {
                field: "screen_height",
                reason: format!("must be a positive number, got {}", self.screen_height),
            });
        }
        if self.target_fps == 0 {
            return Err(SettingsError::Invalid {
                field: "target_fps",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.starting_lives == 0 {
            return Err(SettingsError::Invalid {
                field: "starting_lives",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_particles_per_burst == 0 {
            return Err(SettingsError::Invalid {
                field: "max_particles_per_burst",
                reason: "must be at least 1 (set `particles` to false to disable bursts)"
                    .to_string(),
            });
        }
        Ok(())
    }
}
