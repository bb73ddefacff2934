//! Runner settings
//!
//! Loaded from a JSON file; any field left out takes its default.
//! Gameplay tuning stays in [`crate::consts`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Why a settings file could not be used
#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read settings {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid settings {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for the run
    pub seed: u64,
    /// Start with auto-upgrade enabled
    pub auto_upgrade: bool,

    // === Headless runner ===
    /// Milliseconds between synthetic frames
    pub frame_ms: f64,
    /// Length of the run in seconds
    pub duration_secs: f64,
    /// Print the HUD every N frames (0 = never)
    pub hud_every_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 1,
            auto_upgrade: false,
            frame_ms: 1000.0 / 60.0,
            duration_secs: 120.0,
            hud_every_frames: 60,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str, path: &Path) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json, path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Settings from `path` if given and readable, otherwise defaults
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        Self::load_from(path).unwrap_or_else(|err| {
            log::warn!("{err}; using default settings");
            Self::default()
        })
    }

    /// Total frames the headless runner should simulate
    pub fn frame_count(&self) -> u64 {
        if self.frame_ms <= 0.0 {
            return 0;
        }
        (self.duration_secs * 1000.0 / self.frame_ms).ceil().max(0.0) as u64
    }
}
