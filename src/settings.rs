//! Runtime configuration
//!
//! Compile-time defaults live in [`crate::consts`]; a JSON file may override
//! any subset of them. Missing keys fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_SECONDS, SLOW_MO_FACTOR};
use crate::error::SettingsError;

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; a random seed is drawn when absent
    pub seed: Option<u64>,

    // === Time ===
    /// dt multiplier while slow-mo is held
    pub slow_mo_factor: f32,
    /// Largest dt a single frame may advance the simulation by
    pub max_frame_seconds: f32,

    // === World policy ===
    /// Asteroids leaving the world reappear on the opposite side
    pub asteroids_wrap: bool,
    /// Bullets leaving the world reappear on the opposite side
    pub bullets_wrap: bool,

    // === Feedback ===
    /// Camera shake on impacts and deaths
    pub screen_shake: bool,
    /// Forward vibration to the gamepad
    pub vibration: bool,

    // === Debug ===
    /// Start with debug drawing enabled
    pub debug_draw: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            slow_mo_factor: SLOW_MO_FACTOR,
            max_frame_seconds: MAX_FRAME_SECONDS,

            asteroids_wrap: true,
            bullets_wrap: false,

            screen_shake: true,
            vibration: true,

            debug_draw: false,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read settings from a JSON file, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Write settings as JSON to a file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let settings = Settings::default();
        assert_eq!(settings.slow_mo_factor, 0.1);
        assert!((settings.max_frame_seconds - 1.0 / 30.0).abs() < 1e-7);
        assert!(settings.asteroids_wrap);
        assert!(!settings.bullets_wrap);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "bullets_wrap": true }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert!(settings.bullets_wrap);
        assert!(settings.asteroids_wrap);
        assert_eq!(settings.slow_mo_factor, SLOW_MO_FACTOR);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default(Path::new("/definitely/not/here.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: Some(42),
            debug_draw: true,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
