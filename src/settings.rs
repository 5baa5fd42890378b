//! Game settings
//!
//! Timing and balance knobs, loaded from an optional JSON file. Fields
//! missing from the file keep their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{FIRE_COOLDOWN_MS, MAX_MISSES, SPAWN_CHANCE, TICK_PERIOD_MS};
use crate::error::SettingsError;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds between simulation ticks
    pub tick_period_ms: u64,
    /// Milliseconds before fire is accepted again
    pub fire_cooldown_ms: u64,
    /// Chance per tick of a snowman spawning (0.0 - 1.0)
    pub spawn_chance: f64,
    /// Misses that end the run
    pub max_misses: u32,
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_period_ms: TICK_PERIOD_MS,
            fire_cooldown_ms: FIRE_COOLDOWN_MS,
            spawn_chance: SPAWN_CHANCE,
            max_misses: MAX_MISSES,
            seed: None,
        }
    }
}

impl Settings {
    /// Reject values the session cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_period_ms == 0 {
            return Err(SettingsError::ZeroDuration {
                field: "tick_period_ms",
            });
        }
        if self.fire_cooldown_ms == 0 {
            return Err(SettingsError::ZeroDuration {
                field: "fire_cooldown_ms",
            });
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(SettingsError::SpawnChanceOutOfRange(self.spawn_chance));
        }
        if self.max_misses == 0 {
            return Err(SettingsError::NoMissesAllowed);
        }
        Ok(())
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let settings = Settings::default();
        assert_eq!(settings.tick_period_ms, 180);
        assert_eq!(settings.fire_cooldown_ms, 250);
        assert_eq!(settings.spawn_chance, 0.12);
        assert_eq!(settings.max_misses, 5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "spawn_chance": 0.5, "seed": 9 }"#).unwrap();
        assert_eq!(settings.spawn_chance, 0.5);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.tick_period_ms, TICK_PERIOD_MS);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{ "tick_period_ms": 0 }"#),
            Err(SettingsError::ZeroDuration { field: "tick_period_ms" })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "spawn_chance": 1.5 }"#),
            Err(SettingsError::SpawnChanceOutOfRange(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "max_misses": 0 }"#),
            Err(SettingsError::NoMissesAllowed)
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Settings::load(Path::new("/nonexistent/snowman.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/snowman.json"));
    }

    #[test]
    fn test_no_path_gives_defaults() {
        assert_eq!(Settings::load_or_default(None).unwrap(), Settings::default());
    }
}
