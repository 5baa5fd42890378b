//! Error types for the fallible edges (strict lane decoding, settings)

use std::path::PathBuf;

use thiserror::Error;

/// Strict lane decoding failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridParseError {
    #[error("unrecognized glyph {glyph:?} at cell {index}")]
    UnknownGlyph { index: usize, glyph: char },
}

/// Settings loading or validation failure
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("spawn_chance must be within [0, 1], got {0}")]
    SpawnChanceOutOfRange(f64),

    #[error("max_misses must be at least 1")]
    NoMissesAllowed,
}
