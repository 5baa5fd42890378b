//! Snowman Defense - a one-lane arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lane update rule, timers, session lifecycle)
//! - `platform`: Key bindings and the terminal front end
//! - `settings`: Data-driven timing and balance
//! - `highscores`: In-session leaderboard

pub mod error;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{GridParseError, SettingsError};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Number of cells in the lane
    pub const WIDTH: usize = 40;

    /// Milliseconds between simulation ticks
    pub const TICK_PERIOD_MS: u64 = 180;
    /// Milliseconds between two effective shots
    pub const FIRE_COOLDOWN_MS: u64 = 250;
    /// Chance per tick that a snowman appears at the far end
    pub const SPAWN_CHANCE: f64 = 0.12;
    /// Misses allowed before the run ends
    pub const MAX_MISSES: u32 = 5;
}
