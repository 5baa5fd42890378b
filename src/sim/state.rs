//! Session state and the events a session reports
//!
//! Counters, phase and the lane live together so a handler can build the
//! whole next value and swap it in at once.

use serde::{Deserialize, Serialize};

use super::lane::Grid;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Ticks advance the lane and fire is accepted
    #[default]
    Active,
    /// Miss limit reached; only restart is accepted
    Over,
}

/// Everything that is reset together on restart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub grid: Grid,
    /// Collisions resolved
    pub score: u32,
    /// Snowmen that reached the base
    pub misses: u32,
    pub phase: Phase,
    /// False while a fire cooldown is running
    pub can_fire: bool,
    /// Ticks run since the last (re)start
    pub ticks: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Grid::empty())
    }
}

impl SessionState {
    /// Fresh active session on the given lane
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            score: 0,
            misses: 0,
            phase: Phase::Active,
            can_fire: true,
            ticks: 0,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }
}

/// Something observable that happened while handling a tick or command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A projectile was placed at the base
    Fired,
    /// Fire was consumed but the base cell was occupied
    FireBlocked,
    /// A projectile destroyed a snowman at `cell`
    Hit { cell: usize },
    /// A snowman reached the base
    Missed { misses: u32 },
    /// A snowman appeared at the far end
    Spawned,
    /// The miss limit was reached
    GameOver { score: u32 },
    Restarted,
    /// Fire is available again
    CooldownElapsed,
}

/// Serializable view of a session for headless runs and sharing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Shareable glyph string
    pub grid: Grid,
    pub score: u32,
    pub misses: u32,
    pub over: bool,
    pub ticks: u64,
}

impl From<&SessionState> for SessionSnapshot {
    fn from(state: &SessionState) -> Self {
        Self {
            grid: state.grid,
            score: state.score,
            misses: state.misses,
            over: state.is_over(),
            ticks: state.ticks,
        }
    }
}
