//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual clock only (no wall-clock reads)
//! - Seeded RNG only
//! - Stable resolution order (projectile claims before snowman moves)
//! - No rendering or platform dependencies

pub mod lane;
pub mod schedule;
pub mod session;
pub mod state;
pub mod tick;

pub use lane::{Cell, Grid};
pub use schedule::{Millis, Scheduler, TaskHandle};
pub use session::{Session, Timer};
pub use state::{Phase, SessionEvent, SessionSnapshot, SessionState};
pub use tick::{Advance, advance};
