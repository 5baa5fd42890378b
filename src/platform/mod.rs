//! Platform abstraction layer
//!
//! Everything that touches the outside world:
//! - Input: key bindings to session commands
//! - Terminal: wall-clock timing, drawing, the event loop

pub mod input;
pub mod terminal;

pub use input::{Command, command_for, dispatch};
