//! Key bindings
//!
//! Space fires, R restarts a finished run, Q / Esc / Ctrl-C quits.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{Session, SessionEvent};

/// Discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fire,
    Restart,
    Quit,
}

/// Map a key press to a command. Repeats and releases are ignored.
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char(' ') => Some(Command::Fire),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Apply a gameplay command to the session. `Quit` is left to the caller.
pub fn dispatch(session: &mut Session, command: Command) -> Vec<SessionEvent> {
    match command {
        Command::Fire => session.fire(),
        Command::Restart => session.restart(),
        Command::Quit => Vec::new(),
    }
}
