//! Terminal front end
//!
//! Hosts the session on a wall clock, reads keys, and redraws the lane and
//! HUD after every batch of events.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use super::input::{Command, command_for, dispatch};
use crate::highscores::HighScores;
use crate::sim::{Cell, Session, SessionEvent};

/// Longest wait for input between redraws
const MAX_POLL_MS: u64 = 50;

const TITLE: &str = "ASCII Snowman Defense";

/// HUD and lane as plain text lines, top to bottom
pub fn render_lines(session: &Session, high_scores: &HighScores) -> Vec<String> {
    let best = high_scores
        .top_score()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut lines = vec![
        TITLE.to_string(),
        String::new(),
        format!(
            "Score: {}    Misses: {} / {}    Best: {}",
            session.score(),
            session.misses(),
            session.max_misses(),
            best
        ),
        String::new(),
        session.grid().encode(),
        String::new(),
        "Controls: Space to shoot, R to restart when the game is over, Q to quit.".to_string(),
        format!(
            "Stop the {} before they reach the left side. Miss {} and it's game over.",
            Cell::ADVERSARY_GLYPH,
            session.max_misses()
        ),
    ];
    if session.is_over() {
        lines.push(String::new());
        lines.push("Game over! Press R to play again.".to_string());
    }
    lines
}

/// Feed finished runs into the leaderboard
fn record(events: &[SessionEvent], session: &Session, high_scores: &mut HighScores) {
    for event in events {
        if let SessionEvent::GameOver { score } = event {
            high_scores.add_score(*score, session.state().ticks);
        }
    }
}

fn draw(out: &mut impl Write, session: &Session, high_scores: &HighScores) -> io::Result<()> {
    queue!(out, cursor::MoveTo(0, 0), Clear(ClearType::All))?;
    for (row, line) in render_lines(session, high_scores).iter().enumerate() {
        queue!(out, cursor::MoveTo(0, row as u16))?;
        if session.is_over() && line.starts_with("Game over") {
            queue!(out, SetForegroundColor(Color::Red), Print(line), ResetColor)?;
        } else {
            queue!(out, Print(line))?;
        }
    }
    out.flush()
}

/// Run the session interactively until the player quits
pub fn run(session: &mut Session, high_scores: &mut HighScores) -> io::Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let result = event_loop(&mut stdout, session, high_scores);

    // Restore the terminal even if the loop failed
    let screen = execute!(stdout, cursor::Show, LeaveAlternateScreen);
    let raw_mode = terminal::disable_raw_mode();
    first_error([result, screen, raw_mode])
}

/// Every step is already done; report the earliest failure
fn first_error(results: [io::Result<()>; 3]) -> io::Result<()> {
    results.into_iter().collect()
}

fn event_loop(
    out: &mut impl Write,
    session: &mut Session,
    high_scores: &mut HighScores,
) -> io::Result<()> {
    let origin = Instant::now();
    let elapsed_ms = |origin: Instant| origin.elapsed().as_millis() as u64;

    session.start();
    log::info!("Terminal front end running");

    loop {
        let now = elapsed_ms(origin);
        let events = session.advance_clock(now);
        record(&events, session, high_scores);
        draw(out, session, high_scores)?;

        let wait = session
            .next_due()
            .map(|due| due.saturating_sub(now))
            .unwrap_or(MAX_POLL_MS)
            .min(MAX_POLL_MS);
        if !event::poll(Duration::from_millis(wait))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        let Some(command) = command_for(&key) else {
            continue;
        };
        if command == Command::Quit {
            break;
        }

        // Commit due timers first so the command sees the latest lane
        let events = session.advance_clock(elapsed_ms(origin));
        record(&events, session, high_scores);
        let events = dispatch(session, command);
        log::debug!("{command:?} -> {events:?}");
    }

    session.teardown();
    Ok(())
}
