//! Snowman Defense entry point
//!
//! Parses arguments, loads settings and either runs the terminal game or a
//! headless simulation that prints a JSON snapshot.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;

use snowman_defense::platform::terminal;
use snowman_defense::sim::{Grid, Session};
use snowman_defense::{HighScores, Settings};

#[derive(Parser, Debug)]
#[command(name = "snowman-defense")]
#[command(about = "Shoot the snowmen before they reach the left side")]
struct Args {
    /// RNG seed for snowman spawns (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Starting lane as a glyph string (shareable form)
    #[arg(long)]
    line: Option<String>,

    /// Reject unknown glyphs in --line instead of reading them as empty
    #[arg(long)]
    strict: bool,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Run this many ticks without input and print the final state as JSON
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let args = Args::parse();
    let settings = Settings::load_or_default(args.settings.as_deref())?;
    let seed = args.seed.or(settings.seed).unwrap_or_else(clock_seed);

    let grid = match args.line.as_deref() {
        Some(line) if args.strict => line.parse::<Grid>().context("invalid --line")?,
        Some(line) => Grid::decode(line),
        None => Grid::empty(),
    };

    let mut session = Session::with_grid(settings, seed, grid);
    log::info!("Snowman Defense starting (seed {seed})");

    if let Some(ticks) = args.headless {
        session.run_for(ticks);
        session.teardown();
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        return Ok(());
    }

    let mut high_scores = HighScores::new();
    terminal::run(&mut session, &mut high_scores).context("terminal error")?;

    if let Some(best) = high_scores.top_score() {
        println!("Best score this session: {best}");
    }
    println!("Final score: {} (seed {seed})", session.score());
    Ok(())
}
