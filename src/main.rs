//! Headless gem-cascade runner (default binary).
//!
//! Plays a seeded session by always taking the controller's hint, then prints a
//! JSON summary. With `--trace` every render event is printed as one JSON line
//! as it happens.

mod logger;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::info;
use serde::Serialize;

use gem_cascade::core::board_hash;
use gem_cascade::engine::{play_hinted_move, BoardController, PlayStats};
use gem_cascade::types::{EngineConfig, EngineEvent};

#[derive(Debug, Parser)]
#[command(
    name = "gem-cascade",
    version,
    about = "Play a seeded match-3 session headlessly and report the result"
)]
struct Args {
    /// Number of hinted moves to play
    #[arg(short = 'n', long, default_value = "50", value_name = "N")]
    moves: u32,

    /// JSON engine configuration (camelCase fields, all optional)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the number of rows
    #[arg(long, value_name = "ROWS")]
    rows: Option<usize>,

    /// Override the number of columns
    #[arg(long, value_name = "COLS")]
    cols: Option<usize>,

    /// Override the RNG seed
    #[arg(long, value_name = "SEED")]
    seed: Option<u32>,

    /// Override the points per destroyed gem
    #[arg(long, value_name = "POINTS")]
    base_points: Option<u32>,

    /// Print every engine event as a JSON line
    #[arg(long)]
    trace: bool,

    /// More log output on stderr (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    seed: u32,
    rows: usize,
    cols: usize,
    moves_played: u32,
    score: u64,
    best_combo: u32,
    deepest_cascade: u32,
    regenerations: u32,
    board_hash: u64,
    board: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let env_level = std::env::var(logger::LOG_ENV).ok();
    logger::init(logger::resolve_level(
        args.verbose,
        args.quiet,
        env_level.as_deref(),
    ));

    let config = load_config(&args)?;
    run(&args, config)
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => EngineConfig::default(),
    };

    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(base_points) = args.base_points {
        config.base_points = base_points;
    }
    Ok(config)
}

fn read_config(path: &Path) -> Result<EngineConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn emit_events(out: &mut impl Write, events: &[EngineEvent]) -> Result<()> {
    for event in events {
        serde_json::to_writer(&mut *out, event)?;
        writeln!(out)?;
    }
    Ok(())
}

fn run(args: &Args, config: EngineConfig) -> Result<()> {
    let mut controller =
        BoardController::new(config).context("failed to create the starting board")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let events = controller.drain_events();
    if args.trace {
        emit_events(&mut out, &events)?;
    }

    let mut stats = PlayStats::default();
    for _ in 0..args.moves {
        let outcome = play_hinted_move(&mut controller).context("cascade failed")?;
        let events = controller.drain_events();
        if args.trace {
            emit_events(&mut out, &events)?;
        }
        match outcome {
            Some(outcome) => stats.record(outcome),
            None => break,
        }
    }
    info!(
        "played {} move(s), score {}, best combo {}",
        stats.moves,
        controller.score(),
        controller.best_combo()
    );

    let grid = controller.grid();
    let summary = Summary {
        seed: controller.seed(),
        rows: grid.rows(),
        cols: grid.cols(),
        moves_played: stats.moves,
        score: controller.score(),
        best_combo: controller.best_combo(),
        deepest_cascade: stats.deepest_cascade,
        regenerations: stats.regenerations,
        board_hash: board_hash(grid),
        board: grid.to_text(),
    };
    serde_json::to_writer_pretty(&mut out, &summary)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
