//! Rotations CLI - rotation summaries and chart reports from cached feeds
//!
//! Usage:
//!   cargo run -- summary data/feeds/
//!   cargo run -- summary data/feeds/2513001.json --threads 4
//!   cargo run -- report data/feeds/2513001.json --date 2025-10-04 > game.json

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use rotations::logging::init_logging;
use rotations::{AnalysisSettings, GameError, GameReport, analyze_game, analyze_games, format_summary, init_parallel, load_feeds};

#[derive(Parser)]
#[command(name = "rotations")]
#[command(about = "Player rotations and ratings from basketball play-by-play feeds", long_about = None)]
struct Cli {
    /// Settings file (TOML, or JSON by extension); replaces config/rotations.toml
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Worker threads for multi-game runs (0 = one per core)
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print rotation and rating tables for every game
    Summary {
        /// Feed files or directories of feed files
        #[arg(required = true)]
        feeds: Vec<PathBuf>,
    },

    /// Print the chart report of one game as JSON
    Report {
        /// Feed file
        feed: PathBuf,

        /// Game date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn main() -> Result<()> {
    init_logging("info");
    let cli = Cli::parse();

    let settings = AnalysisSettings::resolve(cli.settings.as_deref(), cli.threads)?;

    match cli.command {
        Commands::Summary { feeds } => run_summary(&feeds, &settings),
        Commands::Report { feed, date } => run_report(&feed, date, &settings),
    }
}

fn run_summary(feeds: &[PathBuf], settings: &AnalysisSettings) -> Result<()> {
    init_parallel(settings.threads)?;

    let games = load_feeds(feeds, &settings.clock).context("loading feeds")?;
    if games.is_empty() {
        bail!("no feeds found in {}", describe(feeds));
    }
    info!(games = games.len(), "analyzing");

    let ids: Vec<String> = games.iter().map(|g| g.game_id.clone()).collect();
    let results = analyze_games(games, settings);

    let mut failed = 0;
    for (id, result) in ids.iter().zip(results) {
        match result {
            Ok(analysis) => {
                println!("============================================================");
                println!("Game {}", id);
                println!("{}", format_summary(&analysis, None));
            }
            Err(e) => {
                failed += 1;
                report_failure(id, &e);
            }
        }
    }

    if failed == ids.len() {
        bail!("all {} games failed", failed);
    }
    if failed > 0 {
        println!("{} of {} games failed, see log", failed, ids.len());
    }
    Ok(())
}

fn run_report(feed: &Path, date: Option<NaiveDate>, settings: &AnalysisSettings) -> Result<()> {
    let game = rotations::events::parse_feed(feed, &settings.clock).with_context(|| format!("reading {}", feed.display()))?;
    let game_id = game.game_id.clone();

    let analysis = match analyze_game(game, settings) {
        Ok(analysis) => analysis,
        Err(e) => {
            report_failure(&game_id, &e);
            return Err(e).with_context(|| format!("analyzing game {}", game_id));
        }
    };

    let report = GameReport::build(&analysis, date);
    println!("{}", report.to_json()?);
    Ok(())
}

fn report_failure(game_id: &str, e: &GameError) {
    if e.is_recoverable() {
        error!(game = game_id, "{}; refetching the feed may help", e);
    } else {
        error!(game = game_id, "{}; feed rejected", e);
    }
}

fn describe(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
