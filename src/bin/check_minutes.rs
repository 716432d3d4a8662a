//! Minutes check - compare rebuilt minutes with the feed's box score
//!
//! Usage:
//!   cargo run --bin check-minutes -- data/feeds/
//!   cargo run --bin check-minutes -- data/feeds/2513001.json --flagged-only

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{error, warn};

use rotations::logging::init_logging;
use rotations::{AnalysisSettings, analyze_games, init_parallel, load_feeds};

#[derive(Parser)]
#[command(name = "check-minutes")]
#[command(about = "Compare computed player minutes with reported minutes", long_about = None)]
struct Cli {
    /// Feed files or directories of feed files
    #[arg(required = true)]
    feeds: Vec<PathBuf>,

    /// Settings file (TOML, or JSON by extension)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Worker threads (0 = one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Allowed gap in minutes, overrides the settings file
    #[arg(long)]
    tolerance: Option<f64>,

    /// Only print flagged players
    #[arg(long)]
    flagged_only: bool,
}

fn main() -> Result<()> {
    init_logging("warn");
    let cli = Cli::parse();

    let mut settings = AnalysisSettings::resolve(cli.settings.as_deref(), cli.threads)?;
    if let Some(tolerance) = cli.tolerance {
        settings.minutes_tolerance = tolerance;
    }
    init_parallel(settings.threads)?;

    let games = load_feeds(&cli.feeds, &settings.clock).context("loading feeds")?;
    if games.is_empty() {
        bail!("no feeds found");
    }

    let ids: Vec<String> = games.iter().map(|g| g.game_id.clone()).collect();
    let mut flagged = 0;

    for (id, result) in ids.iter().zip(analyze_games(games, &settings)) {
        let analysis = match result {
            Ok(analysis) => analysis,
            Err(e) => {
                error!(game = id.as_str(), recoverable = e.is_recoverable(), "{}", e);
                continue;
            }
        };

        println!("Game {}", id);
        for team in &analysis.teams {
            println!("  {}:", analysis.game.team_name(team.team));
            for check in &team.minutes_check {
                if check.flagged {
                    flagged += 1;
                } else if cli.flagged_only {
                    continue;
                }
                let reported = match check.reported_minutes {
                    Some(minutes) => format!("{:.1}", minutes),
                    None => "?".to_string(),
                };
                let marker = match check.diff {
                    Some(diff) if check.flagged => format!("  <-- diff={:.1}", diff),
                    _ => String::new(),
                };
                println!(
                    "    #{:<3} {:<24} {:>5.1} min (reported {:>5}){}",
                    check.shirt_number, check.player_name, check.computed_minutes, reported, marker
                );
            }
        }
    }

    if flagged > 0 {
        warn!(flagged, tolerance = settings.minutes_tolerance, "players outside tolerance");
    }
    println!("\n{} players flagged", flagged);
    Ok(())
}
