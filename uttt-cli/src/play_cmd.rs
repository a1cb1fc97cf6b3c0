//! Play command - self-play match between two random agents
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play(), save_feed(), report_results()
//! - Level 4: progress bar, formatting utilities

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use uttt_match::{play_match_with_callback, MatchConfig, MatchResult, DEFAULT_GAMES_PER_SIDE};

use crate::render;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Games per side (agents swap colours, so twice as many are played)
    #[arg(long, default_value_t = DEFAULT_GAMES_PER_SIDE)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run games one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Write the match feed to this file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Play the match
/// 2. Save the feed if requested
/// 3. Report results
pub fn run(args: PlayArgs) -> Result<()> {
    let config = build_config(&args);

    let result = play(&config, args.json)?;

    if let Some(path) = &args.output {
        save_feed(&result, path)?;
    }

    report_results(&result, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &PlayArgs) -> MatchConfig {
    let mut config = MatchConfig::new(args.games);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.sequential {
        config = config.sequential();
    }
    config
}

fn play(config: &MatchConfig, quiet: bool) -> Result<MatchResult> {
    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        create_progress(config.total_games() as u64)?
    };

    let result = play_match_with_callback(config, |_| pb.inc(1)).context("Match aborted")?;
    pb.finish_and_clear();

    Ok(result)
}

fn save_feed(result: &MatchResult, path: &Path) -> Result<()> {
    let feed = result.to_feed()?;
    let json = serde_json::to_string_pretty(&feed)?;
    fs::write(path, json).with_context(|| format!("Failed to write match feed: {}", path.display()))?;

    tracing::info!(path = %path.display(), "match feed written");
    Ok(())
}

fn report_results(result: &MatchResult, args: &PlayArgs) -> Result<()> {
    if args.json {
        print_json_results(result)
    } else {
        print_text_results(result);
        Ok(())
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn create_progress(total_games: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total_games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games")?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Print results as JSON
fn print_json_results(result: &MatchResult) -> Result<()> {
    #[derive(Serialize)]
    struct JsonGame {
        game: usize,
        a_is_red: bool,
        winner: Option<char>,
        moves: usize,
    }

    #[derive(Serialize)]
    struct JsonOutput {
        total_games: usize,
        a_wins: u32,
        b_wins: u32,
        draws: u32,
        percentages: uttt_core::Percentages,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: result.games_played(),
        a_wins: result.scores.a_wins,
        b_wins: result.scores.b_wins,
        draws: result.scores.draws,
        percentages: result.scores.percentages(),
        avg_moves: result.avg_moves(),
        games: result
            .games
            .iter()
            .map(|g| JsonGame {
                game: g.index + 1,
                a_is_red: g.a_is_red,
                winner: g.overall_winner.map(|w| w.to_char()),
                moves: g.moves(),
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print results as text
fn print_text_results(result: &MatchResult) {
    let scores = &result.scores;
    let pct = scores.percentages();

    println!("\n=== Match Results ===");
    println!("Total games: {}", result.games_played());
    println!("A wins:      {} ({:.1}%)", scores.a_wins, pct.a_wins);
    println!("Draws:       {} ({:.1}%)", scores.draws, pct.draws);
    println!("B wins:      {} ({:.1}%)", scores.b_wins, pct.b_wins);
    println!("Avg moves:   {:.1}", result.avg_moves());

    println!("\nGame details:");
    for game in &result.games {
        let first = if game.a_is_red { "A" } else { "B" };
        let winner = game.overall_winner.map_or("unfinished", render::winner_label);
        println!(
            "  Game {}: {} first, {} in {} moves",
            game.index + 1,
            first,
            winner,
            game.moves()
        );
    }
}
