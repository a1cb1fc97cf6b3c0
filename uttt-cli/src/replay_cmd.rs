//! Replay command - view a recorded game at any position
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_timeline(), seek(), report()
//! - Level 4: formatting utilities

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use uttt_core::{MatchRecord, Snapshot, TilePlacement, Timeline};

use crate::render;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ReplayArgs {
    /// Match feed or bare event array (JSON)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Game within the match (1-based)
    #[arg(long, default_value = "1")]
    pub game: u32,

    /// Move to show (-1 = empty board, default = last move)
    #[arg(long, allow_negative_numbers = true)]
    pub position: Option<isize>,

    /// Output the snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run replay command
///
/// 1. Hydrate the game's timeline
/// 2. Move the cursor
/// 3. Report the board
pub fn run(args: ReplayArgs) -> Result<()> {
    let mut timeline = load_timeline(&args.file, args.game)?;

    if let Some(position) = args.position {
        seek(&mut timeline, position)?;
    }

    report(&timeline, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Read a feed file and hydrate one of its games
pub fn load_timeline(file: &Path, game: u32) -> Result<Timeline> {
    let json = fs::read_to_string(file)
        .with_context(|| format!("Failed to read match file: {}", file.display()))?;

    let record = MatchRecord::from_json(&json)
        .with_context(|| format!("Failed to parse match file: {}", file.display()))?;

    let timeline = record
        .timeline(game)
        .with_context(|| format!("Failed to load game {} from {}", game, file.display()))?;

    tracing::info!(game, moves = timeline.len(), "loaded game");
    Ok(timeline)
}

fn seek(timeline: &mut Timeline, position: isize) -> Result<()> {
    timeline
        .go_to_position(position)
        .with_context(|| format!("Cannot move to position {}", position))
}

fn report(timeline: &Timeline, args: &ReplayArgs) -> Result<()> {
    if args.json {
        print_json(timeline, args.game)
    } else {
        print_text(timeline);
        Ok(())
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

#[derive(Serialize)]
struct ReplayOutput<'a> {
    game: u32,
    position: isize,
    length: usize,
    snapshot: &'a Snapshot,
    moves: Vec<TilePlacement>,
}

fn print_json(timeline: &Timeline, game: u32) -> Result<()> {
    let output = ReplayOutput {
        game,
        position: timeline.position(),
        length: timeline.len(),
        snapshot: timeline.grid(),
        moves: timeline.to_move_list(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_text(timeline: &Timeline) {
    let snapshot = timeline.grid();

    println!("{}", render::status(timeline));
    println!();
    print!("{}", render::board(snapshot));

    let outcomes = render::sub_board_outcomes(snapshot);
    if !outcomes.is_empty() {
        println!("\nSub-boards: {}", outcomes);
    }

    println!("\nMoves:");
    print!("{}", render::move_list(&timeline.to_move_list()));
}
