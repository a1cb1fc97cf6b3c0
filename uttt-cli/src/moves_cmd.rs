//! Moves command - print the move list of a recorded game

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::render;
use crate::replay_cmd::load_timeline;

#[derive(Args)]
pub struct MovesArgs {
    /// Match feed or bare event array (JSON)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Game within the match (1-based)
    #[arg(long, default_value = "1")]
    pub game: u32,
}

pub fn run(args: MovesArgs) -> Result<()> {
    let timeline = load_timeline(&args.file, args.game)?;
    print!("{}", render::move_list(&timeline.to_move_list()));

    if let Some(winner) = timeline.grid().winner() {
        println!("Result: {}", render::winner_label(winner));
    }
    Ok(())
}
