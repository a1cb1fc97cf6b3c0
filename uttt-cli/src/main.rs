//! UTTT CLI - Command-line interface
//!
//! Commands:
//! - replay: Step through a recorded game
//! - moves: List the moves of a recorded game
//! - play: Run a self-play match between random agents

mod moves_cmd;
mod play_cmd;
mod render;
mod replay_cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "uttt")]
#[command(about = "Ultimate Tic-Tac-Toe replay viewer and match runner")]
#[command(version)]
struct Cli {
    /// Log filter (e.g. "debug", "uttt_core=trace"); overrides RUST_LOG
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a recorded game at any position
    Replay(replay_cmd::ReplayArgs),
    /// Print the move list of a recorded game
    Moves(moves_cmd::MovesArgs),
    /// Play a match between two random agents
    Play(play_cmd::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    match cli.command {
        Commands::Replay(args) => replay_cmd::run(args),
        Commands::Moves(args) => moves_cmd::run(args),
        Commands::Play(args) => play_cmd::run(args),
    }
}

/// Logs go to stderr so JSON output on stdout stays clean
fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
