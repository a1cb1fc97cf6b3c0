//! UTTT Match - Self-play matches between agents
//!
//! This crate provides match infrastructure:
//! - Single games between two agents, recorded as event streams
//! - Matches with alternating first player, optionally in parallel
//! - Export to the match feed format
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 2: play_match (phase)
//! - Level 3: play_game, play_random_game (steps)
//! - Level 4: configuration

mod config;
mod game_runner;
mod match_play;

pub use config::{MatchConfig, DEFAULT_GAMES_PER_SIDE, DEFAULT_SEED};
pub use game_runner::{play_game, play_random_game, GameRecord};
pub use match_play::{play_match, play_match_with_callback, MatchResult};
