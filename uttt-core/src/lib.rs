//! UTTT Core - Ultimate Tic-Tac-Toe game-state engine
//!
//! This crate provides the event-sourced game state for UTTT:
//! - Board geometry, players and outcomes
//! - Game events with pure apply/undo transforms over immutable snapshots
//! - Move timeline with cursor navigation for replays
//! - Playable-tile policy and win detection
//! - Agents and a human-versus-agent controller
//! - The match feed format

pub mod board;
pub mod error;
pub mod event;
pub mod snapshot;
pub mod timeline;
pub mod rules;
pub mod agent;
pub mod controller;
pub mod record;

// Re-exports for convenient access
pub use board::{Player, Winner, SubGrid, FIRST_PLAYER, GRID_SIZE, WIN_LINES};
pub use error::{EngineError, Result};
pub use event::{GameEvent, TilePlacement, parse_events};
pub use snapshot::{Snapshot, apply, undo};
pub use timeline::{Timeline, Move, BEFORE_FIRST_MOVE};
pub use rules::{playable_tiles, is_playable, board_winner, find_wins};
pub use agent::{Agent, RandomAgent};
pub use controller::{PlayableGame, ControllerConfig};
pub use record::{MatchRecord, MatchFeed, FeedEntry, MatchEvent, GameHistory, Scores, Percentages};
