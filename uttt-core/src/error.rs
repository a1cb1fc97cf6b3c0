//! Error types for the game-state engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown event kind: {0}")]
    UnknownEventKind(String),

    #[error("Outcome event arrived before any tile placement")]
    OrphanEvent,

    #[error("Position {position} out of bounds (timeline has {len} moves)")]
    PositionOutOfBounds { position: isize, len: usize },

    #[error("Navigation ended at {actual}, expected {expected}")]
    NavigationConsistencyFailure { expected: isize, actual: isize },

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Grid/tile index out of range: grid {grid}, tile {tile}")]
    IndexOutOfRange { grid: usize, tile: usize },

    #[error("Illegal move: grid {grid}, tile {tile}")]
    IllegalMove { grid: usize, tile: usize },

    #[error("Cannot play while reviewing history")]
    NotAtEnd,

    #[error("Match feed error: {0}")]
    Feed(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
