//! Board snapshots and the pure event transforms
//!
//! A [`Snapshot`] is never mutated in place: [`apply`] and [`undo`] return a
//! new snapshot. Each sub-grid sits behind its own `Arc`, so a transform only
//! copies the sub-grid it touches and shares the other eight.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::board::{is_valid_index, Player, SubGrid, Winner, EMPTY_SUB_GRID, FIRST_PLAYER, GRID_SIZE};
use crate::error::{EngineError, Result};
use crate::event::{GameEvent, TilePlacement};

/// Complete board state at one point of a game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    winner: Option<Winner>,
    next_player: Player,
    /// Sub-board the next player is confined to, `None` for any
    next_grid: Option<usize>,
    /// Previous `next_grid` values, most recent last
    past_next_grids: Vec<Option<usize>>,
    sub_grids_won: [Option<Winner>; GRID_SIZE],
    sub_grids: [Arc<SubGrid>; GRID_SIZE],
}

impl Snapshot {
    /// Empty board, first player to move, any sub-board playable
    pub fn new() -> Self {
        let empty = Arc::new(EMPTY_SUB_GRID);
        Self {
            winner: None,
            next_player: FIRST_PLAYER,
            next_grid: None,
            past_next_grids: Vec::new(),
            sub_grids_won: [None; GRID_SIZE],
            sub_grids: std::array::from_fn(|_| Arc::clone(&empty)),
        }
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn next_player(&self) -> Player {
        self.next_player
    }

    pub fn next_grid(&self) -> Option<usize> {
        self.next_grid
    }

    pub fn past_next_grids(&self) -> &[Option<usize>] {
        &self.past_next_grids
    }

    pub fn sub_grids_won(&self) -> &[Option<Winner>; GRID_SIZE] {
        &self.sub_grids_won
    }

    pub fn sub_grid_winner(&self, grid: usize) -> Option<Winner> {
        self.sub_grids_won[grid]
    }

    pub fn sub_grid(&self, grid: usize) -> &SubGrid {
        &self.sub_grids[grid]
    }

    pub fn tile(&self, grid: usize, tile: usize) -> Option<Player> {
        self.sub_grids[grid][tile]
    }

    /// Number of occupied tiles on the whole board
    pub fn tiles_placed(&self) -> usize {
        self.sub_grids
            .iter()
            .map(|grid| grid.iter().filter(|t| t.is_some()).count())
            .sum()
    }

    /// Whether two snapshots share the storage of a sub-grid
    pub fn shares_sub_grid(&self, other: &Snapshot, grid: usize) -> bool {
        Arc::ptr_eq(&self.sub_grids[grid], &other.sub_grids[grid])
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply an event, returning the resulting snapshot
///
/// Events arriving after the game outcome has been recorded are rejected, as
/// are placements on occupied tiles and repeated sub-board outcomes.
pub fn apply(snapshot: &Snapshot, event: &GameEvent) -> Result<Snapshot> {
    tracing::trace!(?event, "applying event");

    if let Some(winner) = snapshot.winner {
        return Err(EngineError::InvalidTransition(format!(
            "game already decided ({}), cannot apply {:?}",
            winner.to_char(),
            event
        )));
    }

    let mut next = snapshot.clone();

    match *event {
        GameEvent::TilePlaced(TilePlacement { grid, tile }) => {
            check_indices(grid, tile)?;
            if let Some(owner) = snapshot.sub_grids[grid][tile] {
                return Err(EngineError::InvalidTransition(format!(
                    "tile {} {} already owned by {}",
                    grid,
                    tile,
                    owner.to_char()
                )));
            }

            Arc::make_mut(&mut next.sub_grids[grid])[tile] = Some(snapshot.next_player);
            next.next_player = snapshot.next_player.opponent();
            next.past_next_grids.push(snapshot.next_grid);
            next.next_grid = if snapshot.sub_grids_won[tile].is_none() {
                Some(tile)
            } else {
                None
            };
        }
        GameEvent::SubBoardWon { grid, winner } => {
            check_indices(grid, 0)?;
            if let Some(recorded) = snapshot.sub_grids_won[grid] {
                return Err(EngineError::InvalidTransition(format!(
                    "sub-board {} already decided ({})",
                    grid,
                    recorded.to_char()
                )));
            }
            next.sub_grids_won[grid] = Some(winner);
        }
        GameEvent::OverallWon { winner } => {
            next.winner = Some(winner);
        }
    }

    Ok(next)
}

/// Exact inverse of [`apply`]: `undo(&apply(s, e)?, e) == s`
pub fn undo(snapshot: &Snapshot, event: &GameEvent) -> Result<Snapshot> {
    tracing::trace!(?event, "undoing event");

    let mut prev = snapshot.clone();

    match *event {
        GameEvent::TilePlaced(TilePlacement { grid, tile }) => {
            check_indices(grid, tile)?;
            let placer = snapshot.next_player.opponent();
            if snapshot.sub_grids[grid][tile] != Some(placer) {
                return Err(EngineError::InvalidTransition(format!(
                    "tile {} {} was not placed by {}",
                    grid,
                    tile,
                    placer.to_char()
                )));
            }
            let restored = prev.past_next_grids.pop().ok_or_else(|| {
                EngineError::InvalidTransition("no previous next-grid to restore".to_string())
            })?;

            Arc::make_mut(&mut prev.sub_grids[grid])[tile] = None;
            prev.next_player = placer;
            prev.next_grid = restored;
        }
        GameEvent::SubBoardWon { grid, winner } => {
            check_indices(grid, 0)?;
            if snapshot.sub_grids_won[grid] != Some(winner) {
                return Err(EngineError::InvalidTransition(format!(
                    "sub-board {} is not recorded as {}",
                    grid,
                    winner.to_char()
                )));
            }
            prev.sub_grids_won[grid] = None;
        }
        GameEvent::OverallWon { winner } => {
            if snapshot.winner != Some(winner) {
                return Err(EngineError::InvalidTransition(format!(
                    "game is not recorded as {}",
                    winner.to_char()
                )));
            }
            prev.winner = None;
        }
    }

    Ok(prev)
}

fn check_indices(grid: usize, tile: usize) -> Result<()> {
    if is_valid_index(grid) && is_valid_index(tile) {
        Ok(())
    } else {
        Err(EngineError::IndexOutOfRange { grid, tile })
    }
}
