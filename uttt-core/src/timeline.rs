//! Move history with cursor navigation
//!
//! Events are grouped into moves: a tile placement plus the outcome events it
//! caused. The cursor points at the last applied move, `-1` meaning the empty
//! board. Navigation applies or undoes whole moves, never single outcome
//! events.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::event::{GameEvent, TilePlacement};
use crate::rules;
use crate::snapshot::{apply, undo, Snapshot};

/// Cursor position of the empty board
pub const BEFORE_FIRST_MOVE: isize = -1;

/// A tile placement and the outcome events it caused
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    placement: TilePlacement,
    outcomes: Vec<GameEvent>,
}

impl Move {
    fn new(placement: TilePlacement) -> Self {
        Self {
            placement,
            outcomes: Vec::new(),
        }
    }

    pub fn placement(&self) -> TilePlacement {
        self.placement
    }

    pub fn outcomes(&self) -> &[GameEvent] {
        &self.outcomes
    }

    /// All events of the move in the order they were recorded
    pub fn events(&self) -> impl DoubleEndedIterator<Item = GameEvent> + '_ {
        std::iter::once(GameEvent::TilePlaced(self.placement)).chain(self.outcomes.iter().copied())
    }
}

/// Navigable history of one game
#[derive(Clone, Debug)]
pub struct Timeline {
    moves: Vec<Move>,
    index: isize,
    state: Snapshot,
    /// Snapshot after every recorded move, kept for validating new events
    end_state: Snapshot,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            moves: Vec::new(),
            index: BEFORE_FIRST_MOVE,
            state: Snapshot::new(),
            end_state: Snapshot::new(),
        }
    }

    /// Hydrate a timeline from a full event stream, cursor at the end
    pub fn from_events<I: IntoIterator<Item = GameEvent>>(events: I) -> Result<Self> {
        let mut timeline = Self::new();
        timeline.add_many_events(events)?;
        Ok(timeline)
    }

    // ========================================================================
    // RECORDING
    // ========================================================================

    /// Record an event
    ///
    /// A placement opens a new move, anything else joins the latest move. The
    /// event must apply to the end of the history wherever the cursor is; a
    /// rejected event leaves the timeline untouched. When the cursor was at
    /// the end it follows the new event, otherwise it stays put.
    pub fn add_event(&mut self, event: GameEvent) -> Result<()> {
        if !event.is_placement() && self.moves.is_empty() {
            return Err(EngineError::OrphanEvent);
        }

        let up_to_date = self.is_at_end();
        let end_state = apply(&self.end_state, &event)?;

        match event {
            GameEvent::TilePlaced(placement) => self.moves.push(Move::new(placement)),
            outcome => match self.moves.last_mut() {
                Some(latest) => latest.outcomes.push(outcome),
                None => return Err(EngineError::OrphanEvent),
            },
        }

        if up_to_date {
            self.state = end_state.clone();
            self.index = self.last_index();
        }
        self.end_state = end_state;

        Ok(())
    }

    pub fn add_many_events<I: IntoIterator<Item = GameEvent>>(&mut self, events: I) -> Result<()> {
        for event in events {
            self.add_event(event)?;
        }
        Ok(())
    }

    /// Play a legal placement at the live end and record the outcomes it causes
    ///
    /// Returns the outcome events recorded after the placement.
    pub fn play(&mut self, placement: TilePlacement) -> Result<Vec<GameEvent>> {
        if !self.is_at_end() {
            return Err(EngineError::NotAtEnd);
        }
        if !rules::is_playable(&self.state, placement) {
            return Err(EngineError::IllegalMove {
                grid: placement.grid,
                tile: placement.tile,
            });
        }

        self.add_event(GameEvent::TilePlaced(placement))?;

        let outcomes = rules::find_wins(&self.state);
        for outcome in &outcomes {
            self.add_event(*outcome)?;
        }

        Ok(outcomes)
    }

    /// Drop all moves and return to the empty board
    pub fn clear(&mut self) {
        self.moves.clear();
        self.end_state = Snapshot::new();
        self.go_to_beginning();
    }

    // ========================================================================
    // NAVIGATION
    // ========================================================================

    /// Apply the next move; `false` when already at the last move
    pub fn next(&mut self) -> Result<bool> {
        if self.is_at_end() {
            return Ok(false);
        }

        let upcoming = &self.moves[(self.index + 1) as usize];
        let state = upcoming
            .events()
            .try_fold(self.state.clone(), |state, event| apply(&state, &event))?;

        self.state = state;
        self.index += 1;
        Ok(true)
    }

    /// Undo the current move; `false` when already before the first move
    pub fn previous(&mut self) -> Result<bool> {
        if self.index == BEFORE_FIRST_MOVE {
            return Ok(false);
        }

        let current = &self.moves[self.index as usize];
        let state = current
            .events()
            .rev()
            .try_fold(self.state.clone(), |state, event| undo(&state, &event))?;

        self.state = state;
        self.index -= 1;
        Ok(true)
    }

    pub fn go_to_beginning(&mut self) {
        self.index = BEFORE_FIRST_MOVE;
        self.state = Snapshot::new();
    }

    pub fn go_to_end(&mut self) -> Result<()> {
        while self.next()? {}
        Ok(())
    }

    /// Move the cursor to `position`, taking the cheaper route
    ///
    /// Walking back further than `position + 1` moves is replaced by a reset
    /// followed by walking forward.
    pub fn go_to_position(&mut self, position: isize) -> Result<()> {
        let len = self.moves.len();
        if position < BEFORE_FIRST_MOVE || position >= len as isize {
            return Err(EngineError::PositionOutOfBounds { position, len });
        }

        let mut delta = position - self.index;

        if -delta > position + 1 {
            tracing::debug!(from = self.index, to = position, "resetting and replaying forward");
            self.go_to_beginning();
            delta = position + 1;
        }

        while delta != 0 {
            if delta < 0 {
                if !self.previous()? {
                    break;
                }
                delta += 1;
            } else {
                if !self.next()? {
                    break;
                }
                delta -= 1;
            }
        }

        if self.index != position {
            return Err(EngineError::NavigationConsistencyFailure {
                expected: position,
                actual: self.index,
            });
        }

        Ok(())
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Live snapshot at the cursor
    pub fn grid(&self) -> &Snapshot {
        &self.state
    }

    /// Number of moves
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Cursor, `-1` before the first move
    pub fn position(&self) -> isize {
        self.index
    }

    pub fn is_at_end(&self) -> bool {
        self.index == self.last_index()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// One placement per move, for a move listing
    pub fn to_move_list(&self) -> Vec<TilePlacement> {
        self.moves.iter().map(Move::placement).collect()
    }

    /// Every recorded event in order
    pub fn events(&self) -> Vec<GameEvent> {
        self.moves.iter().flat_map(Move::events).collect()
    }

    fn last_index(&self) -> isize {
        self.moves.len() as isize - 1
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}
