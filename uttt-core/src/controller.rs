//! Human-versus-agent practice games

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::board::{Player, FIRST_PLAYER};
use crate::error::{EngineError, Result};
use crate::event::{GameEvent, TilePlacement};
use crate::snapshot::Snapshot;
use crate::timeline::Timeline;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Agent opens the game as the first player
    pub agent_plays_first: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            agent_plays_first: true,
        }
    }
}

impl ControllerConfig {
    pub fn with_agent_first(mut self, agent_plays_first: bool) -> Self {
        self.agent_plays_first = agent_plays_first;
        self
    }
}

/// A live game where a human plays against an agent
///
/// Every human placement is answered by the agent until the game is decided.
pub struct PlayableGame<A: Agent> {
    timeline: Timeline,
    agent: A,
    config: ControllerConfig,
}

impl<A: Agent> PlayableGame<A> {
    pub fn new(agent: A, config: ControllerConfig) -> Result<Self> {
        let mut game = Self {
            timeline: Timeline::new(),
            agent,
            config,
        };
        game.open()?;
        Ok(game)
    }

    /// Start over with an empty board
    pub fn reset(&mut self) -> Result<&Snapshot> {
        self.timeline.clear();
        self.agent.reset();
        self.open()?;
        Ok(self.timeline.grid())
    }

    pub fn grid(&self) -> &Snapshot {
        self.timeline.grid()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// For reviewing history; placing tiles requires the cursor back at the end
    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn human_player(&self) -> Player {
        if self.config.agent_plays_first {
            FIRST_PLAYER.opponent()
        } else {
            FIRST_PLAYER
        }
    }

    /// Place the human's tile, then let the agent answer
    ///
    /// Returns every event recorded by this call in order.
    pub fn place_tile(&mut self, grid: usize, tile: usize) -> Result<Vec<GameEvent>> {
        if !self.timeline.is_at_end() {
            return Err(EngineError::NotAtEnd);
        }

        let placement = TilePlacement::new(grid, tile);
        let mut recorded = vec![GameEvent::TilePlaced(placement)];
        recorded.extend(self.timeline.play(placement)?);

        if !self.grid().is_over() {
            recorded.extend(self.agent_turn()?);
        }

        Ok(recorded)
    }

    fn open(&mut self) -> Result<()> {
        if self.config.agent_plays_first {
            self.agent_turn()?;
        }
        Ok(())
    }

    fn agent_turn(&mut self) -> Result<Vec<GameEvent>> {
        let Some(placement) = self.agent.next_move(self.timeline.grid()) else {
            return Ok(Vec::new());
        };
        tracing::debug!(agent = self.agent.name(), %placement, "agent move");

        let mut recorded = vec![GameEvent::TilePlaced(placement)];
        recorded.extend(self.timeline.play(placement)?);
        Ok(recorded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::RandomAgent;
    use crate::rules::playable_tiles;

    #[test]
    fn test_agent_opens_by_default() {
        let game = PlayableGame::new(RandomAgent::with_seed(42), ControllerConfig::default()).unwrap();
        assert_eq!(game.timeline().len(), 1);
        assert_eq!(game.human_player(), Player::Blue);
        assert_eq!(game.grid().next_player(), Player::Blue);
    }

    #[test]
    fn test_human_opens() {
        let config = ControllerConfig::default().with_agent_first(false);
        let mut game = PlayableGame::new(RandomAgent::with_seed(42), config).unwrap();
        assert!(game.timeline().is_empty());
        assert_eq!(game.human_player(), Player::Red);

        let events = game.place_tile(4, 4).unwrap();
        assert_eq!(events[0], GameEvent::placed(4, 4));
        assert_eq!(game.timeline().len(), 2);
        assert_eq!(game.grid().next_player(), Player::Red);
    }

    #[test]
    fn test_illegal_move_rejected() {
        let config = ControllerConfig::default().with_agent_first(false);
        let mut game = PlayableGame::new(RandomAgent::with_seed(3), config).unwrap();
        game.place_tile(4, 4).unwrap();

        let err = game.place_tile(4, 4).unwrap_err();
        assert_eq!(err, EngineError::IllegalMove { grid: 4, tile: 4 });
        assert_eq!(game.timeline().len(), 2);
    }

    #[test]
    fn test_place_tile_while_reviewing() {
        let mut game = PlayableGame::new(RandomAgent::with_seed(42), ControllerConfig::default()).unwrap();
        game.timeline_mut().go_to_beginning();
        assert_eq!(game.place_tile(0, 0).unwrap_err(), EngineError::NotAtEnd);
    }

    #[test]
    fn test_plays_to_completion() {
        let mut game = PlayableGame::new(RandomAgent::with_seed(11), ControllerConfig::default()).unwrap();
        let mut human = RandomAgent::with_seed(12);

        while !game.grid().is_over() {
            let placement = human.next_move(game.grid()).unwrap();
            game.place_tile(placement.grid, placement.tile).unwrap();
        }
        assert!(playable_tiles(game.grid()).is_empty());

        let snapshot = game.reset().unwrap();
        assert!(!snapshot.is_over());
        assert_eq!(game.timeline().len(), 1);
    }
}
