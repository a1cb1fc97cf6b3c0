//! Move-choosing agents

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::event::TilePlacement;
use crate::rules::playable_tiles;
use crate::snapshot::Snapshot;

// ============================================================================
// AGENT TRAIT
// ============================================================================

/// Something that picks a placement for the player to move
pub trait Agent {
    fn name(&self) -> &str;

    /// Chosen placement, `None` when nothing is playable
    fn next_move(&mut self, snapshot: &Snapshot) -> Option<TilePlacement>;

    /// Forget any per-game state
    fn reset(&mut self) {}
}

// ============================================================================
// RANDOM AGENT
// ============================================================================

/// Picks uniformly among the playable tiles
pub struct RandomAgent {
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Reproducible agent
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn next_move(&mut self, snapshot: &Snapshot) -> Option<TilePlacement> {
        let moves = playable_tiles(snapshot);
        moves.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Winner;
    use crate::event::GameEvent;
    use crate::rules::is_playable;
    use crate::snapshot::apply;

    #[test]
    fn test_random_agent_picks_playable() {
        let mut agent = RandomAgent::with_seed(42);
        let snapshot = apply(&Snapshot::new(), &GameEvent::placed(4, 0)).unwrap();
        for _ in 0..50 {
            let placement = agent.next_move(&snapshot).unwrap();
            assert!(is_playable(&snapshot, placement));
            assert_eq!(placement.grid, 0);
        }
    }

    #[test]
    fn test_random_agent_deterministic_with_seed() {
        let snapshot = Snapshot::new();
        let mut a = RandomAgent::with_seed(7);
        let mut b = RandomAgent::with_seed(7);
        for _ in 0..10 {
            assert_eq!(a.next_move(&snapshot), b.next_move(&snapshot));
        }
    }

    #[test]
    fn test_random_agent_none_when_over() {
        let snapshot = [GameEvent::placed(4, 0), GameEvent::OverallWon { winner: Winner::Red }]
            .iter()
            .try_fold(Snapshot::new(), |s, e| apply(&s, e))
            .unwrap();
        let mut agent = RandomAgent::with_seed(1);
        assert_eq!(agent.next_move(&snapshot), None);
        assert_eq!(agent.name(), "random");
    }
}
