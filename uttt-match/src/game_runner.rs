//! Game runner - executes single games
//!
//! Level 3 - Step-level implementation

use serde::{Deserialize, Serialize};
use uttt_core::{Agent, GameEvent, GameHistory, Player, RandomAgent, Result, TilePlacement, Timeline, Winner};

/// A finished game between agent A and agent B
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Game index within the match (0-based)
    pub index: usize,
    /// Every recorded event
    pub events: Vec<GameEvent>,
    /// Game outcome (None if the agents stopped early)
    pub overall_winner: Option<Winner>,
    /// True if agent A played Red this game
    pub a_is_red: bool,
}

impl GameRecord {
    /// Check if agent A won
    pub fn a_wins(&self) -> bool {
        self.winning_player() == Some(self.a_player())
    }

    /// Check if agent B won
    pub fn b_wins(&self) -> bool {
        self.winning_player() == Some(self.a_player().opponent())
    }

    /// Check if game is a draw
    pub fn is_draw(&self) -> bool {
        self.winning_player().is_none()
    }

    /// Number of placements
    pub fn moves(&self) -> usize {
        self.events.iter().filter(|e| e.is_placement()).count()
    }

    pub fn history(&self) -> GameHistory {
        GameHistory {
            events: self.events.clone(),
            overall_winner: self.overall_winner,
        }
    }

    fn a_player(&self) -> Player {
        if self.a_is_red {
            Player::Red
        } else {
            Player::Blue
        }
    }

    fn winning_player(&self) -> Option<Player> {
        self.overall_winner.and_then(Winner::player)
    }
}

/// Play one game to completion, Red moving first
///
/// Returns the hydrated timeline, cursor at the end.
pub fn play_game<R: Agent, B: Agent>(red: &mut R, blue: &mut B) -> Result<Timeline> {
    let mut timeline = Timeline::new();

    while !timeline.grid().is_over() {
        let choice: Option<TilePlacement> = match timeline.grid().next_player() {
            Player::Red => red.next_move(timeline.grid()),
            Player::Blue => blue.next_move(timeline.grid()),
        };

        match choice {
            Some(placement) => {
                timeline.play(placement)?;
            }
            None => break,
        }
    }

    Ok(timeline)
}

/// Play game `index` between two random agents seeded from `seed`
pub fn play_random_game(index: usize, a_is_red: bool, seed: u64) -> Result<GameRecord> {
    let mut agent_a = RandomAgent::with_seed(seed);
    let mut agent_b = RandomAgent::with_seed(seed.wrapping_add(1));

    let timeline = if a_is_red {
        play_game(&mut agent_a, &mut agent_b)?
    } else {
        play_game(&mut agent_b, &mut agent_a)?
    };

    let record = GameRecord {
        index,
        events: timeline.events(),
        overall_winner: timeline.grid().winner(),
        a_is_red,
    };
    tracing::debug!(index, moves = record.moves(), winner = ?record.overall_winner, "game finished");

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plays the first listed placement that is still playable
    struct Scripted(Vec<TilePlacement>);

    impl Agent for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn next_move(&mut self, snapshot: &uttt_core::Snapshot) -> Option<TilePlacement> {
            let pos = self.0.iter().position(|&p| uttt_core::is_playable(snapshot, p))?;
            Some(self.0.remove(pos))
        }
    }

    #[test]
    fn test_play_random_game_completes() {
        let record = play_random_game(0, true, 42).unwrap();
        assert!(record.overall_winner.is_some());
        assert!(record.moves() >= 17);
        assert!(record.a_wins() || record.b_wins() || record.is_draw());
    }

    #[test]
    fn test_play_random_game_deterministic() {
        assert_eq!(play_random_game(3, false, 9).unwrap(), play_random_game(3, false, 9).unwrap());
    }

    #[test]
    fn test_agent_stops_early() {
        let mut red = Scripted(vec![TilePlacement::new(4, 0)]);
        let mut blue = Scripted(vec![]);
        let timeline = play_game(&mut red, &mut blue).unwrap();
        assert_eq!(timeline.len(), 1);
        assert!(!timeline.grid().is_over());
    }

    #[test]
    fn test_game_record_winner() {
        let record = GameRecord {
            index: 0,
            events: vec![GameEvent::placed(4, 0), GameEvent::OverallWon { winner: Winner::Blue }],
            overall_winner: Some(Winner::Blue),
            a_is_red: false,
        };
        assert!(record.a_wins());
        assert!(!record.b_wins());
        assert_eq!(record.moves(), 1);
        assert_eq!(record.history().overall_winner, Some(Winner::Blue));

        let draw = GameRecord {
            overall_winner: Some(Winner::Stalemate),
            ..record
        };
        assert!(draw.is_draw());
    }
}
