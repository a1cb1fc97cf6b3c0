//! Match feed: the backend's event stream for a whole match
//!
//! A match is a series of games between agent A and agent B. The feed carries
//! one `game_<n>` entry per game (1-based), a `scores` entry and a
//! `game_winners` entry:
//!
//! ```json
//! {"events": [
//!   {"id": 1, "type": "game_1", "payload": {"type": "GameHistory", "events": [...], "overall_winner": "R"}},
//!   {"id": 2, "type": "scores", "payload": {"type": "Scores", "a_wins": 1, "b_wins": 0, "draws": 0}},
//!   {"id": 3, "type": "game_winners", "payload": {"type": "GameWinners", "winners": ["R"]}}
//! ]}
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::board::Winner;
use crate::error::{EngineError, Result};
use crate::event::GameEvent;
use crate::timeline::Timeline;

const GAME_PREFIX: &str = "game_";
const SCORES: &str = "scores";
const GAME_WINNERS: &str = "game_winners";

// ============================================================================
// PAYLOADS
// ============================================================================

/// Event stream of one game
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHistory {
    pub events: Vec<GameEvent>,
    #[serde(default)]
    pub overall_winner: Option<Winner>,
}

impl GameHistory {
    /// History whose winner is taken from its `OverallWon` event
    pub fn from_events(events: Vec<GameEvent>) -> Self {
        let overall_winner = events.iter().rev().find_map(|event| match event {
            GameEvent::OverallWon { winner } => Some(*winner),
            _ => None,
        });
        Self {
            events,
            overall_winner,
        }
    }
}

/// Match score from agent A's point of view
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub a_wins: u32,
    pub b_wins: u32,
    pub draws: u32,
}

/// Share of games per outcome, in percent
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Percentages {
    pub a_wins: f64,
    pub b_wins: f64,
    pub draws: f64,
}

impl Scores {
    pub fn total(&self) -> u32 {
        self.a_wins + self.b_wins + self.draws
    }

    /// Count one finished game; an undecided game counts as a draw
    pub fn tally(&mut self, winner: Option<Winner>, a_is_red: bool) {
        match winner {
            Some(Winner::Red) if a_is_red => self.a_wins += 1,
            Some(Winner::Blue) if !a_is_red => self.a_wins += 1,
            Some(Winner::Red) | Some(Winner::Blue) => self.b_wins += 1,
            Some(Winner::Stalemate) | None => self.draws += 1,
        }
    }

    /// All zero for an empty match
    pub fn percentages(&self) -> Percentages {
        let total = self.total();
        if total == 0 {
            return Percentages::default();
        }
        let pct = |n: u32| 100.0 * n as f64 / total as f64;
        Percentages {
            a_wins: pct(self.a_wins),
            b_wins: pct(self.b_wins),
            draws: pct(self.draws),
        }
    }
}

/// Payload of a feed entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchEvent {
    GameHistory(GameHistory),
    Scores(Scores),
    GameWinners { winners: Vec<Winner> },
}

// ============================================================================
// FEED
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub payload: Value,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchFeed {
    pub events: Vec<FeedEntry>,
}

// ============================================================================
// MATCH RECORD
// ============================================================================

/// Decoded contents of a match feed
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchRecord {
    games: BTreeMap<u32, GameHistory>,
    scores: Option<Scores>,
    winners: Option<Vec<Winner>>,
}

impl MatchRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode either a match feed or a bare array of game events
    ///
    /// A bare array becomes game 1.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| EngineError::Feed(e.to_string()))?;

        match value {
            Value::Array(items) => {
                let events = items
                    .iter()
                    .map(GameEvent::from_value)
                    .collect::<Result<Vec<_>>>()?;
                let mut record = Self::new();
                record.insert_game(1, GameHistory::from_events(events));
                Ok(record)
            }
            other => {
                let feed: MatchFeed =
                    serde_json::from_value(other).map_err(|e| EngineError::Feed(e.to_string()))?;
                Self::from_feed(&feed)
            }
        }
    }

    /// Decode feed entries, skipping internal and unrecognised ones
    pub fn from_feed(feed: &MatchFeed) -> Result<Self> {
        let mut record = Self::new();

        for entry in &feed.events {
            let kind = entry.event_type.as_str();
            if kind.starts_with('_') {
                tracing::debug!(kind, "skipping internal feed entry");
                continue;
            }

            let game_id = match kind.strip_prefix(GAME_PREFIX) {
                Some(id) => match id.parse::<u32>() {
                    Ok(id) => Some(id),
                    Err(_) if kind == GAME_WINNERS => None,
                    Err(_) => {
                        tracing::warn!(kind, "skipping feed entry with malformed game id");
                        continue;
                    }
                },
                None => None,
            };

            if game_id.is_none() && kind != SCORES && kind != GAME_WINNERS {
                tracing::warn!(kind, "skipping unknown feed entry");
                continue;
            }

            let payload: MatchEvent = serde_json::from_value(entry.payload.clone())
                .map_err(|e| EngineError::Feed(format!("{}: {}", kind, e)))?;

            match (game_id, payload) {
                (Some(id), MatchEvent::GameHistory(history)) => record.insert_game(id, history),
                (None, MatchEvent::Scores(scores)) if kind == SCORES => record.set_scores(scores),
                (None, MatchEvent::GameWinners { winners }) if kind == GAME_WINNERS => {
                    record.set_winners(winners)
                }
                (_, payload) => {
                    return Err(EngineError::Feed(format!(
                        "{} entry carries a mismatched payload: {:?}",
                        kind, payload
                    )))
                }
            }
        }

        Ok(record)
    }

    /// Feed with games in id order, then scores, then winners
    pub fn to_feed(&self) -> Result<MatchFeed> {
        let mut payloads: Vec<(String, MatchEvent)> = self
            .games
            .iter()
            .map(|(id, history)| (format!("{}{}", GAME_PREFIX, id), MatchEvent::GameHistory(history.clone())))
            .collect();
        if let Some(scores) = self.scores {
            payloads.push((SCORES.to_string(), MatchEvent::Scores(scores)));
        }
        if let Some(winners) = &self.winners {
            payloads.push((
                GAME_WINNERS.to_string(),
                MatchEvent::GameWinners {
                    winners: winners.clone(),
                },
            ));
        }

        let events = payloads
            .into_iter()
            .zip(1..)
            .map(|((event_type, payload), id)| {
                Ok(FeedEntry {
                    id: Some(id),
                    event_type,
                    payload: serde_json::to_value(payload).map_err(|e| EngineError::Feed(e.to_string()))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MatchFeed { events })
    }

    pub fn game(&self, id: u32) -> Option<&GameHistory> {
        self.games.get(&id)
    }

    pub fn game_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.games.keys().copied()
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    /// Hydrated timeline of a game, cursor at the end
    pub fn timeline(&self, id: u32) -> Result<Timeline> {
        let history = self
            .game(id)
            .ok_or_else(|| EngineError::Feed(format!("game {} not in match", id)))?;
        Timeline::from_events(history.events.iter().copied())
    }

    pub fn scores(&self) -> Option<Scores> {
        self.scores
    }

    pub fn winners(&self) -> Option<&[Winner]> {
        self.winners.as_deref()
    }

    pub fn insert_game(&mut self, id: u32, history: GameHistory) {
        self.games.insert(id, history);
    }

    pub fn set_scores(&mut self, scores: Scores) {
        self.scores = Some(scores);
    }

    pub fn set_winners(&mut self, winners: Vec<Winner>) {
        self.winners = Some(winners);
    }
}
