//! Game events and their wire format
//!
//! The backend distinguishes events purely by key shape:
//! - `{"g": 4, "t": 0}` a tile placement
//! - `{"g": 4, "w": "R"}` a sub-board outcome
//! - `{"overall": "R"}` the game outcome

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::board::{is_valid_index, Winner};
use crate::error::{EngineError, Result};

/// A (sub-board, tile) pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePlacement {
    #[serde(rename = "g")]
    pub grid: usize,
    #[serde(rename = "t")]
    pub tile: usize,
}

impl TilePlacement {
    pub const fn new(grid: usize, tile: usize) -> Self {
        Self { grid, tile }
    }

    /// Both indices lie on the board
    pub fn is_valid(&self) -> bool {
        is_valid_index(self.grid) && is_valid_index(self.tile)
    }
}

impl fmt::Display for TilePlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.grid, self.tile)
    }
}

/// A discrete, immutable game event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GameEvent {
    /// The player to move occupies a tile
    TilePlaced(TilePlacement),
    /// A sub-board's outcome is recorded
    SubBoardWon {
        #[serde(rename = "g")]
        grid: usize,
        #[serde(rename = "w")]
        winner: Winner,
    },
    /// The game's outcome is recorded
    OverallWon {
        #[serde(rename = "overall")]
        winner: Winner,
    },
}

impl GameEvent {
    pub fn placed(grid: usize, tile: usize) -> Self {
        GameEvent::TilePlaced(TilePlacement::new(grid, tile))
    }

    pub fn placement(&self) -> Option<TilePlacement> {
        match self {
            GameEvent::TilePlaced(placement) => Some(*placement),
            _ => None,
        }
    }

    pub fn is_placement(&self) -> bool {
        matches!(self, GameEvent::TilePlaced(_))
    }

    /// Decode a single JSON event by key shape
    pub fn from_value(value: &Value) -> Result<Self> {
        let raw = RawEvent::deserialize(value)
            .map_err(|_| EngineError::UnknownEventKind(value.to_string()))?;
        GameEvent::try_from(raw)
    }
}

/// Decode a JSON array of events
pub fn parse_events(json: &str) -> Result<Vec<GameEvent>> {
    let values: Vec<Value> =
        serde_json::from_str(json).map_err(|e| EngineError::Feed(e.to_string()))?;
    values.iter().map(GameEvent::from_value).collect()
}

/// Every key any event shape may carry
#[derive(Debug, Default, Deserialize)]
struct RawEvent {
    g: Option<usize>,
    t: Option<usize>,
    w: Option<Winner>,
    overall: Option<Winner>,
}

impl TryFrom<RawEvent> for GameEvent {
    type Error = EngineError;

    fn try_from(raw: RawEvent) -> Result<Self> {
        match raw {
            RawEvent { overall: Some(winner), .. } => Ok(GameEvent::OverallWon { winner }),
            RawEvent { g: Some(grid), t: Some(tile), .. } => {
                let placement = TilePlacement::new(grid, tile);
                if !placement.is_valid() {
                    return Err(EngineError::IndexOutOfRange { grid, tile });
                }
                Ok(GameEvent::TilePlaced(placement))
            }
            RawEvent { g: Some(grid), w: Some(winner), .. } => {
                if !is_valid_index(grid) {
                    return Err(EngineError::IndexOutOfRange { grid, tile: 0 });
                }
                Ok(GameEvent::SubBoardWon { grid, winner })
            }
            other => Err(EngineError::UnknownEventKind(format!("{:?}", other))),
        }
    }
}

impl<'de> Deserialize<'de> for GameEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawEvent::deserialize(deserializer)?;
        GameEvent::try_from(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_each_shape() {
        assert_eq!(
            GameEvent::from_value(&json!({"g": 4, "t": 0})).unwrap(),
            GameEvent::placed(4, 0)
        );
        assert_eq!(
            GameEvent::from_value(&json!({"g": 2, "w": "S"})).unwrap(),
            GameEvent::SubBoardWon { grid: 2, winner: Winner::Stalemate }
        );
        assert_eq!(
            GameEvent::from_value(&json!({"overall": "B"})).unwrap(),
            GameEvent::OverallWon { winner: Winner::Blue }
        );
    }

    #[test]
    fn test_unknown_shape_rejected() {
        let err = GameEvent::from_value(&json!({"x": 1})).unwrap_err();
        assert!(matches!(err, EngineError::UnknownEventKind(_)));

        let err = GameEvent::from_value(&json!("M 1 2")).unwrap_err();
        assert!(matches!(err, EngineError::UnknownEventKind(_)));

        // A tile without its grid is not a placement
        let err = GameEvent::from_value(&json!({"t": 3})).unwrap_err();
        assert!(matches!(err, EngineError::UnknownEventKind(_)));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = GameEvent::from_value(&json!({"g": 9, "t": 0})).unwrap_err();
        assert_eq!(err, EngineError::IndexOutOfRange { grid: 9, tile: 0 });
    }

    #[test]
    fn test_serialize_matches_wire_shape() {
        let json = serde_json::to_value(GameEvent::placed(1, 7)).unwrap();
        assert_eq!(json, json!({"g": 1, "t": 7}));
        let json = serde_json::to_value(GameEvent::OverallWon { winner: Winner::Red }).unwrap();
        assert_eq!(json, json!({"overall": "R"}));
    }

    #[test]
    fn test_parse_events_array() {
        let events = parse_events(r#"[{"g":4,"t":0},{"g":4,"w":"R"},{"overall":"R"}]"#).unwrap();
        assert_eq!(events.len(), 3);
        assert!(events[0].is_placement());
        assert_eq!(events[0].placement(), Some(TilePlacement::new(4, 0)));
        assert!(!events[2].is_placement());
    }

    #[test]
    fn test_display_move_label() {
        assert_eq!(TilePlacement::new(3, 8).to_string(), "3 8");
    }
}
