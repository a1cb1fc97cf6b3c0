//! Board geometry, players and outcomes

use serde::{Deserialize, Serialize};

/// Number of sub-boards on the meta-board, and of tiles within a sub-board
pub const GRID_SIZE: usize = 9;

/// Player who moves first in every game
pub const FIRST_PLAYER: Player = Player::Red;

/// The eight three-in-a-row lines of a 3x3 board, cells laid out row-major
/// (index = x + 3 * y)
pub const WIN_LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Tiles of one sub-board; `None` is an empty tile
pub type SubGrid = [Option<Player>; GRID_SIZE];

/// An empty sub-board
pub const EMPTY_SUB_GRID: SubGrid = [None; GRID_SIZE];

/// Player colour. Red is player A, Blue is player B.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "B")]
    Blue,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Player::Red => 'R',
            Player::Blue => 'B',
        }
    }
}

/// Outcome of a sub-board or of the whole game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "B")]
    Blue,
    #[serde(rename = "S")]
    Stalemate,
}

impl Winner {
    /// The winning player, `None` for a stalemate
    pub fn player(self) -> Option<Player> {
        match self {
            Winner::Red => Some(Player::Red),
            Winner::Blue => Some(Player::Blue),
            Winner::Stalemate => None,
        }
    }

    pub fn is_stalemate(self) -> bool {
        matches!(self, Winner::Stalemate)
    }

    pub fn to_char(self) -> char {
        match self {
            Winner::Red => 'R',
            Winner::Blue => 'B',
            Winner::Stalemate => 'S',
        }
    }
}

impl From<Player> for Winner {
    fn from(player: Player) -> Self {
        match player {
            Player::Red => Winner::Red,
            Player::Blue => Winner::Blue,
        }
    }
}

/// Check that a sub-board or tile index is on the board
pub fn is_valid_index(index: usize) -> bool {
    index < GRID_SIZE
}
