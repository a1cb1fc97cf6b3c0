//! Text rendering of boards and move lists

use uttt_core::{Player, Snapshot, TilePlacement, Timeline, Winner, GRID_SIZE};

const EMPTY_TILE: char = '.';

/// Nine-by-nine board, sub-boards laid out row-major like their tiles
pub fn board(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    for big_row in 0..3 {
        if big_row > 0 {
            out.push_str("------+-------+------\n");
        }
        for tile_row in 0..3 {
            let cells: Vec<String> = (0..3)
                .map(|big_col| {
                    let grid = big_col + 3 * big_row;
                    (0..3)
                        .map(|tile_col| tile_char(snapshot.tile(grid, tile_col + 3 * tile_row)).to_string())
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect();
            out.push_str(&cells.join(" | "));
            out.push('\n');
        }
    }

    out
}

/// One line of status: move counter, side to move, constraint, outcome
pub fn status(timeline: &Timeline) -> String {
    let snapshot = timeline.grid();
    let next_grid = snapshot
        .next_grid()
        .map_or_else(|| "any".to_string(), |g| g.to_string());
    let winner = snapshot.winner().map_or("-", winner_label);

    format!(
        "Move {}/{}  Next: {}  Grid: {}  Winner: {}",
        timeline.position() + 1,
        timeline.len(),
        snapshot.next_player().to_char(),
        next_grid,
        winner
    )
}

/// Decided sub-boards, e.g. `0:R 4:S`
pub fn sub_board_outcomes(snapshot: &Snapshot) -> String {
    (0..GRID_SIZE)
        .filter_map(|g| snapshot.sub_grid_winner(g).map(|w| format!("{}:{}", g, w.to_char())))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Numbered move list, one line per pair of moves: `1. 4 0  0 4`
pub fn move_list(moves: &[TilePlacement]) -> String {
    moves
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            let pair: Vec<String> = pair.iter().map(ToString::to_string).collect();
            format!("{}. {}\n", i + 1, pair.join("  "))
        })
        .collect()
}

pub fn winner_label(winner: Winner) -> &'static str {
    match winner {
        Winner::Red => "Red",
        Winner::Blue => "Blue",
        Winner::Stalemate => "Stalemate",
    }
}

fn tile_char(tile: Option<Player>) -> char {
    tile.map_or(EMPTY_TILE, Player::to_char)
}
