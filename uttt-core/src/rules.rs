//! Playable-move policy and win detection
//!
//! Everything here is a pure function of a [`Snapshot`].

use crate::board::{Player, SubGrid, Winner, GRID_SIZE, WIN_LINES};
use crate::event::{GameEvent, TilePlacement};
use crate::snapshot::Snapshot;

/// Owner of a complete line on a 3x3 board, `None` when no line is complete
fn line_winner<T: Copy + Eq>(cells: &[Option<T>; GRID_SIZE]) -> Option<T> {
    WIN_LINES.iter().find_map(|&[a, b, c]| match (cells[a], cells[b], cells[c]) {
        (Some(x), Some(y), Some(z)) if x == y && y == z => Some(x),
        _ => None,
    })
}

/// Player holding three tiles in a row on this sub-board
pub fn board_winner(cells: &SubGrid) -> Option<Player> {
    line_winner(cells)
}

/// Outcome of a sub-board: a line winner, or a stalemate once it is full
pub fn sub_board_outcome(cells: &SubGrid) -> Option<Winner> {
    if let Some(player) = board_winner(cells) {
        return Some(player.into());
    }
    if cells.iter().all(Option::is_some) {
        Some(Winner::Stalemate)
    } else {
        None
    }
}

/// Outcome of the game from the recorded sub-board outcomes
///
/// Sub-board outcomes form lines like tiles do, so three stalemates in a row
/// decide the game as a stalemate. The game is also a stalemate once every
/// sub-board is decided without a line.
pub fn overall_outcome(sub_grids_won: &[Option<Winner>; GRID_SIZE]) -> Option<Winner> {
    if let Some(winner) = line_winner(sub_grids_won) {
        return Some(winner);
    }
    if sub_grids_won.iter().all(Option::is_some) {
        Some(Winner::Stalemate)
    } else {
        None
    }
}

/// Sub-boards the next player may play in, ascending
///
/// A `next_grid` pointing at a board that has since been decided (the
/// placement won the very board its tile pointed at) leaves the choice free.
pub fn playable_grids(snapshot: &Snapshot) -> Vec<usize> {
    if snapshot.is_over() {
        return Vec::new();
    }

    match snapshot.next_grid() {
        Some(grid) if snapshot.sub_grid_winner(grid).is_none() => vec![grid],
        _ => (0..GRID_SIZE)
            .filter(|&grid| snapshot.sub_grid_winner(grid).is_none())
            .collect(),
    }
}

/// Every legal placement, grid-ascending then tile-ascending
pub fn playable_tiles(snapshot: &Snapshot) -> Vec<TilePlacement> {
    playable_grids(snapshot)
        .into_iter()
        .flat_map(|grid| {
            (0..GRID_SIZE)
                .filter(move |&tile| snapshot.tile(grid, tile).is_none())
                .map(move |tile| TilePlacement::new(grid, tile))
        })
        .collect()
}

pub fn is_playable(snapshot: &Snapshot, placement: TilePlacement) -> bool {
    placement.is_valid()
        && snapshot.tile(placement.grid, placement.tile).is_none()
        && playable_grids(snapshot).contains(&placement.grid)
}

/// Outcome events caused by the latest placement
///
/// Scans sub-boards in ascending order. Each newly decided, unrecorded
/// sub-board yields a `SubBoardWon`; the game outcome is re-evaluated after
/// each one, and once decided a single `OverallWon` ends the scan.
pub fn find_wins(snapshot: &Snapshot) -> Vec<GameEvent> {
    if snapshot.is_over() {
        return Vec::new();
    }

    let mut won = *snapshot.sub_grids_won();
    let mut events = Vec::new();

    for grid in 0..GRID_SIZE {
        if won[grid].is_some() {
            continue;
        }
        let Some(winner) = sub_board_outcome(snapshot.sub_grid(grid)) else {
            continue;
        };

        won[grid] = Some(winner);
        events.push(GameEvent::SubBoardWon { grid, winner });

        if let Some(overall) = overall_outcome(&won) {
            events.push(GameEvent::OverallWon { winner: overall });
            break;
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::apply;

    const R: Option<Player> = Some(Player::Red);
    const B: Option<Player> = Some(Player::Blue);
    const E: Option<Player> = None;

    fn play(events: &[GameEvent]) -> Snapshot {
        events
            .iter()
            .try_fold(Snapshot::new(), |s, e| apply(&s, e))
            .unwrap()
    }

    #[test]
    fn test_board_winner_row() {
        assert_eq!(board_winner(&[R, R, R, E, E, E, E, E, E]), Some(Player::Red));
    }

    #[test]
    fn test_board_winner_column_and_diagonal() {
        assert_eq!(board_winner(&[E, B, E, E, B, E, E, B, E]), Some(Player::Blue));
        assert_eq!(board_winner(&[E, E, R, E, R, E, R, E, E]), Some(Player::Red));
    }

    #[test]
    fn test_board_winner_none() {
        assert_eq!(board_winner(&[R, B, R, B, R, B, B, R, B]), None);
        assert_eq!(board_winner(&[E; 9]), None);
    }

    #[test]
    fn test_alternating_board_has_diagonal() {
        // A B A / B A B / A B A completes both diagonals for A
        assert_eq!(board_winner(&[R, B, R, B, R, B, R, B, R]), Some(Player::Red));
    }

    #[test]
    fn test_sub_board_outcome_stalemate() {
        assert_eq!(sub_board_outcome(&[R, B, R, B, R, B, B, R, B]), Some(Winner::Stalemate));
        assert_eq!(sub_board_outcome(&[R, B, E, E, E, E, E, E, E]), None);
    }

    #[test]
    fn test_overall_outcome_stalemate_line() {
        let s = Some(Winner::Stalemate);
        let r = Some(Winner::Red);
        assert_eq!(overall_outcome(&[s, s, s, None, None, None, None, None, None]), Some(Winner::Stalemate));
        assert_eq!(overall_outcome(&[s, r, s, None, None, None, None, None, None]), None);
        assert_eq!(overall_outcome(&[r, r, r, None, None, None, None, None, None]), Some(Winner::Red));

        let b = Some(Winner::Blue);
        assert_eq!(overall_outcome(&[r, b, r, b, s, b, b, r, b]), Some(Winner::Stalemate));
    }

    #[test]
    fn test_initial_playable_tiles() {
        let tiles = playable_tiles(&Snapshot::new());
        assert_eq!(tiles.len(), 81);
        assert_eq!(tiles[0], TilePlacement::new(0, 0));
        assert_eq!(tiles[80], TilePlacement::new(8, 8));
        assert!(tiles.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_playable_tiles_constrained() {
        let s = play(&[GameEvent::placed(4, 0)]);
        let tiles = playable_tiles(&s);
        assert_eq!(tiles.len(), 9);
        assert!(tiles.iter().all(|p| p.grid == 0));
    }

    #[test]
    fn test_playable_tiles_skip_won_grids() {
        let s = play(&[
            GameEvent::placed(4, 0),
            GameEvent::SubBoardWon { grid: 0, winner: Winner::Red },
            GameEvent::placed(3, 0),
        ]);
        assert_eq!(s.next_grid(), None);
        let grids = playable_grids(&s);
        assert_eq!(grids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        let tiles = playable_tiles(&s);
        // Grids 3 and 4 each hold one tile
        assert_eq!(tiles.len(), 8 * 9 - 2);
        assert!(!tiles.contains(&TilePlacement::new(4, 0)));
    }

    #[test]
    fn test_no_playable_tiles_after_game_over() {
        let s = play(&[GameEvent::placed(4, 0), GameEvent::OverallWon { winner: Winner::Red }]);
        assert!(playable_tiles(&s).is_empty());
        assert!(!is_playable(&s, TilePlacement::new(0, 0)));
    }

    #[test]
    fn test_is_playable() {
        let s = play(&[GameEvent::placed(4, 0)]);
        assert!(is_playable(&s, TilePlacement::new(0, 4)));
        assert!(!is_playable(&s, TilePlacement::new(1, 4)));
        assert!(!is_playable(&s, TilePlacement::new(0, 9)));
    }

    #[test]
    fn test_find_wins_sub_board() {
        // Red takes the top row of sub-board 4 while Blue answers in 0, 1 and 2
        let s = play(&[
            GameEvent::placed(4, 0),
            GameEvent::placed(0, 4),
            GameEvent::placed(4, 1),
            GameEvent::placed(1, 4),
            GameEvent::placed(4, 2),
        ]);
        assert_eq!(
            find_wins(&s),
            vec![GameEvent::SubBoardWon { grid: 4, winner: Winner::Red }]
        );
    }

    #[test]
    fn test_find_wins_overall_halts_scan() {
        // Red already holds sub-boards 0 and 1, then completes sub-board 2's
        // top row. Blue's top row in sub-board 8 is never reported because
        // the overall win ends the scan.
        let s = play(&[
            GameEvent::SubBoardWon { grid: 0, winner: Winner::Red },
            GameEvent::SubBoardWon { grid: 1, winner: Winner::Red },
            GameEvent::placed(2, 0),
            GameEvent::placed(8, 0),
            GameEvent::placed(2, 1),
            GameEvent::placed(8, 1),
            GameEvent::placed(5, 5),
            GameEvent::placed(8, 2),
            GameEvent::placed(2, 2),
        ]);
        assert_eq!(
            find_wins(&s),
            vec![
                GameEvent::SubBoardWon { grid: 2, winner: Winner::Red },
                GameEvent::OverallWon { winner: Winner::Red },
            ]
        );
    }

    #[test]
    fn test_find_wins_stalemate_line_ends_game() {
        // Sub-boards 0 and 1 are drawn; filling sub-board 2 without a line
        // completes a row of stalemates
        let mut events = vec![
            GameEvent::SubBoardWon { grid: 0, winner: Winner::Stalemate },
            GameEvent::SubBoardWon { grid: 1, winner: Winner::Stalemate },
        ];
        // Fills sub-board 2 as R B R / R B B / B R R
        for (red, blue) in [(0, 1), (2, 4), (3, 5), (7, 6)] {
            events.push(GameEvent::placed(2, red));
            events.push(GameEvent::placed(2, blue));
        }
        events.push(GameEvent::placed(2, 8));
        let s = play(&events);
        assert_eq!(sub_board_outcome(s.sub_grid(2)), Some(Winner::Stalemate));
        assert_eq!(
            find_wins(&s),
            vec![
                GameEvent::SubBoardWon { grid: 2, winner: Winner::Stalemate },
                GameEvent::OverallWon { winner: Winner::Stalemate },
            ]
        );
    }

    #[test]
    fn test_find_wins_nothing_new() {
        assert!(find_wins(&Snapshot::new()).is_empty());
    }
}
