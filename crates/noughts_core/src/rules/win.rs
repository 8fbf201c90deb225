//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Player, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Three board indices that win when held by one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine([usize; 3]);

impl WinningLine {
    /// The three indices of this line, in ascending order.
    pub fn indices(self) -> [usize; 3] {
        self.0
    }

    /// True if `pos` is one of the three cells of this line.
    pub fn contains(self, pos: usize) -> bool {
        self.0.contains(&pos)
    }

    /// True if every cell of the line holds `player`'s mark.
    pub fn is_owned_by(self, board: &Board, player: Player) -> bool {
        self.0
            .iter()
            .all(|&pos| board.get(pos) == Some(Square::Occupied(player)))
    }
}

/// The eight winning lines, in enumeration order.
pub const WINNING_LINES: [WinningLine; 8] = [
    // Rows
    WinningLine([0, 1, 2]),
    WinningLine([3, 4, 5]),
    WinningLine([6, 7, 8]),
    // Columns
    WinningLine([0, 3, 6]),
    WinningLine([1, 4, 7]),
    WinningLine([2, 5, 8]),
    // Diagonals
    WinningLine([0, 4, 8]),
    WinningLine([2, 4, 6]),
];

/// Checks whether `player` holds any winning line.
#[instrument(skip(board))]
pub fn is_winner(board: &Board, player: Player) -> bool {
    WINNING_LINES
        .iter()
        .any(|line| line.is_owned_by(board, player))
}

/// The first winning line (in enumeration order) held by `player`.
#[instrument(skip(board))]
pub fn winning_line_for(board: &Board, player: Player) -> Option<WinningLine> {
    WINNING_LINES
        .iter()
        .copied()
        .find(|line| line.is_owned_by(board, player))
}

/// Returns the player holding a winning line, if any.
///
/// X is checked first; in reachable games at most one player can win.
#[instrument(skip(board))]
pub fn winner(board: &Board) -> Option<Player> {
    [Player::X, Player::O]
        .into_iter()
        .find(|&player| is_winner(board, player))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(positions: &[usize], player: Player) -> Board {
        let mut board = Board::new();
        for &pos in positions {
            board.place(pos, player).unwrap();
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert!(!is_winner(&board, Player::X));
        assert!(!is_winner(&board, Player::O));
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_every_line_wins_for_both_players() {
        for line in WINNING_LINES {
            for player in [Player::X, Player::O] {
                let board = board_with(&line.indices(), player);
                assert!(is_winner(&board, player), "{line:?} for {player}");
                assert!(!is_winner(&board, player.opponent()));
                assert_eq!(winning_line_for(&board, player), Some(line));
            }
        }
    }

    #[test]
    fn test_is_winner_matches_line_definition_on_all_boards() {
        // Every assignment of {Empty, X, O} to the nine squares.
        for code in 0..3u32.pow(9) {
            let mut board = Board::new();
            let mut rest = code;
            for pos in 0..9 {
                match rest % 3 {
                    1 => board.place(pos, Player::X).unwrap(),
                    2 => board.place(pos, Player::O).unwrap(),
                    _ => {}
                }
                rest /= 3;
            }
            for player in [Player::X, Player::O] {
                let expected = WINNING_LINES.iter().any(|line| {
                    line.indices()
                        .iter()
                        .all(|&pos| board.get(pos) == Some(Square::Occupied(player)))
                });
                assert_eq!(is_winner(&board, player), expected, "code {code}");
            }
        }
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(&[0, 1], Player::X);
        assert!(!is_winner(&board, Player::X));
    }

    #[test]
    fn test_winning_line_prefers_enumeration_order() {
        // X holds both the top row and the left column.
        let board = board_with(&[0, 1, 2, 3, 6], Player::X);
        assert_eq!(
            winning_line_for(&board, Player::X).map(WinningLine::indices),
            Some([0, 1, 2])
        );
    }
}
