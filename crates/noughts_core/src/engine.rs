//! Turn engine for tic-tac-toe.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::PlaceError;
use crate::rules::{WinningLine, is_full, is_winner, winning_line_for};
use crate::types::{Board, GameStatus, Player};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEnd {
    /// A player completed a line.
    Won {
        /// The winning player.
        player: Player,
        /// The first completed line, for highlighting.
        line: WinningLine,
    },
    /// The board filled with no line completed.
    Draw,
}

/// Tic-tac-toe game: board, player to move and status.
///
/// A new game always starts with X to move. Once the status is `Won` or
/// `Draw` every further placement is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Game {
    /// The board.
    board: Board,
    /// Player whose turn it is.
    #[getter(copy)]
    current_player: Player,
    /// Game status.
    #[getter(copy)]
    status: GameStatus,
}

impl Game {
    /// Creates a new game with X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            status: GameStatus::InProgress,
        }
    }

    /// Places the current player's mark at `pos` (0-8).
    ///
    /// Returns the status after the move.
    ///
    /// # Errors
    ///
    /// [`PlaceError::GameOver`] once the game is won or drawn, otherwise any
    /// error from [`Board::place`]. The game is unchanged on error.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn place(&mut self, pos: usize) -> Result<GameStatus, PlaceError> {
        if self.status.is_terminal() {
            return Err(PlaceError::GameOver);
        }

        let player = self.current_player;
        self.board.place(pos, player)?;

        if is_winner(&self.board, player) {
            self.status = GameStatus::Won(player);
        } else if is_full(&self.board) {
            self.status = GameStatus::Draw;
        } else {
            self.current_player = player.opponent();
        }

        debug!(status = ?self.status, "Move applied");
        Ok(self.status)
    }

    /// True once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }

    /// Describes how the game ended, or `None` while it is in progress.
    pub fn game_end(&self) -> Option<GameEnd> {
        match self.status {
            GameStatus::InProgress => None,
            GameStatus::Draw => Some(GameEnd::Draw),
            GameStatus::Won(player) => {
                winning_line_for(&self.board, player).map(|line| GameEnd::Won { player, line })
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    #[test]
    fn test_x_moves_first_and_turns_alternate() {
        let mut game = Game::new();
        assert_eq!(game.current_player(), Player::X);
        game.place(4).unwrap();
        assert_eq!(game.current_player(), Player::O);
        game.place(0).unwrap();
        assert_eq!(game.current_player(), Player::X);
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut game = Game::new();
        game.place(4).unwrap();
        let before = game.clone();
        assert_eq!(game.place(4), Err(PlaceError::Occupied(4)));
        assert_eq!(game.place(12), Err(PlaceError::OutOfBounds(12)));
        assert_eq!(game, before);
    }

    #[test]
    fn test_win_is_terminal() {
        let mut game = Game::new();
        for pos in [0, 3, 1, 4] {
            game.place(pos).unwrap();
        }
        assert_eq!(game.place(2), Ok(GameStatus::Won(Player::X)));
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.place(5), Err(PlaceError::GameOver));
        assert_eq!(game.board().get(5), Some(Square::Empty));
        assert_eq!(
            game.game_end(),
            Some(GameEnd::Won {
                player: Player::X,
                line: crate::rules::WINNING_LINES[0],
            })
        );
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let mut game = Game::new();
        // X O X / X O O / O X X
        for pos in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            game.place(pos).unwrap();
        }
        assert_eq!(game.status(), GameStatus::Draw);
        assert_eq!(game.game_end(), Some(GameEnd::Draw));
        assert_eq!(game.winner(), None);
    }
}
