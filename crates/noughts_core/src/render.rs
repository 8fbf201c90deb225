//! Presentation-neutral description of the game for a UI layer.

use serde::{Deserialize, Serialize};

use crate::engine::{Game, GameEnd};
use crate::rules::WinningLine;
use crate::types::{Player, Square};

/// What to draw in one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Glyph {
    /// Nothing drawn.
    Blank,
    /// The X mark.
    Cross,
    /// The O mark.
    Nought,
}

impl From<Player> for Glyph {
    fn from(player: Player) -> Self {
        match player {
            Player::X => Glyph::Cross,
            Player::O => Glyph::Nought,
        }
    }
}

/// Render instruction for a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRender {
    /// Board index 0-8.
    pub index: usize,
    /// Mark to draw.
    pub glyph: Glyph,
    /// Part of the winning line.
    pub highlighted: bool,
}

/// Builds the render instruction for one cell.
pub fn cell(index: usize, square: Square, winning_line: Option<WinningLine>) -> CellRender {
    CellRender {
        index,
        glyph: square.player().map_or(Glyph::Blank, Glyph::from),
        highlighted: winning_line.is_some_and(|line| line.contains(index)),
    }
}

/// Render instructions for all nine cells of `game`.
pub fn cells(game: &Game) -> [CellRender; 9] {
    let line = match game.game_end() {
        Some(GameEnd::Won { line, .. }) => Some(line),
        _ => None,
    };
    let squares = game.board().squares();
    std::array::from_fn(|index| cell(index, squares[index], line))
}

/// "Player X's turn".
pub fn turn_text(player: Player) -> String {
    format!("Player {player}'s turn")
}

/// "Player X Wins!" or "Game Draw!".
pub fn end_message(end: GameEnd) -> String {
    match end {
        GameEnd::Won { player, .. } => format!("Player {player} Wins!"),
        GameEnd::Draw => "Game Draw!".to_string(),
    }
}

/// Status line for the current state of `game`.
pub fn status_text(game: &Game) -> String {
    match game.game_end() {
        Some(end) => end_message(end),
        None => turn_text(game.current_player()),
    }
}
