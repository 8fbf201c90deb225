//! Error types for move application and move selection.

use derive_more::{Display, Error};

/// Error that can occur when placing a mark.
///
/// Callers driving a UI treat every variant as an ignored input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlaceError {
    /// The index is outside 0-8.
    #[display("Position {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(#[error(not(source))] usize),

    /// The square at the index already holds a mark.
    #[display("Square {} is already occupied", _0)]
    Occupied(#[error(not(source))] usize),

    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,
}

/// Error returned by the move selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum AiError {
    /// Selector called on a board with no empty squares.
    #[display("No empty squares to choose from")]
    NoEmptyCells,
}
