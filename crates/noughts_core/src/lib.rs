//! Pure tic-tac-toe game logic.
//!
//! - **Board**: 3x3 grid of squares with placement checks
//! - **Rules**: win and draw detection over the eight fixed lines
//! - **Engine**: the turn engine (X first, alternate, stop on win/draw)
//! - **AI**: easy/medium/hard heuristic move selection
//! - **Render**: status text and per-cell draw instructions for a UI
//!
//! # Example
//!
//! ```
//! use noughts_core::{Game, GameStatus, Player};
//!
//! let mut game = Game::new();
//! for pos in [0, 3, 1, 4, 2] {
//!     game.place(pos).unwrap();
//! }
//! assert_eq!(game.status(), GameStatus::Won(Player::X));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ai;
mod engine;
mod error;
pub mod render;
pub mod rules;
mod types;

pub use ai::{Difficulty, MEDIUM_SMART_PROBABILITY, select_move};
pub use engine::{Game, GameEnd};
pub use error::{AiError, PlaceError};
pub use rules::{WINNING_LINES, WinningLine};
pub use types::{Board, CELL_COUNT, CENTER, CORNERS, GameStatus, Player, Square};
