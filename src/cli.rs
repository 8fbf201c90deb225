//! Command-line interface for noughts.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use noughts_core::{Board, CELL_COUNT, Difficulty, Player};

use crate::preferences::DEFAULT_PREFS_PATH;

/// Noughts - tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe with an optional computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Preference file (created on first change)
        #[arg(long, default_value = DEFAULT_PREFS_PATH)]
        prefs: PathBuf,

        /// Start with the computer playing O
        #[arg(long)]
        ai: bool,
    },

    /// Print the effective preferences as JSON
    Prefs {
        /// Preference file to read
        #[arg(long, default_value = DEFAULT_PREFS_PATH)]
        prefs: PathBuf,
    },

    /// Print the square the computer would pick for O
    AiMove {
        /// Board as nine characters, row by row: X, O, or . for empty
        #[arg(long, value_parser = parse_board)]
        board: Board,

        /// Difficulty tier (easy, medium, hard)
        #[arg(long, default_value = "hard")]
        difficulty: Difficulty,

        /// Seed for the random source
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Parses a board written as nine characters, e.g. `XX.O.....`.
///
/// `X`/`x` and `O`/`o` are marks; `.`, `-` and `_` are empty squares.
pub fn parse_board(s: &str) -> Result<Board, String> {
    let chars: Vec<char> = s.trim().chars().collect();
    if chars.len() != CELL_COUNT {
        return Err(format!(
            "expected {} squares, got {}",
            CELL_COUNT,
            chars.len()
        ));
    }

    let mut board = Board::new();
    for (pos, c) in chars.into_iter().enumerate() {
        let player = match c {
            'X' | 'x' => Player::X,
            'O' | 'o' => Player::O,
            '.' | '-' | '_' => continue,
            other => return Err(format!("unexpected character '{}' at {}", other, pos + 1)),
        };
        board.place(pos, player).map_err(|e| e.to_string())?;
    }
    Ok(board)
}
