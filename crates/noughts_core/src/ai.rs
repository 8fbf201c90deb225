//! Computer opponent: tiered heuristic move selection.
//!
//! None of the tiers search the game tree. Hard plays win, block, center,
//! corner, anything, in that order. Medium flips a coin between the
//! win/block check and a random move. Easy is random.
//!
//! The random source is passed in, so a seeded [`rand::rngs::StdRng`]
//! reproduces every choice.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::AiError;
use crate::rules::is_winner;
use crate::types::{Board, CENTER, CORNERS, Player};

/// Chance that Medium looks for a win or block before moving at random.
pub const MEDIUM_SMART_PROBABILITY: f64 = 0.5;

/// Difficulty tier of the computer opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Uniform random moves.
    #[default]
    Easy,
    /// Half the time win/block, otherwise random.
    Medium,
    /// Win, block, center, corner, anything.
    Hard,
}

impl Difficulty {
    /// The next tier, wrapping from Hard back to Easy.
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

/// Chooses an empty square for `mark` to play.
///
/// The board is read only; win and block probing happens on copies.
///
/// # Errors
///
/// Returns [`AiError::NoEmptyCells`] if the board is full. Callers must not
/// ask for a move on a finished game.
#[instrument(skip(board, rng), fields(empty = board.empty_indices().len()))]
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    mark: Player,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<usize, AiError> {
    let candidates = board.empty_indices();
    if candidates.is_empty() {
        return Err(AiError::NoEmptyCells);
    }

    let choice = match difficulty {
        Difficulty::Easy => pick_random(&candidates, rng)?,
        Difficulty::Medium => medium_move(board, &candidates, mark, rng)?,
        Difficulty::Hard => hard_move(board, &candidates, mark, rng)?,
    };

    debug!(choice, "AI chose position");
    Ok(choice)
}

fn medium_move<R: Rng + ?Sized>(
    board: &Board,
    candidates: &[usize],
    mark: Player,
    rng: &mut R,
) -> Result<usize, AiError> {
    if rng.gen_bool(MEDIUM_SMART_PROBABILITY)
        && let Some(pos) = winning_move(board, candidates, mark)
            .or_else(|| winning_move(board, candidates, mark.opponent()))
    {
        return Ok(pos);
    }
    pick_random(candidates, rng)
}

fn hard_move<R: Rng + ?Sized>(
    board: &Board,
    candidates: &[usize],
    mark: Player,
    rng: &mut R,
) -> Result<usize, AiError> {
    if let Some(pos) = winning_move(board, candidates, mark) {
        return Ok(pos);
    }
    if let Some(pos) = winning_move(board, candidates, mark.opponent()) {
        return Ok(pos);
    }
    if candidates.contains(&CENTER) {
        return Ok(CENTER);
    }

    let corners: Vec<usize> = CORNERS
        .iter()
        .copied()
        .filter(|pos| candidates.contains(pos))
        .collect();
    if !corners.is_empty() {
        return pick_random(&corners, rng);
    }

    pick_random(candidates, rng)
}

/// Lowest candidate where `player`'s mark would complete a line.
fn winning_move(board: &Board, candidates: &[usize], player: Player) -> Option<usize> {
    candidates.iter().copied().find(|&pos| {
        board
            .with_mark(pos, player)
            .is_ok_and(|probe| is_winner(&probe, player))
    })
}

fn pick_random<R: Rng + ?Sized>(candidates: &[usize], rng: &mut R) -> Result<usize, AiError> {
    candidates.choose(rng).copied().ok_or(AiError::NoEmptyCells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::str::FromStr;

    fn board_from(marks: &[(usize, Player)]) -> Board {
        let mut board = Board::new();
        for &(pos, player) in marks {
            board.place(pos, player).unwrap();
        }
        board
    }

    #[test]
    fn test_difficulty_strings() {
        assert_eq!(Difficulty::from_str("medium"), Ok(Difficulty::Medium));
        assert!(Difficulty::from_str("impossible").is_err());
        assert_eq!(Difficulty::Hard.to_string(), "hard");
        assert_eq!(Difficulty::default(), Difficulty::Easy);
    }

    #[test]
    fn test_difficulty_cycles() {
        assert_eq!(Difficulty::Easy.next(), Difficulty::Medium);
        assert_eq!(Difficulty::Medium.next(), Difficulty::Hard);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
    }

    #[test]
    fn test_full_board_is_contract_violation() {
        let mut board = Board::new();
        for pos in 0..9 {
            let player = if pos % 2 == 0 { Player::X } else { Player::O };
            board.place(pos, player).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(1);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(
                select_move(&board, Player::O, difficulty, &mut rng),
                Err(AiError::NoEmptyCells)
            );
        }
    }

    #[test]
    fn test_easy_only_picks_empty_squares() {
        let board = board_from(&[(0, Player::X), (4, Player::O), (8, Player::X)]);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pos = select_move(&board, Player::O, Difficulty::Easy, &mut rng).unwrap();
            assert!(board.is_empty(pos));
        }
    }

    #[test]
    fn test_winning_move_prefers_lowest_index() {
        // O can win at 2 (top row) and at 6 (left column).
        let board = board_from(&[
            (0, Player::O),
            (1, Player::O),
            (3, Player::O),
            (4, Player::X),
            (5, Player::X),
        ]);
        assert_eq!(
            winning_move(&board, &board.empty_indices(), Player::O),
            Some(2)
        );
    }

    #[test]
    fn test_same_seed_same_choice() {
        let board = board_from(&[(4, Player::X)]);
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            select_move(&board, Player::O, Difficulty::Medium, &mut rng).unwrap()
        };
        for seed in 0..20 {
            assert_eq!(run(seed), run(seed));
        }
    }
}
