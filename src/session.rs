//! Game session: one game at a time, the AI toggle, and deferred AI moves.
//!
//! The session never sleeps. When the computer should answer a human move it
//! hands out an [`AiTicket`]; the caller waits however long it likes and
//! passes the ticket back to [`GameSession::play_ai_move`]. Tickets carry the
//! game generation that issued them, so a ticket that outlives its game
//! (restart, AI toggled, game already over) is ignored.

use std::time::Duration;

use derive_getters::Getters;
use noughts_core::{
    Difficulty, Game, GameEnd, Player, WinningLine, render, render::CellRender, select_move,
};
use rand::Rng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, error, info, instrument};

use crate::preferences::{Preferences, Theme};

/// Pause before the computer answers a human move.
pub const AI_MOVE_DELAY: Duration = Duration::from_millis(500);

/// Mark played by the computer.
pub const AI_MARK: Player = Player::O;

/// Permission to play one deferred AI move in a specific game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AiTicket {
    generation: u64,
}

impl AiTicket {
    /// Generation of the game that issued this ticket.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened when a move was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct MoveReport {
    /// Square that received the mark.
    #[getter(copy)]
    index: usize,
    /// Player who moved.
    #[getter(copy)]
    player: Player,
    /// Set on the move that ended the game, and only on that move.
    #[getter(copy)]
    game_end: Option<GameEnd>,
    /// Set when the computer should answer after [`AI_MOVE_DELAY`].
    #[getter(copy)]
    ai_ticket: Option<AiTicket>,
}

/// End-of-game notice shown over the board.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct Popup {
    /// "Player X Wins!" or "Game Draw!".
    message: String,
    /// Winning line to highlight, absent on a draw.
    #[getter(copy)]
    line: Option<WinningLine>,
}

impl From<GameEnd> for Popup {
    fn from(end: GameEnd) -> Self {
        let line = match end {
            GameEnd::Won { line, .. } => Some(line),
            GameEnd::Draw => None,
        };
        Self {
            message: render::end_message(end),
            line,
        }
    }
}

/// Everything a UI needs to redraw.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct SessionView {
    /// "Player X's turn", or the result once the game is over.
    status: String,
    /// Per-cell render instructions.
    cells: [CellRender; 9],
    /// End-of-game popup, until dismissed.
    popup: Option<Popup>,
    /// Label of the AI toggle.
    #[getter(skip)]
    ai_label: &'static str,
    /// Current theme.
    #[getter(copy)]
    theme: Theme,
    /// Current AI difficulty.
    #[getter(copy)]
    difficulty: Difficulty,
}

impl SessionView {
    /// Label of the AI toggle: "Play with AI" or "Stop AI".
    pub fn ai_label(&self) -> &'static str {
        self.ai_label
    }
}

/// A single-player-at-a-time tic-tac-toe session.
#[derive(Debug)]
pub struct GameSession<R = StdRng> {
    game: Game,
    generation: u64,
    ai_enabled: bool,
    preferences: Preferences,
    pending_ai: Option<AiTicket>,
    end_announced: bool,
    popup: Option<Popup>,
    rng: R,
}

impl<R: Rng> GameSession<R> {
    /// Starts a session with a fresh game and the AI switched off.
    #[instrument(skip(rng))]
    pub fn new(preferences: Preferences, rng: R) -> Self {
        info!("Creating game session");
        Self {
            game: Game::new(),
            generation: 0,
            ai_enabled: false,
            preferences,
            pending_ai: None,
            end_announced: false,
            popup: None,
            rng,
        }
    }

    /// The current game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Counter bumped on every restart.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether O is played by the computer.
    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    /// Current preferences.
    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    /// The end-of-game popup, if showing.
    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// True while an AI move has been scheduled but not played.
    pub fn ai_pending(&self) -> bool {
        self.pending_ai.is_some()
    }

    /// Throws away the current game and starts a new one with X to move.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn restart(&mut self) {
        self.game = Game::new();
        self.generation += 1;
        self.pending_ai = None;
        self.end_announced = false;
        self.popup = None;
        info!(generation = self.generation, "New game started");
    }

    /// Switches the computer opponent on or off and restarts the game.
    #[instrument(skip(self))]
    pub fn toggle_ai(&mut self) -> bool {
        self.ai_enabled = !self.ai_enabled;
        info!(ai_enabled = self.ai_enabled, "AI toggled");
        self.restart();
        self.ai_enabled
    }

    /// Sets the AI difficulty. The game in progress continues.
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Preferences {
        self.preferences.set_difficulty(difficulty);
        info!(%difficulty, "Difficulty changed");
        self.preferences
    }

    /// Moves to the next difficulty tier.
    #[instrument(skip(self))]
    pub fn cycle_difficulty(&mut self) -> Preferences {
        let next = self.preferences.difficulty().next();
        self.set_difficulty(next)
    }

    /// Switches between the light and dark theme.
    #[instrument(skip(self))]
    pub fn toggle_theme(&mut self) -> Preferences {
        let theme = self.preferences.theme().toggle();
        self.preferences.set_theme(theme);
        info!(%theme, "Theme changed");
        self.preferences
    }

    /// Hides the end-of-game popup.
    #[instrument(skip(self))]
    pub fn dismiss_popup(&mut self) {
        self.popup = None;
    }

    /// Human move on square `index`.
    ///
    /// Returns `None` without changing anything when the move is not
    /// allowed: game over, square taken or out of range, or the computer
    /// is due to play O.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn click(&mut self, index: usize) -> Option<MoveReport> {
        if self.ai_enabled && self.game.current_player() == AI_MARK {
            debug!("Ignoring click while the AI is to move");
            return None;
        }
        self.apply(index)
    }

    /// Plays the deferred computer move for `ticket`.
    ///
    /// Returns `None` for a ticket from an earlier game, a ticket that has
    /// already been used, or when the game no longer wants an AI move.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn play_ai_move(&mut self, ticket: AiTicket) -> Option<MoveReport> {
        if ticket.generation != self.generation || self.pending_ai != Some(ticket) {
            debug!(
                ticket_generation = ticket.generation,
                "Ignoring stale AI ticket"
            );
            return None;
        }
        self.pending_ai = None;

        if !self.ai_enabled || self.game.is_over() || self.game.current_player() != AI_MARK {
            debug!("AI move no longer wanted");
            return None;
        }

        let difficulty = self.preferences.difficulty();
        match select_move(self.game.board(), AI_MARK, difficulty, &mut self.rng) {
            Ok(index) => self.apply(index),
            Err(e) => {
                error!(error = %e, "AI asked to move on a full board");
                None
            }
        }
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> SessionView {
        SessionView {
            status: render::status_text(&self.game),
            cells: render::cells(&self.game),
            popup: self.popup.clone(),
            ai_label: if self.ai_enabled {
                "Stop AI"
            } else {
                "Play with AI"
            },
            theme: self.preferences.theme(),
            difficulty: self.preferences.difficulty(),
        }
    }

    fn apply(&mut self, index: usize) -> Option<MoveReport> {
        let player = self.game.current_player();
        if let Err(e) = self.game.place(index) {
            debug!(index, error = %e, "Move ignored");
            return None;
        }
        info!(index, %player, "Move placed");

        let mut game_end = None;
        if let Some(end) = self.game.game_end()
            && !self.end_announced
        {
            self.end_announced = true;
            self.popup = Some(Popup::from(end));
            info!(?end, "Game over");
            game_end = Some(end);
        }

        let mut ai_ticket = None;
        if self.ai_enabled
            && !self.game.is_over()
            && self.game.current_player() == AI_MARK
            && self.pending_ai.is_none()
        {
            let ticket = AiTicket {
                generation: self.generation,
            };
            self.pending_ai = Some(ticket);
            ai_ticket = Some(ticket);
            debug!(generation = self.generation, "AI move scheduled");
        }

        Some(MoveReport {
            index,
            player,
            game_end,
            ai_ticket,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn session() -> GameSession {
        GameSession::new(Preferences::default(), StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_two_player_game_issues_no_tickets() {
        let mut session = session();
        let report = session.click(4).expect("legal move");
        assert_eq!(report.player(), Player::X);
        assert_eq!(report.ai_ticket(), None);
        let report = session.click(0).expect("O moves by hand");
        assert_eq!(report.player(), Player::O);
    }

    #[test]
    fn test_occupied_click_is_ignored() {
        let mut session = session();
        session.click(4);
        assert_eq!(session.click(4), None);
        assert_eq!(session.game().board().mark_count(), 1);
    }

    #[test]
    fn test_ai_label_follows_toggle() {
        let mut session = session();
        assert_eq!(session.view().ai_label(), "Play with AI");
        session.toggle_ai();
        assert_eq!(session.view().ai_label(), "Stop AI");
    }

    #[test]
    fn test_ai_label_outlives_view() {
        let mut session = session();
        session.toggle_ai();
        let label = {
            let view = session.view();
            view.ai_label()
        };
        assert_eq!(label, "Stop AI");
    }

    #[test]
    fn test_difficulty_change_keeps_game() {
        let mut session = session();
        session.click(4);
        let prefs = session.cycle_difficulty();
        assert_eq!(prefs.difficulty(), Difficulty::Medium);
        assert_eq!(session.game().board().mark_count(), 1);
        assert_eq!(session.generation(), 0);
    }
}
