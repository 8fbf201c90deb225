//! Application state and key handling for the terminal UI.

use crossterm::event::KeyCode;
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, error, info, instrument};

use super::input::move_cursor;
use crate::preferences::{PreferenceStore, Preferences};
use crate::session::{AiTicket, GameSession, MoveReport};

/// Events delivered to the UI loop from background tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The AI delay for this ticket has elapsed.
    AiMoveDue(AiTicket),
}

/// What the event loop must do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Redraw only.
    None,
    /// Start the delay timer for a computer move.
    ScheduleAi(AiTicket),
    /// Leave the application.
    Quit,
}

/// Main application state.
#[derive(Debug)]
pub struct App<S, R = StdRng> {
    session: GameSession<R>,
    store: S,
    cursor: usize,
    menu_open: bool,
}

impl<S: PreferenceStore, R: Rng> App<S, R> {
    /// Creates the application around an existing session.
    pub fn new(session: GameSession<R>, store: S) -> Self {
        Self {
            session,
            store,
            cursor: noughts_core::CENTER,
            menu_open: false,
        }
    }

    /// The game session.
    pub fn session(&self) -> &GameSession<R> {
        &self.session
    }

    /// Square under the keyboard cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the preferences menu is showing.
    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// The preference store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handles one key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                info!("User quit");
                return Action::Quit;
            }
            KeyCode::Char(c) if ('1'..='9').contains(&c) => {
                if let Some(digit) = c.to_digit(10) {
                    let index = digit as usize - 1;
                    self.cursor = index;
                    return self.click(index);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.session.popup().is_some() {
                    self.session.dismiss_popup();
                } else {
                    return self.click(self.cursor);
                }
            }
            KeyCode::Esc => {
                if self.session.popup().is_some() {
                    self.session.dismiss_popup();
                } else {
                    self.menu_open = false;
                }
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.session.restart(),
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.session.toggle_ai();
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                let prefs = self.session.toggle_theme();
                self.persist(prefs);
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                let prefs = self.session.cycle_difficulty();
                self.persist(prefs);
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.menu_open = !self.menu_open;
                debug!(menu_open = self.menu_open, "Menu toggled");
            }
            _ => {}
        }
        Action::None
    }

    /// Handles an event from a background task.
    #[instrument(skip(self))]
    pub fn handle_event(&mut self, event: UiEvent) -> Action {
        match event {
            UiEvent::AiMoveDue(ticket) => match self.session.play_ai_move(ticket) {
                Some(report) => Self::follow_up(report),
                None => Action::None,
            },
        }
    }

    fn click(&mut self, index: usize) -> Action {
        match self.session.click(index) {
            Some(report) => Self::follow_up(report),
            None => Action::None,
        }
    }

    fn follow_up(report: MoveReport) -> Action {
        match report.ai_ticket() {
            Some(ticket) => Action::ScheduleAi(ticket),
            None => Action::None,
        }
    }

    fn persist(&mut self, preferences: Preferences) {
        if let Err(e) = self.store.save(&preferences) {
            error!(error = %e, "Failed to save preferences");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::{MemoryPreferenceStore, Theme};
    use noughts_core::Difficulty;
    use rand::SeedableRng;

    fn app() -> App<MemoryPreferenceStore> {
        let session = GameSession::new(Preferences::default(), StdRng::seed_from_u64(5));
        App::new(session, MemoryPreferenceStore::default())
    }

    #[test]
    fn test_digit_keys_place_marks() {
        let mut app = app();
        assert_eq!(app.handle_key(KeyCode::Char('5')), Action::None);
        assert_eq!(app.cursor(), 4);
        assert_eq!(app.session().game().board().mark_count(), 1);
    }

    #[test]
    fn test_enter_clicks_cursor() {
        let mut app = app();
        app.handle_key(KeyCode::Up);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.cursor(), 0);
        app.handle_key(KeyCode::Enter);
        assert!(!app.session().game().board().is_empty(0));
    }

    #[test]
    fn test_ai_move_is_scheduled_and_played() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a'));
        let Action::ScheduleAi(ticket) = app.handle_key(KeyCode::Char('1')) else {
            panic!("expected an AI move to be scheduled");
        };
        assert_eq!(app.handle_event(UiEvent::AiMoveDue(ticket)), Action::None);
        assert_eq!(app.session().game().board().mark_count(), 2);
    }

    #[test]
    fn test_preference_changes_are_saved() {
        let mut app = app();
        app.handle_key(KeyCode::Char('t'));
        app.handle_key(KeyCode::Char('d'));
        assert_eq!(
            app.store().saved(),
            Some(Preferences::new(Theme::Light, Difficulty::Medium))
        );
    }

    #[test]
    fn test_popup_dismissed_by_enter() {
        let mut app = app();
        for key in ['1', '4', '2', '5', '3'] {
            app.handle_key(KeyCode::Char(key));
        }
        assert!(app.session().popup().is_some());
        app.handle_key(KeyCode::Enter);
        assert!(app.session().popup().is_none());
    }

    #[test]
    fn test_menu_toggle_and_quit() {
        let mut app = app();
        app.handle_key(KeyCode::Char('m'));
        assert!(app.menu_open());
        app.handle_key(KeyCode::Esc);
        assert!(!app.menu_open());
        assert_eq!(app.handle_key(KeyCode::Char('q')), Action::Quit);
    }
}
