//! noughts - terminal tic-tac-toe with a tiered computer opponent.
//!
//! Game rules, the turn engine and the move selector live in
//! [`noughts_core`]. This crate adds what a playable program needs.
//!
//! # Architecture
//!
//! - **Preferences**: theme and AI difficulty, stored as TOML
//! - **Session**: one game at a time, AI toggle, deferred AI moves
//! - **TUI**: ratatui front end with a 500 ms pause before the AI answers
//!
//! # Example
//!
//! ```
//! use noughts::{GameSession, Preferences};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut session = GameSession::new(Preferences::default(), StdRng::seed_from_u64(7));
//! session.toggle_ai();
//! let report = session.click(0).unwrap();
//! session.play_ai_move(report.ai_ticket().unwrap()).unwrap();
//! assert_eq!(session.game().board().mark_count(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod preferences;
mod session;
mod tui;

// Crate-level exports - Command line
pub use cli::{Cli, Command, parse_board};

// Crate-level exports - Preferences
pub use preferences::{
    DEFAULT_PREFS_PATH, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Preferences,
    PreferencesError, Theme,
};

// Crate-level exports - Session management
pub use session::{AI_MARK, AI_MOVE_DELAY, AiTicket, GameSession, MoveReport, Popup, SessionView};

// Crate-level exports - Terminal UI
pub use tui::{Action, App, UiEvent, run_tui};
