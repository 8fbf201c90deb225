//! Terminal UI for noughts.

mod app;
mod input;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, instrument};

pub use app::{Action, App, UiEvent};

use crate::preferences::{FilePreferenceStore, PreferenceStore};
use crate::session::{AI_MOVE_DELAY, GameSession};

type CrosstermTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Runs the terminal game until the user quits.
#[instrument(skip(prefs_path), fields(prefs_path = %prefs_path.display()))]
pub async fn run_tui(prefs_path: PathBuf, start_with_ai: bool) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create("noughts_tui.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!("Starting noughts TUI");

    let store = FilePreferenceStore::new(&prefs_path);
    let preferences = store.load();
    let mut session = GameSession::new(preferences, StdRng::from_entropy());
    if start_with_ai {
        session.toggle_ai();
    }
    let mut app = App::new(session, store);

    enable_raw_mode()?;
    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            disable_raw_mode()?;
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            error!(error = %e, "Terminal setup failed");
            return Err(e.into());
        }
    };

    let res = run_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

fn setup_terminal() -> io::Result<CrosstermTerminal> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Drain timer events, draw, poll keys.
async fn run_loop<S: PreferenceStore>(
    terminal: &mut CrosstermTerminal,
    app: &mut App<S>,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    loop {
        if drain_events(app, &mut event_rx, &event_tx) {
            return Ok(());
        }

        terminal.draw(|f| {
            ui::draw(
                f,
                &app.session().view(),
                app.cursor(),
                app.menu_open(),
                app.session().ai_pending(),
            )
        })?;

        // Poll for input with short timeout to keep the loop responsive.
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
        {
            // Skip key release events (crossterm fires both press and release).
            if key.kind == KeyEventKind::Release {
                continue;
            }
            let action = app.handle_key(key.code);
            if dispatch(action, &event_tx) {
                info!("Leaving game loop");
                return Ok(());
            }
        }
    }
}

/// Applies every queued background event. Returns true when the loop should stop.
fn drain_events<S: PreferenceStore, R: Rng>(
    app: &mut App<S, R>,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    event_tx: &mpsc::UnboundedSender<UiEvent>,
) -> bool {
    while let Ok(ui_event) = event_rx.try_recv() {
        let action = app.handle_event(ui_event);
        if dispatch(action, event_tx) {
            return true;
        }
    }
    false
}

/// Carries out an [`Action`]. Returns true when the loop should stop.
fn dispatch(action: Action, event_tx: &mpsc::UnboundedSender<UiEvent>) -> bool {
    match action {
        Action::None => false,
        Action::Quit => true,
        Action::ScheduleAi(ticket) => {
            debug!(generation = ticket.generation(), "Starting AI delay");
            let tx = event_tx.clone();
            tokio::spawn(async move {
                sleep(AI_MOVE_DELAY).await;
                // The receiver is gone only after the loop has exited.
                let _ = tx.send(UiEvent::AiMoveDue(ticket));
            });
            false
        }
    }
}
