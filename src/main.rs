//! noughts - command-line entry point.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use noughts::{AI_MARK, Cli, Command, FilePreferenceStore, PreferenceStore, run_tui};
use noughts_core::{Board, Difficulty, select_move};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { prefs, ai } => run_tui(prefs, ai).await,
        Command::Prefs { prefs } => {
            initialize_tracing();
            show_preferences(prefs)
        }
        Command::AiMove {
            board,
            difficulty,
            seed,
        } => {
            initialize_tracing();
            show_ai_move(board, difficulty, seed)
        }
    }
}

/// Print the preferences that `play` would start with.
#[instrument(skip_all, fields(path = %path.display()))]
fn show_preferences(path: std::path::PathBuf) -> Result<()> {
    let store = FilePreferenceStore::new(&path);
    let preferences = store.load();
    println!("{}", serde_json::to_string_pretty(&preferences)?);
    Ok(())
}

/// Print the computer's choice for O on `board`.
#[instrument(skip(board))]
fn show_ai_move(board: Board, difficulty: Difficulty, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(board = %board.display(), "Selecting move");
    let pos = select_move(&board, AI_MARK, difficulty, &mut rng)?;
    println!("{}", pos);
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
