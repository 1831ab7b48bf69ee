//! Strictly T3 - Unified CLI
//!
//! Two-player tic-tac-toe with a persisted session.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use strictly_t3::{
    App, AppConfig, Cli, Command, Document, FileStorage, GameStatus, Storage, Store, View, glyph,
    init_terminal, restore_terminal,
};
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let args = cli.command.storage_args();
    let config = args.apply(AppConfig::load_or_default(&args.config)?);

    match cli.command {
        Command::Play(_) => run_play(config).await,
        Command::Stats(_) => print_stats(config),
        Command::Clear(_) => clear_session(config),
    }
}

/// Logs to stderr; used by the non-interactive commands.
fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the interactive game
async fn run_play(config: AppConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(
        storage_dir = %config.storage_dir().display(),
        storage_key = %config.storage_key(),
        "Starting Strictly T3"
    );

    let store = Store::new(
        FileStorage::new(config.storage_dir()),
        config.storage_key().as_str(),
        config.players().clone(),
    );
    let view = View::new(Document::standard())?;
    let mut app = App::new(store, view);

    let mut terminal = init_terminal()?;
    let res = app.run(&mut terminal, config.poll_interval()).await;
    restore_terminal(&mut terminal)?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res?;
    Ok(())
}

/// Print the scoreboard and the current board
#[instrument(skip_all, fields(storage_key = %config.storage_key()))]
fn print_stats(config: AppConfig) -> Result<()> {
    init_stderr_logging();

    let store = Store::new(
        FileStorage::new(config.storage_dir()),
        config.storage_key().as_str(),
        config.players().clone(),
    );
    let stats = store.stats();
    let game = store.game();

    println!("Games completed: {}", stats.completed_games());
    for entry in stats.player_with_stats() {
        println!("  {:<16} {} wins", entry.player().name(), entry.wins());
    }
    println!("  {:<16} {} ties", "Ties", stats.ties());
    println!();

    for row in 0..3u8 {
        let cells: Vec<String> = (0..3u8)
            .map(|col| {
                let id = row * 3 + col;
                game.moves()
                    .iter()
                    .find(|m| m.square_id().square_id() == id)
                    .map(|m| glyph(m.player().icon_class()).to_string())
                    .unwrap_or_else(|| (id + 1).to_string())
            })
            .collect();
        println!(" {} ", cells.join(" | "));
        if row < 2 {
            println!("---+---+---");
        }
    }
    println!();

    match game.status() {
        GameStatus::InProgress => println!("{} to move", game.current_player().name()),
        GameStatus::Won(winner) => println!("{} wins!", winner.name()),
        GameStatus::Tie => println!("Tie"),
    }
    Ok(())
}

/// Delete the stored session
#[instrument(skip_all, fields(storage_key = %config.storage_key()))]
fn clear_session(config: AppConfig) -> Result<()> {
    init_stderr_logging();

    let mut storage = FileStorage::new(config.storage_dir());
    storage.remove(config.storage_key())?;
    info!("Stored session removed");
    println!("Cleared '{}'", config.storage_key());
    Ok(())
}
