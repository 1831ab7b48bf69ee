//! Command-line interface for strictly_t3.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::AppConfig;

/// Strictly T3 - two-player tic-tac-toe with a persisted scoreboard
#[derive(Parser, Debug)]
#[command(name = "strictly_t3")]
#[command(about = "Two-player tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal. Other processes sharing the storage stay in sync.
    Play(StorageArgs),

    /// Print the scoreboard and the current board
    Stats(StorageArgs),

    /// Delete the stored session
    Clear(StorageArgs),
}

impl Command {
    /// Storage options shared by every command.
    pub fn storage_args(&self) -> &StorageArgs {
        match self {
            Command::Play(args) | Command::Stats(args) | Command::Clear(args) => args,
        }
    }
}

/// Where the session lives
#[derive(Args, Debug, Clone)]
pub struct StorageArgs {
    /// Path to the TOML config file (defaults apply if it doesn't exist)
    #[arg(short, long, default_value = "strictly_t3.toml")]
    pub config: PathBuf,

    /// Directory holding the stored session (overrides the config file)
    #[arg(long)]
    pub storage_dir: Option<PathBuf>,

    /// Key the session is stored under (overrides the config file)
    #[arg(long)]
    pub storage_key: Option<String>,
}

impl StorageArgs {
    /// Applies the command-line overrides to `config`.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(dir) = &self.storage_dir {
            config = config.with_storage_dir(dir.clone());
        }
        if let Some(key) = &self.storage_key {
            config = config.with_storage_key(key.clone());
        }
        config
    }
}
