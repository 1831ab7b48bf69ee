//! Strictly T3 library - two-player tic-tac-toe with a persisted session
//!
//! A [`Store`] owns the session (both players and every game played), saves
//! it after each change and notifies subscribers. A [`View`] renders a game
//! and its scoreboard in the terminal and turns input into intents. [`App`]
//! connects the two and keeps several processes sharing one storage key in
//! step by polling.
//!
//! # Architecture
//!
//! - **Games**: tic-tac-toe rules, moves and stats
//! - **Store**: persistence, subscriptions and cross-process sync
//! - **View**: element document, rendering and input
//! - **App**: intent dispatch and the terminal loop
//!
//! # Example
//!
//! ```
//! use strictly_t3::{MemoryStorage, Player, Position, Store};
//!
//! let mut store = Store::new(MemoryStorage::new(), "live-t3", Player::defaults());
//! store.player_move(Position::Center)?;
//! assert_eq!(store.game().moves().len(), 1);
//! # Ok::<(), strictly_t3::StoreError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod app;
mod cli;
mod config;
mod games;
mod store;
mod view;

// Crate-level exports - App
pub use app::{App, Intent, Tui, init_terminal, restore_terminal};

// Crate-level exports - CLI and configuration
pub use cli::{Cli, Command, StorageArgs};
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Game, GameStatus, InvalidSquareId, Move, MoveError, Player, PlayerWithStats, Position,
    Session, SessionError, SquareSet, Stats, TRIPLETS, check_winner, evaluate, is_full,
    validate_move,
};

// Crate-level exports - Store
pub use store::{
    FileStorage, MemoryStorage, Storage, StorageError, Store, StoreError, SubscriptionId,
    Subscribers,
};

// Crate-level exports - View
pub use view::{
    Document, Element, ElementId, Elements, Flow, HitMap, Icon, MenuItem, SquareElement, View,
    ViewError, color, glyph, move_cursor,
};
