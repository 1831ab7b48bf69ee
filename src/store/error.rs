//! Store and storage error types.

use derive_more::{Display, From};
use tracing::instrument;

use crate::games::tictactoe::MoveError;

/// Storage backend error with location tracking.
#[derive(Debug, Clone, Display)]
#[display("Storage error: {} at {}:{}", message, file, line)]
pub struct StorageError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StorageError {
    /// Creates a new storage error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for StorageError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Serialization error: {}", err))
    }
}

/// Error returned by a store mutation. The session is unchanged.
#[derive(Debug, Clone, Display, From)]
pub enum StoreError {
    /// The move was rejected by the rules.
    #[display("Invalid move: {}", _0)]
    InvalidMove(MoveError),

    /// The new state could not be persisted.
    #[display("{}", _0)]
    Storage(StorageError),
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::InvalidMove(err) => Some(err),
            StoreError::Storage(err) => Some(err),
        }
    }
}
