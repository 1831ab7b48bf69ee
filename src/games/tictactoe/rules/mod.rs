//! Game rules for tic-tac-toe.
//!
//! Pure functions over a move list. Status is recomputed from the moves on
//! every call, so it always agrees with the latest stored state.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{TRIPLETS, check_winner};

use super::types::{GameStatus, Move};
use tracing::instrument;

/// Evaluates the status of a game from its moves.
///
/// A fully owned triplet wins even on the ninth move; a full board
/// without one is a tie.
#[instrument(skip(moves), fields(moves = moves.len()))]
pub fn evaluate(moves: &[Move]) -> GameStatus {
    if let Some(winner) = check_winner(moves) {
        return GameStatus::Won(winner);
    }
    if is_full(moves) {
        return GameStatus::Tie;
    }
    GameStatus::InProgress
}
