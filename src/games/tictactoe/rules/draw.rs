//! Draw detection logic for tic-tac-toe.

use super::super::types::Move;
use tracing::instrument;

/// Checks if the board is full (all 9 squares claimed).
///
/// A full board with no winner is a tie.
#[instrument(skip(moves), fields(moves = moves.len()))]
pub fn is_full(moves: &[Move]) -> bool {
    moves.len() >= 9
}
