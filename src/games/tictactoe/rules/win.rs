//! Win detection logic for tic-tac-toe.

use super::super::position::{Position, SquareSet};
use super::super::types::{Move, Player};
use tracing::instrument;

/// The 8 winning triplets: 3 rows, 3 columns, 2 diagonals.
pub const TRIPLETS: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if a player owns a full triplet.
///
/// Each player's claimed squares are collected into a set and every
/// triplet is tested for membership. Players are checked in order of
/// their first move.
#[instrument(skip(moves), fields(moves = moves.len()))]
pub fn check_winner(moves: &[Move]) -> Option<Player> {
    let mut seen: Vec<(&Player, SquareSet)> = Vec::with_capacity(2);
    for m in moves {
        match seen.iter_mut().find(|(p, _)| p.same_seat(m.player())) {
            Some((_, set)) => {
                set.insert(*m.square_id());
            }
            None => {
                let mut set = SquareSet::new();
                set.insert(*m.square_id());
                seen.push((m.player(), set));
            }
        }
    }

    seen.into_iter()
        .find(|(_, set)| TRIPLETS.iter().any(|line| set.contains_all(line)))
        .map(|(player, _)| player.clone())
}
