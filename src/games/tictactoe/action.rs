//! Move validation for tic-tac-toe.
//!
//! Moves are checked against the current game before anything is
//! appended, so a rejected move leaves the game untouched.

use super::position::Position;
use super::types::Game;
use tracing::instrument;

/// Error that can occur when validating a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}

/// Checks that `pos` may be claimed in `game`.
///
/// Completion is checked first: a finished game rejects every square.
#[instrument(skip(game), fields(moves = game.moves().len()))]
pub fn validate_move(game: &Game, pos: Position) -> Result<(), MoveError> {
    if game.status().is_complete() {
        return Err(MoveError::GameOver);
    }
    if game.is_occupied(pos) {
        return Err(MoveError::SquareOccupied(pos));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Player;

    #[test]
    fn test_occupied_square_rejected() {
        let [p1, p2] = Player::defaults();
        let mut game = Game::new(p1.clone());
        game.push_move(Position::Center, p2);
        assert_eq!(
            validate_move(&game, Position::Center),
            Err(MoveError::SquareOccupied(Position::Center))
        );
        assert_eq!(validate_move(&game, Position::TopLeft), Ok(()));
    }

    #[test]
    fn test_finished_game_rejects_everything() {
        let [p1, p2] = Player::defaults();
        let mut game = Game::new(p1.clone());
        for (pos, next) in [
            (Position::TopLeft, p2.clone()),
            (Position::MiddleLeft, p1.clone()),
            (Position::TopCenter, p2.clone()),
            (Position::Center, p1.clone()),
            (Position::TopRight, p2.clone()),
        ] {
            game.push_move(pos, next);
        }
        assert_eq!(validate_move(&game, Position::BottomRight), Err(MoveError::GameOver));
        assert_eq!(validate_move(&game, Position::TopLeft), Err(MoveError::GameOver));
    }
}
