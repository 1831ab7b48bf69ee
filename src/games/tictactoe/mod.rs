mod action;
mod position;
mod rules;
mod session;
mod stats;
mod types;

pub use action::{MoveError, validate_move};
pub use position::{InvalidSquareId, Position, SquareSet};
pub use rules::{TRIPLETS, check_winner, evaluate, is_full};
pub use session::{Session, SessionError};
pub use stats::{PlayerWithStats, Stats};
pub use types::{Game, GameStatus, Move, Player};
