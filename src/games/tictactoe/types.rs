//! Core domain types for tic-tac-toe.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::position::{Position, SquareSet};
use super::rules;

/// One of the two players.
///
/// Players are fixed at startup; their icon and color classes are
/// presentation hints carried in the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Player number, 1 or 2.
    id: u8,
    /// Display name.
    name: String,
    /// Icon class, e.g. `fa-x`.
    icon_class: String,
    /// Color class, e.g. `turquoise`.
    color_class: String,
}

impl Player {
    /// Creates a player.
    pub fn new(
        id: u8,
        name: impl Into<String>,
        icon_class: impl Into<String>,
        color_class: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            icon_class: icon_class.into(),
            color_class: color_class.into(),
        }
    }

    /// The two default players: X in turquoise, O in yellow.
    pub fn defaults() -> [Player; 2] {
        [
            Player::new(1, "Player 1", "fa-x", "turquoise"),
            Player::new(2, "Player 2", "fa-o", "yellow"),
        ]
    }

    /// True when both values denote the same seat.
    pub fn same_seat(&self, other: &Player) -> bool {
        self.id == other.id
    }
}

/// A claimed square: a player placing their mark at a position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    /// The claimed square.
    square_id: Position,
    /// The player who claimed it.
    player: Player,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player.name, self.square_id.label())
    }
}

/// Status of a game, derived from its moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// A player owns a full triplet.
    Won(Player),
    /// Board is full with no triplet owned.
    Tie,
}

impl GameStatus {
    /// True once the game is won or tied.
    pub fn is_complete(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// The winner, if any.
    pub fn winner(&self) -> Option<&Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            GameStatus::InProgress | GameStatus::Tie => None,
        }
    }
}

/// A single game: the append-only move list and whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Moves in the order they were played.
    moves: Vec<Move>,
    /// Player owed the next move.
    current_player: Player,
}

impl Game {
    /// Creates an empty game with `first` to move.
    pub fn new(first: Player) -> Self {
        Self {
            moves: Vec::new(),
            current_player: first,
        }
    }

    /// Computes the status from the moves. Never cached.
    #[instrument(skip(self), fields(moves = self.moves.len()))]
    pub fn status(&self) -> GameStatus {
        rules::evaluate(&self.moves)
    }

    /// The move on `pos`, if the square is claimed.
    pub fn move_at(&self, pos: Position) -> Option<&Move> {
        self.moves.iter().find(|m| m.square_id == pos)
    }

    /// True when `pos` is claimed.
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.move_at(pos).is_some()
    }

    /// Squares claimed by any player.
    pub fn occupied(&self) -> SquareSet {
        self.moves.iter().map(|m| m.square_id).collect()
    }

    /// Squares claimed by `player`.
    pub fn claimed_by(&self, player: &Player) -> SquareSet {
        self.moves
            .iter()
            .filter(|m| m.player.same_seat(player))
            .map(|m| m.square_id)
            .collect()
    }

    /// Appends a move for the current player and hands the turn to `next`.
    ///
    /// Unchecked: callers validate occupancy and completion first.
    pub(crate) fn push_move(&mut self, pos: Position, next: Player) {
        let player = std::mem::replace(&mut self.current_player, next);
        self.moves.push(Move::new(pos, player));
    }

    /// Drops every move and gives the turn to `first`.
    pub(crate) fn clear(&mut self, first: Player) {
        self.moves.clear();
        self.current_player = first;
    }
}
