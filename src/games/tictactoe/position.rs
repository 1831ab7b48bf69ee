//! Board positions and square sets for tic-tac-toe.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A position on the tic-tac-toe board (0-8, row-major).
///
/// Serialized as its integer square id so stored records stay
/// `{"squareId": 4, ...}`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Position {
    /// Top-left (square 0)
    TopLeft,
    /// Top-center (square 1)
    TopCenter,
    /// Top-right (square 2)
    TopRight,
    /// Middle-left (square 3)
    MiddleLeft,
    /// Center (square 4)
    Center,
    /// Middle-right (square 5)
    MiddleRight,
    /// Bottom-left (square 6)
    BottomLeft,
    /// Bottom-center (square 7)
    BottomCenter,
    /// Bottom-right (square 8)
    BottomRight,
}

impl Position {
    /// All 9 positions in square id order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Get label for this position (for display).
    pub fn label(self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to its square id (0-8).
    pub fn square_id(self) -> u8 {
        match self {
            Position::TopLeft => 0,
            Position::TopCenter => 1,
            Position::TopRight => 2,
            Position::MiddleLeft => 3,
            Position::Center => 4,
            Position::MiddleRight => 5,
            Position::BottomLeft => 6,
            Position::BottomCenter => 7,
            Position::BottomRight => 8,
        }
    }

    /// Creates position from a square id, `None` when out of range.
    #[instrument]
    pub fn from_square_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// Parses a 1-based key digit ('1'..='9') as pressed on the keyboard.
    #[instrument]
    pub fn from_digit(c: char) -> Option<Self> {
        let digit = c.to_digit(10)?;
        let id = u8::try_from(digit.checked_sub(1)?).ok()?;
        Self::from_square_id(id)
    }

    /// Row on the board (0-2).
    pub fn row(self) -> u8 {
        self.square_id() / 3
    }

    /// Column on the board (0-2).
    pub fn col(self) -> u8 {
        self.square_id() % 3
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<Position> for u8 {
    fn from(pos: Position) -> Self {
        pos.square_id()
    }
}

/// A square id that does not name a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("Square id {} is out of range (expected 0-8)", _0)]
pub struct InvalidSquareId(pub u8);

impl std::error::Error for InvalidSquareId {}

impl TryFrom<u8> for Position {
    type Error = InvalidSquareId;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Position::from_square_id(id).ok_or(InvalidSquareId(id))
    }
}

/// A set of board positions, one bit per square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SquareSet(u16);

impl SquareSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a position; returns `false` if it was already present.
    pub fn insert(&mut self, pos: Position) -> bool {
        let bit = 1u16 << pos.square_id();
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    /// Checks membership.
    pub fn contains(self, pos: Position) -> bool {
        self.0 & (1u16 << pos.square_id()) != 0
    }

    /// Checks that every given position is a member.
    pub fn contains_all(self, positions: &[Position]) -> bool {
        positions.iter().all(|pos| self.contains(*pos))
    }

    /// Number of members.
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// True when no position is a member.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Position> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut set = SquareSet::new();
        for pos in iter {
            set.insert(pos);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_square_ids_follow_enum_order() {
        for (idx, pos) in Position::iter().enumerate() {
            assert_eq!(usize::from(pos.square_id()), idx);
            assert_eq!(Position::from_square_id(pos.square_id()), Some(pos));
        }
        assert_eq!(Position::from_square_id(9), None);
    }

    #[test]
    fn test_from_digit_is_one_based() {
        assert_eq!(Position::from_digit('1'), Some(Position::TopLeft));
        assert_eq!(Position::from_digit('9'), Some(Position::BottomRight));
        assert_eq!(Position::from_digit('0'), None);
        assert_eq!(Position::from_digit('x'), None);
    }

    #[test]
    fn test_serializes_as_square_id() {
        let json = serde_json::to_string(&Position::Center).unwrap();
        assert_eq!(json, "4");
        let pos: Position = serde_json::from_str("8").unwrap();
        assert_eq!(pos, Position::BottomRight);
        assert!(serde_json::from_str::<Position>("9").is_err());
    }

    #[test]
    fn test_square_set_membership() {
        let mut set = SquareSet::new();
        assert!(set.is_empty());
        assert!(set.insert(Position::Center));
        assert!(!set.insert(Position::Center));
        assert!(set.contains(Position::Center));
        assert!(!set.contains(Position::TopLeft));
        assert_eq!(set.len(), 1);

        let row: SquareSet = [Position::TopLeft, Position::TopCenter, Position::TopRight]
            .into_iter()
            .collect();
        assert!(row.contains_all(&[Position::TopLeft, Position::TopRight]));
        assert!(!row.contains_all(&[Position::TopLeft, Position::Center]));
    }
}
