//! Keyboard mapping for the board cursor.

use crossterm::event::KeyCode;

use crate::games::tictactoe::Position;

/// Moves the cursor one cell for arrow keys and `hjkl`; stops at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Left | KeyCode::Char('h') => (row, col.saturating_sub(1)),
        KeyCode::Right | KeyCode::Char('l') => (row, (col + 1).min(2)),
        KeyCode::Up | KeyCode::Char('k') => (row.saturating_sub(1), col),
        KeyCode::Down | KeyCode::Char('j') => ((row + 1).min(2), col),
        _ => return cursor,
    };
    Position::from_square_id(row * 3 + col).unwrap_or(cursor)
}

/// True for keys handled by [`move_cursor`].
pub fn is_cursor_key(key: KeyCode) -> bool {
    matches!(
        key,
        KeyCode::Left
            | KeyCode::Right
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Char('h' | 'j' | 'k' | 'l')
    )
}
