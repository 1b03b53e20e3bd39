//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;
use strictly_chess::Coordinate;

/// Moves the cursor one cell for arrow or `hjkl` keys.
///
/// Rank 7 is drawn at the top, so "up" raises the rank. Moves off the
/// board and unrelated keys leave the cursor where it is.
pub fn move_cursor(cursor: Coordinate, key: KeyCode) -> Coordinate {
    let (file_delta, rank_delta) = match key {
        KeyCode::Left | KeyCode::Char('h') => (-1, 0),
        KeyCode::Right | KeyCode::Char('l') => (1, 0),
        KeyCode::Up | KeyCode::Char('k') => (0, 1),
        KeyCode::Down | KeyCode::Char('j') => (0, -1),
        _ => return cursor,
    };
    cursor.offset(file_delta, rank_delta).unwrap_or(cursor)
}
