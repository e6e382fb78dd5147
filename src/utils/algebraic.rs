//! Square conversions for Ataxx coordinates.
//!
//! Converts between human-readable coordinates (columns `a`..`g`, rows
//! `1`..`7`, e.g. `c3`) and linear indices on the padded grid.

use crate::game_state::ataxx_types::{is_playable, square_col, square_index, square_row, Square, SIDE};
use crate::game_state::board_errors::BoardError;

/// Convert a coordinate such as "c3" to a square index. Columns are
/// case-insensitive.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, BoardError> {
    let bytes = square.trim().as_bytes();
    if bytes.len() != 2 {
        return Err(BoardError::InvalidNotation(format!("invalid square: '{square}'")));
    }

    let col = bytes[0].to_ascii_lowercase();
    let row = bytes[1];

    if !(b'a'..b'a' + SIDE as u8).contains(&col) {
        return Err(BoardError::InvalidNotation(format!("invalid column: {}", col as char)));
    }
    if !(b'1'..b'1' + SIDE as u8).contains(&row) {
        return Err(BoardError::InvalidNotation(format!("invalid row: {}", row as char)));
    }

    Ok(square_index((col - b'a') as usize, (row - b'1') as usize))
}

/// Convert a playable square to its coordinate, e.g. `24 -> "a1"`.
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, BoardError> {
    if !is_playable(square) {
        return Err(BoardError::InvalidNotation(format!("square {square} is not playable")));
    }

    let col_char = char::from(b'a' + square_col(square) as u8);
    let row_char = char::from(b'1' + square_row(square) as u8);
    Ok(format!("{col_char}{row_char}"))
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), 24);
        assert_eq!(algebraic_to_square("G7").expect("G7 should parse"), 96);
        assert_eq!(algebraic_to_square("b7").expect("b7 should parse"), 91);
        assert_eq!(square_to_algebraic(90).expect("90 should convert"), "a7");
        assert_eq!(square_to_algebraic(30).expect("30 should convert"), "g1");
    }

    #[test]
    fn rejects_off_board_coordinates() {
        assert!(algebraic_to_square("h1").is_err());
        assert!(algebraic_to_square("a8").is_err());
        assert!(algebraic_to_square("a").is_err());
        assert!(square_to_algebraic(0).is_err());
        assert!(square_to_algebraic(23).is_err());
    }
}
