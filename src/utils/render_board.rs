//! Plain-text board dump.
//!
//! Rows are printed from 7 down to 1 between `===` fences, each cell as a
//! space followed by `r`, `b`, `X` or `-`.

use crate::game_state::ataxx_types::{square_index, Board, PieceColor, SIDE};

pub fn render_board(board: &Board) -> String {
    let mut out = String::with_capacity(4 + SIDE * (2 * SIDE + 1) + 3);
    out.push_str("===\n");

    for row in (0..SIDE).rev() {
        for col in 0..SIDE {
            out.push(' ');
            out.push(cell_char(board.get(square_index(col, row))));
        }
        out.push('\n');
    }

    out.push_str("===");
    out
}

#[inline]
fn cell_char(color: PieceColor) -> char {
    match color {
        PieceColor::Red => 'r',
        PieceColor::Blue => 'b',
        PieceColor::Blocked => 'X',
        PieceColor::Empty => '-',
    }
}

#[cfg(test)]
mod tests {
    use super::render_board;
    use crate::game_state::ataxx_types::Board;

    #[test]
    fn start_position_dump() {
        let expected = "===\n \
r - - - - - b\n \
- - - - - - -\n \
- - - - - - -\n \
- - - - - - -\n \
- - - - - - -\n \
- - - - - - -\n \
b - - - - - r\n\
===";
        assert_eq!(render_board(&Board::new()), expected);
        assert_eq!(Board::new().to_string(), expected);
    }

    #[test]
    fn blocks_render_as_x() {
        let mut board = Board::new();
        board.set_block(crate::game_state::ataxx_types::square_index(1, 1)).expect("block");
        let dump = render_board(&board);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[2], " - X - - - X -");
        assert_eq!(lines[6], " - X - - - X -");
    }
}
