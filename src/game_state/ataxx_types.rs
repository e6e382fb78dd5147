//! Core Ataxx types and padded-grid geometry.
//!
//! The playable 7x7 board is stored inside an 11x11 linear array whose outer
//! two rings are permanently blocked, so any extend or jump offset applied to
//! an interior square stays in bounds and lands on a cell that legality checks
//! can reject on its contents alone.

pub use crate::game_state::board::Board;
pub use crate::game_state::undo_state::UndoState;

/// Number of playable squares on one side of the board.
pub const SIDE: usize = 7;

/// Depth of the blocked border surrounding the playable area.
pub const PADDING: usize = 2;

/// Side length of the padded grid.
pub const EXTENDED_SIDE: usize = SIDE + 2 * PADDING;

/// Total number of cells in the padded grid.
pub const EXTENDED_CELLS: usize = EXTENDED_SIDE * EXTENDED_SIDE;

/// Number of playable squares.
pub const PLAYABLE_CELLS: usize = SIDE * SIDE;

/// Number of permanently blocked border cells.
pub const BORDER_CELLS: usize = EXTENDED_CELLS - PLAYABLE_CELLS;

/// Linear index into the padded grid (`0..EXTENDED_CELLS`).
pub type Square = usize;

/// Contents of a cell, doubling as the player color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PieceColor {
    #[default]
    Empty,
    Red,
    Blue,
    Blocked,
}

impl PieceColor {
    /// The other player. `Empty` and `Blocked` map to themselves.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            PieceColor::Red => PieceColor::Blue,
            PieceColor::Blue => PieceColor::Red,
            other => other,
        }
    }

    #[inline]
    pub const fn is_player(self) -> bool {
        matches!(self, PieceColor::Red | PieceColor::Blue)
    }

    /// Capitalized player name used in reports ("Red", "Blue").
    pub const fn name(self) -> &'static str {
        match self {
            PieceColor::Empty => "Empty",
            PieceColor::Red => "Red",
            PieceColor::Blue => "Blue",
            PieceColor::Blocked => "Blocked",
        }
    }

    /// Parse a player name, ignoring case.
    pub fn parse_player(text: &str) -> Option<Self> {
        if text.eq_ignore_ascii_case("red") {
            Some(PieceColor::Red)
        } else if text.eq_ignore_ascii_case("blue") {
            Some(PieceColor::Blue)
        } else {
            None
        }
    }
}

impl std::fmt::Display for PieceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Linear index of the playable square at 0-based `col` (`a` = 0) and `row`
/// (`1` = 0).
#[inline]
pub const fn square_index(col: usize, row: usize) -> Square {
    (row + PADDING) * EXTENDED_SIDE + (col + PADDING)
}

/// Checked variant of [`square_index`] for coordinates that may fall outside
/// the 7x7 board.
#[inline]
pub const fn playable_square(col: usize, row: usize) -> Option<Square> {
    if col < SIDE && row < SIDE {
        Some(square_index(col, row))
    } else {
        None
    }
}

/// 0-based column of a square, meaningful only for playable squares.
#[inline]
pub const fn square_col(square: Square) -> usize {
    (square % EXTENDED_SIDE).wrapping_sub(PADDING)
}

/// 0-based row of a square, meaningful only for playable squares.
#[inline]
pub const fn square_row(square: Square) -> usize {
    (square / EXTENDED_SIDE).wrapping_sub(PADDING)
}

/// True for squares inside the 7x7 playable area.
#[inline]
pub const fn is_playable(square: Square) -> bool {
    square < EXTENDED_CELLS && square_col(square) < SIDE && square_row(square) < SIDE
}

/// The square plus its reflections across the center row and center column.
/// Squares on a center line repeat; callers de-duplicate when counting.
#[inline]
pub const fn reflections(square: Square) -> [Square; 4] {
    let col = square_col(square);
    let row = square_row(square);
    let mirror_col = SIDE - 1 - col;
    let mirror_row = SIDE - 1 - row;
    [
        square_index(col, row),
        square_index(mirror_col, row),
        square_index(col, mirror_row),
        square_index(mirror_col, mirror_row),
    ]
}

/// Iterator over every playable square, row 7 down to row 1, `a` to `g`.
pub fn playable_squares() -> impl Iterator<Item = Square> {
    (0..SIDE)
        .rev()
        .flat_map(|row| (0..SIDE).map(move |col| square_index(col, row)))
}
