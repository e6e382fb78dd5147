use crate::game_state::ataxx_types::Square;
use crate::moves::ataxx_move::Move;

/// Most conversions a single move can make (every neighbor of the destination).
pub const MAX_CONVERSIONS: usize = 8;

/// Squares flipped by one move, stored inline so make/unmake never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Conversions {
    squares: [Square; MAX_CONVERSIONS],
    len: u8,
}

impl Conversions {
    #[inline]
    pub fn push(&mut self, square: Square) {
        self.squares[self.len as usize] = square;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len as usize]
    }
}

/// Single undo record for `make_move` / `undo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub converted: Conversions,
    pub prev_consecutive_jumps: u32,
}
