//! Immutable move values.
//!
//! A move never references a board: it is a tagged pair of grid indices whose
//! kind is fixed by the offset between them.

use std::fmt;
use std::str::FromStr;

use crate::game_state::ataxx_types::{is_playable, Square};
use crate::game_state::board_errors::BoardError;
use crate::moves::move_offsets::{is_extend_offset, is_jump_offset};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Pass,
    /// Place a new piece next to `from`; `from` keeps its piece.
    Extend { from: Square, to: Square },
    /// Relocate the piece on `from` two cells away; `from` is emptied.
    Jump { from: Square, to: Square },
}

impl Move {
    /// Classify the move between two squares by their offset. Returns `None`
    /// when the squares are neither an extend nor a jump apart.
    pub fn between(from: Square, to: Square) -> Option<Move> {
        if is_extend_offset(from, to) {
            Some(Move::Extend { from, to })
        } else if is_jump_offset(from, to) {
            Some(Move::Jump { from, to })
        } else {
            None
        }
    }

    #[inline]
    pub const fn is_pass(self) -> bool {
        matches!(self, Move::Pass)
    }

    #[inline]
    pub const fn is_extend(self) -> bool {
        matches!(self, Move::Extend { .. })
    }

    #[inline]
    pub const fn is_jump(self) -> bool {
        matches!(self, Move::Jump { .. })
    }

    #[inline]
    pub const fn from_square(self) -> Option<Square> {
        match self {
            Move::Pass => None,
            Move::Extend { from, .. } | Move::Jump { from, .. } => Some(from),
        }
    }

    #[inline]
    pub const fn to_square(self) -> Option<Square> {
        match self {
            Move::Pass => None,
            Move::Extend { to, .. } | Move::Jump { to, .. } => Some(to),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Pass => f.write_str("-"),
            Move::Extend { from, to } | Move::Jump { from, to } => {
                // Off-board squares only appear in hand-built moves; show raw indices.
                match (square_to_algebraic(*from), square_to_algebraic(*to)) {
                    (Ok(from), Ok(to)) => write!(f, "{from}-{to}"),
                    _ => write!(f, "#{from}-#{to}"),
                }
            }
        }
    }
}

impl FromStr for Move {
    type Err = BoardError;

    /// Parse `"c0r0-c1r1"` or the pass form `"-"`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if text == "-" {
            return Ok(Move::Pass);
        }

        let (from_text, to_text) = text
            .split_once('-')
            .ok_or_else(|| BoardError::InvalidNotation(format!("expected c0r0-c1r1, got '{text}'")))?;

        let from = algebraic_to_square(from_text)?;
        let to = algebraic_to_square(to_text)?;
        if !is_playable(from) || !is_playable(to) {
            return Err(BoardError::InvalidNotation(format!("square out of range in '{text}'")));
        }

        Move::between(from, to).ok_or_else(|| {
            BoardError::InvalidNotation(format!("'{text}' is neither an extend nor a jump"))
        })
    }
}
