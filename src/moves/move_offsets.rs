//! Linear offset tables for extend and jump moves.
//!
//! Offsets are index deltas on the padded grid. Two rings of border padding
//! guarantee every offset applied to a playable square stays inside the grid.

use crate::game_state::ataxx_types::{Square, EXTENDED_SIDE};

const ROW: isize = EXTENDED_SIDE as isize;

/// The 8 neighbors at Chebyshev distance 1.
pub const EXTEND_OFFSETS: [isize; 8] = [
    ROW - 1,
    ROW,
    ROW + 1,
    -1,
    1,
    -ROW - 1,
    -ROW,
    -ROW + 1,
];

/// The 16 cells at Chebyshev distance 2.
pub const JUMP_OFFSETS: [isize; 16] = [
    2 * ROW - 2,
    2 * ROW - 1,
    2 * ROW,
    2 * ROW + 1,
    2 * ROW + 2,
    ROW - 2,
    ROW + 2,
    -2,
    2,
    -ROW - 2,
    -ROW + 2,
    -2 * ROW - 2,
    -2 * ROW - 1,
    -2 * ROW,
    -2 * ROW + 1,
    -2 * ROW + 2,
];

/// Apply `offset` to `square`. Callers pass playable squares, for which the
/// result is always a valid grid index.
#[inline]
pub const fn offset_square(square: Square, offset: isize) -> Square {
    square.wrapping_add_signed(offset)
}

#[inline]
pub fn is_extend_offset(from: Square, to: Square) -> bool {
    let delta = (to as isize).wrapping_sub(from as isize);
    EXTEND_OFFSETS.contains(&delta)
}

#[inline]
pub fn is_jump_offset(from: Square, to: Square) -> bool {
    let delta = (to as isize).wrapping_sub(from as isize);
    JUMP_OFFSETS.contains(&delta)
}
