//! Static evaluation for Ataxx positions.
//!
//! Search delegates leaf scoring to [`BoardScorer`], so the heuristic can be
//! swapped without touching the search code. Scores are always from the
//! perspective of the side to move.

use crate::game_state::ataxx_types::Board;

/// Magnitude of a decided game. Far above any piece differential.
pub const WIN_SCORE: i32 = 10_000;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, board: &Board) -> i32;
}

/// Pieces of the side to move minus pieces of its opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceDifferentialScorer;

impl BoardScorer for PieceDifferentialScorer {
    #[inline]
    fn score(&self, board: &Board) -> i32 {
        let mover = board.side_to_move();
        board.num_pieces(mover) as i32 - board.num_pieces(mover.opposite()) as i32
    }
}

/// Score of a finished game for the side to move, `ply` plies below the
/// search root. Quicker wins and slower losses score better.
#[inline]
pub fn terminal_score(board: &Board, ply: u32) -> i32 {
    match board.winner() {
        None => 0,
        Some(color) if color == board.side_to_move() => WIN_SCORE - ply as i32,
        Some(_) => -WIN_SCORE + ply as i32,
    }
}
