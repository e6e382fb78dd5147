//! Errors raised by board, search and engine operations.
//!
//! Every failing operation is all-or-nothing: when one of these is returned
//! the board is exactly as it was before the call.

use thiserror::Error;

use crate::game_state::ataxx_types::Square;
use crate::moves::ataxx_move::Move;

pub type BoardResult<T> = Result<T, BoardError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("illegal move: {0}")]
    IllegalMove(Move),

    #[error("illegal block placement at square {0}")]
    IllegalBlockPlacement(Square),

    #[error("invalid state: {0}")]
    InvalidState(String),

    /// `undo` with an empty history. Callers treat this as a bug.
    #[error("undo called with no moves to undo")]
    UnderflowOnUndo,

    #[error("game is already over")]
    GameOver,

    #[error("invalid notation: {0}")]
    InvalidNotation(String),
}
