//! Engine abstraction for automated Ataxx players.
//!
//! The game controller and the match harness drive every strategy through
//! this one trait, so players can be swapped at runtime.

use crate::game_state::ataxx_types::{Board, PieceColor};
use crate::game_state::board_errors::{BoardError, BoardResult};
use crate::moves::ataxx_move::Move;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutput {
    pub best_move: Move,
    /// Diagnostics in `info string <engine> <key> <value>` form.
    pub info_lines: Vec<String>,
}

impl EngineOutput {
    pub fn new(best_move: Move) -> Self {
        Self {
            best_move,
            info_lines: Vec::new(),
        }
    }
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Reseed the engine's random source.
    fn set_seed(&mut self, _seed: u64) {}

    /// Pick a move for `color`, which must be the side to move in a game that
    /// is still in progress. The returned move is always legal (possibly a
    /// pass).
    fn choose_move(&mut self, board: &Board, color: PieceColor) -> BoardResult<EngineOutput>;
}

/// Shared precondition of [`Engine::choose_move`].
pub fn check_turn(board: &Board, color: PieceColor) -> BoardResult<()> {
    if board.game_over() {
        return Err(BoardError::GameOver);
    }
    if board.side_to_move() != color {
        return Err(BoardError::InvalidState(format!(
            "{} asked to move but it is {}'s turn",
            color,
            board.side_to_move()
        )));
    }
    Ok(())
}
