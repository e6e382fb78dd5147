//! Automated player backed by the adaptive minimax search.
//!
//! Ties between equally scored moves are broken uniformly at random with an
//! injectable RNG, so a seeded engine replays the same game.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engines::engine_trait::{check_turn, Engine, EngineOutput};
use crate::game_state::ataxx_types::{Board, PieceColor};
use crate::game_state::board_errors::{BoardError, BoardResult};
use crate::search::adaptive_minimax::{adaptive_search, SearchConfig};
use crate::search::board_scoring::PieceDifferentialScorer;

pub struct MinimaxEngine<R = StdRng> {
    config: SearchConfig,
    scorer: PieceDifferentialScorer,
    rng: R,
}

impl MinimaxEngine<StdRng> {
    /// Engine searching to `depth`, seeded from the operating system.
    pub fn new(depth: u8) -> Self {
        Self::with_rng(depth, StdRng::from_os_rng())
    }

    pub fn seeded(depth: u8, seed: u64) -> Self {
        Self::with_rng(depth, StdRng::seed_from_u64(seed))
    }
}

impl Default for MinimaxEngine<StdRng> {
    fn default() -> Self {
        Self::new(SearchConfig::default().max_depth)
    }
}

impl<R: Rng + SeedableRng + Send> MinimaxEngine<R> {
    pub fn with_rng(depth: u8, rng: R) -> Self {
        Self {
            config: SearchConfig { max_depth: depth },
            scorer: PieceDifferentialScorer,
            rng,
        }
    }

    pub fn depth(&self) -> u8 {
        self.config.max_depth
    }
}

impl<R: Rng + SeedableRng + Send> Engine for MinimaxEngine<R> {
    fn name(&self) -> &str {
        "Ataxx Minimax"
    }

    fn set_seed(&mut self, seed: u64) {
        self.rng = R::seed_from_u64(seed);
    }

    fn choose_move(&mut self, board: &Board, color: PieceColor) -> BoardResult<EngineOutput> {
        check_turn(board, color)?;

        let result = adaptive_search(board, &self.scorer, self.config)?;
        let picked = *result
            .best_moves
            .choose(&mut self.rng)
            .ok_or_else(|| BoardError::InvalidState("search returned no moves".to_owned()))?;

        let mut out = EngineOutput::new(picked);
        out.info_lines.push(format!(
            "info string minimax_engine depth {} nodes {}",
            result.depth_used, result.nodes
        ));
        out.info_lines.push(format!(
            "info string minimax_engine score {} tied {}",
            result.best_score,
            result.best_moves.len()
        ));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::MinimaxEngine;
    use crate::engines::engine_trait::Engine;
    use crate::game_state::ataxx_types::{Board, PieceColor};
    use crate::game_state::board_errors::BoardError;
    use crate::moves::ataxx_move::Move;

    #[test]
    fn seeded_engines_agree() {
        let board = Board::new();
        let mut first = MinimaxEngine::seeded(4, 11);
        let mut second = MinimaxEngine::seeded(4, 11);

        for _ in 0..5 {
            let a = first.choose_move(&board, PieceColor::Red).expect("move");
            let b = second.choose_move(&board, PieceColor::Red).expect("move");
            assert_eq!(a.best_move, b.best_move);
            assert!(board.legal_move(a.best_move));
        }
    }

    #[test]
    fn set_seed_restarts_the_tie_break_sequence() {
        let board = Board::new();
        let mut engine = MinimaxEngine::seeded(4, 3);
        let picks: Vec<Move> = (0..4)
            .map(|_| engine.choose_move(&board, PieceColor::Red).expect("move").best_move)
            .collect();

        engine.set_seed(3);
        let again: Vec<Move> = (0..4)
            .map(|_| engine.choose_move(&board, PieceColor::Red).expect("move").best_move)
            .collect();
        assert_eq!(picks, again);
    }

    #[test]
    fn wrong_color_and_finished_games_are_rejected() {
        let mut engine = MinimaxEngine::seeded(4, 1);
        let board = Board::new();
        assert!(matches!(
            engine.choose_move(&board, PieceColor::Blue),
            Err(BoardError::InvalidState(_))
        ));

        let finished = Board::from_rows(
            [
                "r------", "-------", "-------", "-------", "-------", "-------", "-------",
            ],
            PieceColor::Red,
        );
        assert_eq!(
            engine.choose_move(&finished, PieceColor::Red),
            Err(BoardError::GameOver)
        );
    }

    #[test]
    fn output_carries_search_diagnostics() {
        let mut engine = MinimaxEngine::seeded(4, 5);
        let out = engine
            .choose_move(&Board::new(), PieceColor::Red)
            .expect("move");
        assert!(out.best_move.is_extend());
        assert!(out
            .info_lines
            .iter()
            .any(|line| line.starts_with("info string minimax_engine")));
    }
}
