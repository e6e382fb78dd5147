//! Uniform random-move engine.
//!
//! Picks any legal move with equal probability. Used as a baseline opponent
//! in match series and to drive random openings.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engines::engine_trait::{check_turn, Engine, EngineOutput};
use crate::game_state::ataxx_types::{Board, PieceColor};
use crate::game_state::board_errors::{BoardError, BoardResult};
use crate::move_generation::legal_move_generator::generate_legal_moves;

pub struct RandomEngine<R = StdRng> {
    rng: R,
}

impl RandomEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng + SeedableRng + Send> RandomEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + SeedableRng + Send> Engine for RandomEngine<R> {
    fn name(&self) -> &str {
        "Ataxx Random"
    }

    fn set_seed(&mut self, seed: u64) {
        self.rng = R::seed_from_u64(seed);
    }

    fn choose_move(&mut self, board: &Board, color: PieceColor) -> BoardResult<EngineOutput> {
        check_turn(board, color)?;

        let legal_moves = generate_legal_moves(board);
        let picked = *legal_moves
            .choose(&mut self.rng)
            .ok_or_else(|| BoardError::InvalidState("no legal moves generated".to_owned()))?;

        let mut out = EngineOutput::new(picked);
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));
        Ok(out)
    }
}
