//! Crate root module declarations for the Ataxx engine project.
//!
//! This file exposes all top-level subsystems (board state, move generation,
//! search, engines, the command-driven game controller and utility helpers)
//! so binaries, benches and external tooling can import stable module paths.

pub mod game_state {
    pub mod ataxx_rules;
    pub mod ataxx_types;
    pub mod board;
    pub mod board_errors;
    pub mod board_events;
    pub mod undo_state;
}

pub mod moves {
    pub mod ataxx_move;
    pub mod move_offsets;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod search {
    pub mod adaptive_minimax;
    pub mod board_scoring;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod game {
    pub mod command;
    pub mod game_controller;
    pub mod reporter;
}

pub mod utils {
    pub mod algebraic;
    pub mod engine_match_harness;
    pub mod render_board;
}
