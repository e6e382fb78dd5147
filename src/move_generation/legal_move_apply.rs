//! Make/undo for Ataxx moves.
//!
//! Every applied move pushes one `UndoState` holding exactly what is needed
//! to invert it: the move, the converted squares and the previous jump
//! counter. Undo never recomputes anything.

use crate::game_state::ataxx_types::{Board, PieceColor};
use crate::game_state::board_errors::{BoardError, BoardResult};
use crate::game_state::board_events::BoardEvent;
use crate::game_state::undo_state::{Conversions, UndoState};
use crate::moves::ataxx_move::Move;
use crate::moves::move_offsets::{offset_square, EXTEND_OFFSETS};

impl Board {
    /// Apply `mv` for the side to move. Illegal moves are rejected with
    /// [`BoardError::IllegalMove`] and leave the board untouched.
    pub fn make_move(&mut self, mv: Move) -> BoardResult<()> {
        if !self.legal_move(mv) {
            return Err(BoardError::IllegalMove(mv));
        }

        self.apply_legal_move(mv);
        self.notify(&BoardEvent::MovePlayed(mv));
        Ok(())
    }

    /// Pass the turn. Fails when the side to move has an extend or jump, or
    /// when the game is over.
    pub fn pass(&mut self) -> BoardResult<()> {
        self.make_move(Move::Pass)
    }

    fn apply_legal_move(&mut self, mv: Move) {
        let mover = self.side_to_move;
        let opponent = mover.opposite();
        let prev_consecutive_jumps = self.consecutive_jumps;
        let mut converted = Conversions::default();

        match mv {
            Move::Pass => {}
            Move::Extend { to, .. } | Move::Jump { to, .. } => {
                self.cells[to] = mover;
                for offset in EXTEND_OFFSETS {
                    let neighbor = offset_square(to, offset);
                    if self.cells[neighbor] == opponent {
                        self.cells[neighbor] = mover;
                        converted.push(neighbor);
                    }
                }

                let conversions = converted.len() as u32;
                if let Move::Jump { from, .. } = mv {
                    self.cells[from] = PieceColor::Empty;
                    *self.count_mut(mover) += conversions;
                    self.consecutive_jumps += 1;
                } else {
                    *self.count_mut(mover) += conversions + 1;
                    self.consecutive_jumps = 0;
                }
                *self.count_mut(opponent) -= conversions;
            }
        }

        self.undo_stack.push(UndoState {
            mv,
            converted,
            prev_consecutive_jumps,
        });
        self.move_count += 1;
        self.side_to_move = opponent;
    }

    /// Revert the most recent move or pass and return it.
    ///
    /// Fails with [`BoardError::UnderflowOnUndo`] when there is nothing to
    /// undo. Blocks are not part of the history, so a jump whose vacated
    /// source was later blocked cannot be undone.
    pub fn undo(&mut self) -> BoardResult<Move> {
        let record = *self.undo_stack.last().ok_or(BoardError::UnderflowOnUndo)?;
        if let Move::Jump { from, .. } = record.mv {
            if self.cells[from] != PieceColor::Empty {
                return Err(BoardError::InvalidState(format!(
                    "cannot undo {}: its source square is no longer empty",
                    record.mv
                )));
            }
        }
        self.undo_stack.pop();

        let mover = self.side_to_move.opposite();
        let opponent = self.side_to_move;

        match record.mv {
            Move::Pass => {}
            Move::Extend { to, .. } | Move::Jump { to, .. } => {
                self.cells[to] = PieceColor::Empty;
                for square in record.converted.as_slice() {
                    self.cells[*square] = opponent;
                }

                let conversions = record.converted.len() as u32;
                if let Move::Jump { from, .. } = record.mv {
                    self.cells[from] = mover;
                    *self.count_mut(mover) -= conversions;
                } else {
                    *self.count_mut(mover) -= conversions + 1;
                }
                *self.count_mut(opponent) += conversions;
            }
        }

        self.consecutive_jumps = record.prev_consecutive_jumps;
        self.move_count -= 1;
        self.side_to_move = mover;
        self.notify(&BoardEvent::MoveUndone(record.mv));
        Ok(record.mv)
    }
}

#[cfg(test)]
mod tests {
    use rand::prelude::IndexedRandom;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::game_state::ataxx_types::*;
    use crate::game_state::board_errors::BoardError;
    use crate::move_generation::legal_move_generator::generate_legal_moves;
    use crate::moves::ataxx_move::Move;

    const GAME1: [&str; 6] = ["a7-b7", "a1-a2", "a7-a6", "a2-a3", "a6-a5", "a3-a4"];
    const GAME2: [&str; 6] = ["a7-a6", "a1-a2", "a7-a5", "a2-a3", "a5-b3", "a1-b2"];

    fn play(board: &mut Board, moves: &[&str]) {
        for text in moves {
            let mv: Move = text.parse().expect("test move should parse");
            board.make_move(mv).expect("test move should be legal");
        }
    }

    #[test]
    fn undo_restores_start_and_replay_matches() {
        let start = Board::new();
        let mut board = Board::new();
        play(&mut board, &GAME1);
        let after = board.clone();

        for _ in 0..GAME1.len() {
            board.undo().expect("undo should succeed");
        }
        assert_eq!(board, start, "failed to return to start");

        play(&mut board, &GAME1);
        assert_eq!(board, after, "second pass failed to reach same position");
    }

    #[test]
    fn extends_convert_neighbors() {
        let mut board = Board::new();
        play(&mut board, &GAME1);

        for square in [68, 57, 46, 35, 24, 96] {
            assert_eq!(board.get(square), PieceColor::Blue, "square {square}");
        }
        for square in [79, 91, 30, 90] {
            assert_eq!(board.get(square), PieceColor::Red, "square {square}");
        }
        assert_eq!(board.num_pieces(PieceColor::Blue), 6);
        assert_eq!(board.num_pieces(PieceColor::Red), 4);
        assert_eq!(board.consecutive_jumps(), 0);
        assert_eq!(board.move_count(), 6);
        assert_eq!(board.history().len(), 6);
    }

    #[test]
    fn jumps_vacate_source_and_convert() {
        let mut board = Board::new();
        play(&mut board, &GAME2);

        assert_eq!(board.get(79), PieceColor::Red);
        for square in [24, 35, 46, 47, 36] {
            assert_eq!(board.get(square), PieceColor::Blue, "square {square}");
        }
        // a7 and a5 were vacated by jumps.
        assert_eq!(board.get(90), PieceColor::Empty);
        assert_eq!(board.get(68), PieceColor::Empty);
        assert_eq!(board.num_pieces(PieceColor::Blue), 6);
        assert_eq!(board.num_pieces(PieceColor::Red), 2);
    }

    #[test]
    fn jump_counter_saved_and_restored() {
        let mut board = Board::new();
        play(&mut board, &["a7-a5", "a1-a3"]);
        assert_eq!(board.consecutive_jumps(), 2);

        play(&mut board, &["a5-b5"]);
        assert_eq!(board.consecutive_jumps(), 0);

        board.undo().expect("undo extend");
        assert_eq!(board.consecutive_jumps(), 2);
        board.undo().expect("undo jump");
        assert_eq!(board.consecutive_jumps(), 1);
    }

    #[test]
    fn illegal_move_leaves_board_unchanged() {
        let mut board = Board::new();
        let before = board.clone();
        let mv: Move = "a1-a2".parse().expect("parse");
        assert_eq!(board.make_move(mv), Err(BoardError::IllegalMove(mv)));
        assert_eq!(board.pass(), Err(BoardError::IllegalMove(Move::Pass)));
        assert_eq!(board, before);
    }

    #[test]
    fn undo_on_empty_history_is_rejected() {
        let mut board = Board::new();
        assert_eq!(board.undo(), Err(BoardError::UnderflowOnUndo));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn pass_is_recorded_and_undone() {
        let mut board = Board::new();
        // Wall Red's g1 piece in and remove the a7 piece so Red cannot move.
        for name in ["b1", "c1", "a2", "b2", "c2", "a3", "b3", "c3"] {
            let square = crate::utils::algebraic::algebraic_to_square(name).expect("square");
            board.set_block(square).expect("block");
        }
        board.cells[90] = PieceColor::Empty;
        board.red_count = 1;
        board.cells[square_index(3, 3)] = PieceColor::Blue;
        board.blue_count = 3;
        assert!(!board.can_move(PieceColor::Red));
        assert!(!board.game_over());

        let before = board.clone();
        board.pass().expect("red has no moves and may pass");
        assert_eq!(board.side_to_move(), PieceColor::Blue);
        assert_eq!(board.move_count(), 1);
        assert_eq!(board.last_move(), Some(Move::Pass));

        assert_eq!(board.undo(), Ok(Move::Pass));
        assert_eq!(board, before);
    }

    #[test]
    fn nothing_is_playable_after_a_wipe_out() {
        let mut board = Board::from_rows(
            [
                "-------",
                "-------",
                "-------",
                "--rb---",
                "-------",
                "-------",
                "-------",
            ],
            PieceColor::Red,
        );
        play(&mut board, &["c4-c5"]);
        assert_eq!(board.num_pieces(PieceColor::Blue), 0);
        assert!(board.game_over());

        let before = board.clone();
        assert_eq!(board.pass(), Err(BoardError::IllegalMove(Move::Pass)));
        board.side_to_move = PieceColor::Red;
        let mv: Move = "c5-c6".parse().expect("parse");
        assert!(!board.legal_move(mv));
        board.side_to_move = PieceColor::Blue;
        assert_eq!(board, before);
    }

    #[test]
    fn pass_is_illegal_when_neither_side_can_move() {
        let mut board = Board::new();
        for name in ["b1", "c1", "a2", "b2", "c2", "a3", "b3", "c3"] {
            let square = crate::utils::algebraic::algebraic_to_square(name).expect("square");
            board.set_block(square).expect("block");
        }
        assert!(board.game_over());
        assert!(!board.legal_move(Move::Pass));
        assert_eq!(board.pass(), Err(BoardError::IllegalMove(Move::Pass)));
        assert_eq!(board.move_count(), 0);
    }

    #[test]
    fn random_playouts_undo_exactly() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let start = Board::new();
            let mut board = start.clone();
            let mut snapshots = vec![board.clone()];

            while !board.game_over() && board.move_count() < 120 {
                let moves = generate_legal_moves(&board);
                let mv = *moves.choose(&mut rng).expect("at least a pass is available");
                board.make_move(mv).expect("generated move should be legal");
                snapshots.push(board.clone());

                let total: u32 = [PieceColor::Red, PieceColor::Blue, PieceColor::Blocked, PieceColor::Empty]
                    .iter()
                    .map(|c| board.num_pieces(*c))
                    .sum();
                assert_eq!(total as usize, EXTENDED_CELLS);
            }

            snapshots.pop();
            while let Some(expected) = snapshots.pop() {
                board.undo().expect("undo should succeed");
                assert_eq!(board, expected);
            }
            assert_eq!(board, start);
        }
    }
}
