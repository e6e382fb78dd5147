//! Legal move enumeration.
//!
//! Extends into the same destination reach the same position no matter which
//! neighbor they start from, so each destination is generated once. Jumps are
//! all distinct because each vacates a different source.

use crate::game_state::ataxx_types::{playable_squares, Board, PieceColor, EXTENDED_CELLS};
use crate::moves::ataxx_move::Move;
use crate::moves::move_offsets::{offset_square, EXTEND_OFFSETS, JUMP_OFFSETS};

/// Append every distinct extend and jump available to `color`, extends
/// first. Pass is never included.
pub fn generate_piece_moves_in_place(board: &Board, color: PieceColor, out: &mut Vec<Move>) {
    let mut extend_targets = [false; EXTENDED_CELLS];

    for from in playable_squares().filter(|sq| board.get(*sq) == color) {
        for offset in EXTEND_OFFSETS {
            let to = offset_square(from, offset);
            if board.get(to) == PieceColor::Empty && !extend_targets[to] {
                extend_targets[to] = true;
                out.push(Move::Extend { from, to });
            }
        }
    }

    for from in playable_squares().filter(|sq| board.get(*sq) == color) {
        for offset in JUMP_OFFSETS {
            let to = offset_square(from, offset);
            if board.get(to) == PieceColor::Empty {
                out.push(Move::Jump { from, to });
            }
        }
    }
}

/// Legal moves for the side to move, with a lone `Pass` when it has no
/// extend or jump. Game-over detection is left to the caller.
pub fn generate_legal_moves_in_place(board: &Board, out: &mut Vec<Move>) {
    let before = out.len();
    generate_piece_moves_in_place(board, board.side_to_move(), out);
    if out.len() == before {
        out.push(Move::Pass);
    }
}

pub fn generate_legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    generate_legal_moves_in_place(board, &mut moves);
    moves
}

#[cfg(test)]
mod tests {
    use super::{generate_legal_moves, generate_piece_moves_in_place};
    use crate::game_state::ataxx_types::{Board, PieceColor};
    use crate::moves::ataxx_move::Move;

    #[test]
    fn startpos_has_sixteen_moves_per_side() {
        let board = Board::new();
        let moves = generate_legal_moves(&board);
        assert_eq!(moves.len(), 16);
        assert_eq!(moves.iter().filter(|m| m.is_extend()).count(), 6);
        assert_eq!(moves.iter().filter(|m| m.is_jump()).count(), 10);
        assert!(moves.iter().all(|m| board.legal_move(*m)));

        let mut blue = Vec::new();
        generate_piece_moves_in_place(&board, PieceColor::Blue, &mut blue);
        assert_eq!(blue.len(), 16);
    }

    #[test]
    fn shared_extend_targets_are_generated_once() {
        let mut board = Board::new();
        board.make_move("a7-b7".parse().expect("parse")).expect("legal");
        board.make_move("a1-a2".parse().expect("parse")).expect("legal");

        let moves = generate_legal_moves(&board);
        let mut targets: Vec<_> = moves
            .iter()
            .filter(|m| m.is_extend())
            .filter_map(|m| m.to_square())
            .collect();
        let total = targets.len();
        targets.sort_unstable();
        targets.dedup();
        assert_eq!(targets.len(), total);
    }

    #[test]
    fn pass_only_when_no_piece_moves() {
        let board = Board::new();
        assert!(!generate_legal_moves(&board).contains(&Move::Pass));
    }
}
