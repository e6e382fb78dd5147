use crate::game_state::ataxx_types::Board;
use crate::game_state::board_errors::BoardResult;
use crate::move_generation::legal_move_generator::generate_legal_moves_in_place;
use crate::moves::ataxx_move::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub extends: usize,
    pub jumps: usize,
    pub passes: usize,
    pub conversions: usize,
}

/// Count leaf positions `depth` plies below `board` using make/undo on a
/// private copy. Finished games have no successors.
pub fn perft(board: &Board, depth: u8) -> BoardResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut scratch = board.clone();
    let mut counts = PerftCounts::default();
    perft_recurse(&mut scratch, depth, &mut counts)?;
    Ok(counts)
}

fn perft_recurse(board: &mut Board, depth: u8, counts: &mut PerftCounts) -> BoardResult<()> {
    if board.game_over() {
        return Ok(());
    }

    let mut moves = Vec::with_capacity(64);
    generate_legal_moves_in_place(board, &mut moves);

    for mv in moves {
        board.make_move(mv)?;

        if depth == 1 {
            counts.nodes += 1;
            match mv {
                Move::Pass => counts.passes += 1,
                Move::Extend { .. } => counts.extends += 1,
                Move::Jump { .. } => counts.jumps += 1,
            }
            counts.conversions += board
                .history()
                .last()
                .map_or(0, |record| record.converted.len());
        } else {
            perft_recurse(board, depth - 1, counts)?;
        }

        board.undo()?;
    }

    Ok(())
}
