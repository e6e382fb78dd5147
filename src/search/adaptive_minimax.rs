//! Depth-limited negamax with alpha-beta pruning and a phase-adaptive cutoff.
//!
//! While the board is wide open, or the game is nearly decided by piece
//! count, a full-width search buys little, so the search collapses to a
//! one-ply greedy scan. Recursion only happens in the crowded middle ground
//! where few cells remain open.

use crate::game_state::ataxx_rules::{DEEP_SEARCH_OPEN_CELLS, DEFAULT_SEARCH_DEPTH};
use crate::game_state::ataxx_types::Board;
use crate::game_state::board_errors::{BoardError, BoardResult};
use crate::move_generation::legal_move_generator::generate_piece_moves_in_place;
use crate::moves::ataxx_move::Move;
use crate::search::board_scoring::{terminal_score, BoardScorer, WIN_SCORE};

const INFINITY: i32 = WIN_SCORE + 1_000;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_SEARCH_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Every root move scoring `best_score`, in generation order.
    pub best_moves: Vec<Move>,
    pub best_score: i32,
    pub nodes: u64,
    /// 0 for a forced pass, 1 for a one-ply scan, otherwise `max_depth`.
    pub depth_used: u8,
}

/// Search `board` for the side to move without mutating it.
///
/// Fails with [`BoardError::GameOver`] on a finished position. When the side
/// to move has no extend or jump the result is a lone `Pass`.
pub fn adaptive_search<S: BoardScorer>(
    board: &Board,
    scorer: &S,
    config: SearchConfig,
) -> BoardResult<SearchResult> {
    if board.game_over() {
        return Err(BoardError::GameOver);
    }

    let mut moves = Vec::with_capacity(64);
    generate_piece_moves_in_place(board, board.side_to_move(), &mut moves);
    if moves.is_empty() {
        return Ok(SearchResult {
            best_moves: vec![Move::Pass],
            best_score: scorer.score(board),
            nodes: 0,
            depth_used: 0,
        });
    }

    let mut scratch = board.clone();
    let mut nodes = 0u64;
    let max_depth = config.max_depth;

    if use_one_ply(&scratch, max_depth, max_depth) {
        let mut best_moves = Vec::new();
        let best_score =
            one_ply_scan(&mut scratch, scorer, &moves, 0, &mut nodes, Some(&mut best_moves))?;
        return Ok(SearchResult {
            best_moves,
            best_score,
            nodes,
            depth_used: 1,
        });
    }

    let mut best_score = -INFINITY;
    let mut best_moves = Vec::new();

    for mv in moves {
        // One point below the best so far keeps ties exact.
        let alpha = if best_score == -INFINITY {
            -INFINITY
        } else {
            best_score - 1
        };

        scratch.make_move(mv)?;
        nodes += 1;
        let score = -negamax(
            &mut scratch,
            scorer,
            max_depth - 1,
            max_depth,
            -INFINITY,
            -alpha,
            1,
            &mut nodes,
        )?;
        scratch.undo()?;

        if score > best_score {
            best_score = score;
            best_moves.clear();
            best_moves.push(mv);
        } else if score == best_score {
            best_moves.push(mv);
        }
    }

    Ok(SearchResult {
        best_moves,
        best_score,
        nodes,
        depth_used: max_depth,
    })
}

/// True when the node at `depth` is evaluated by the one-ply scan instead
/// of recursing.
#[inline]
pub(crate) fn use_one_ply(board: &Board, depth: u8, max_depth: u8) -> bool {
    depth == 0
        || board.empty_remaining() <= u32::from(max_depth)
        || board.open_cells() > DEEP_SEARCH_OPEN_CELLS
}

#[allow(clippy::too_many_arguments)]
fn negamax<S: BoardScorer>(
    board: &mut Board,
    scorer: &S,
    depth: u8,
    max_depth: u8,
    mut alpha: i32,
    beta: i32,
    ply: u32,
    nodes: &mut u64,
) -> BoardResult<i32> {
    if board.game_over() {
        return Ok(terminal_score(board, ply));
    }

    let mut moves = Vec::with_capacity(64);
    generate_piece_moves_in_place(board, board.side_to_move(), &mut moves);
    if moves.is_empty() {
        board.make_move(Move::Pass)?;
        *nodes += 1;
        let score = -negamax(
            board,
            scorer,
            depth.saturating_sub(1),
            max_depth,
            -beta,
            -alpha,
            ply + 1,
            nodes,
        )?;
        board.undo()?;
        return Ok(score);
    }

    if use_one_ply(board, depth, max_depth) {
        return one_ply_scan(board, scorer, &moves, ply, nodes, None);
    }

    let mut best = -INFINITY;
    for mv in moves {
        board.make_move(mv)?;
        *nodes += 1;
        let score = -negamax(
            board,
            scorer,
            depth - 1,
            max_depth,
            -beta,
            -alpha,
            ply + 1,
            nodes,
        )?;
        board.undo()?;

        if score > best {
            best = score;
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            break;
        }
    }

    Ok(best)
}

/// Greedy scan over `moves` for the side to move at `ply`.
///
/// Each move is scored by the position it leaves, and when `best_moves` is
/// given it collects every move reaching the maximum, immediate wins
/// included. Without `best_moves` the first winning move returns at once.
pub(crate) fn one_ply_scan<S: BoardScorer>(
    board: &mut Board,
    scorer: &S,
    moves: &[Move],
    ply: u32,
    nodes: &mut u64,
    mut best_moves: Option<&mut Vec<Move>>,
) -> BoardResult<i32> {
    let mover = board.side_to_move();
    let mut best = -INFINITY;

    for &mv in moves {
        board.make_move(mv)?;
        *nodes += 1;

        let score = if board.game_over() {
            // Below the root the first win settles the node.
            if board.winner() == Some(mover) && best_moves.is_none() {
                board.undo()?;
                return Ok(WIN_SCORE - (ply as i32 + 1));
            }
            -terminal_score(board, ply + 1)
        } else {
            -scorer.score(board)
        };
        board.undo()?;

        if score > best {
            best = score;
            if let Some(best_moves) = best_moves.as_deref_mut() {
                best_moves.clear();
                best_moves.push(mv);
            }
        } else if score == best {
            if let Some(best_moves) = best_moves.as_deref_mut() {
                best_moves.push(mv);
            }
        }
    }

    Ok(best)
}
