//! Ataxx board state on a bordered linear grid.
//!
//! `Board` is the central model: cell contents, side to move, cached piece
//! counts, the consecutive-jump counter and the undo stack used by make/undo
//! workflows in search. Move application and undo live in
//! `move_generation::legal_move_apply`.

use std::fmt;
use std::sync::Arc;

use crate::game_state::ataxx_rules::{
    BLUE_START_SQUARES, FIRST_TO_MOVE, JUMP_LIMIT, RED_START_SQUARES,
};
use crate::game_state::ataxx_types::*;
use crate::game_state::board_errors::{BoardError, BoardResult};
use crate::game_state::board_events::{BoardEvent, BoardObserver};
use crate::moves::ataxx_move::Move;
use crate::moves::move_offsets::{is_extend_offset, is_jump_offset, offset_square, EXTEND_OFFSETS, JUMP_OFFSETS};
use crate::utils::render_board::render_board;

pub struct Board {
    pub(crate) cells: [PieceColor; EXTENDED_CELLS],
    pub(crate) side_to_move: PieceColor,

    // Cached counts; `blocked_count` includes the border ring.
    pub(crate) red_count: u32,
    pub(crate) blue_count: u32,
    pub(crate) blocked_count: u32,

    pub(crate) consecutive_jumps: u32,
    pub(crate) move_count: u32,
    pub(crate) undo_stack: Vec<UndoState>,

    observers: Vec<Arc<dyn BoardObserver>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies carry the full game state but no observers, so scratch boards used
/// by search never fire notifications.
impl Clone for Board {
    fn clone(&self) -> Self {
        Self {
            cells: self.cells,
            side_to_move: self.side_to_move,
            red_count: self.red_count,
            blue_count: self.blue_count,
            blocked_count: self.blocked_count,
            consecutive_jumps: self.consecutive_jumps,
            move_count: self.move_count,
            undo_stack: self.undo_stack.clone(),
            observers: Vec::new(),
        }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
            && self.side_to_move == other.side_to_move
            && self.red_count == other.red_count
            && self.blue_count == other.blue_count
            && self.blocked_count == other.blocked_count
            && self.consecutive_jumps == other.consecutive_jumps
            && self.move_count == other.move_count
            && self.undo_stack == other.undo_stack
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("side_to_move", &self.side_to_move)
            .field("red_count", &self.red_count)
            .field("blue_count", &self.blue_count)
            .field("blocked_count", &self.blocked_count)
            .field("consecutive_jumps", &self.consecutive_jumps)
            .field("move_count", &self.move_count)
            .field("history_len", &self.undo_stack.len())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}

impl Board {
    /// A board in the starting position.
    pub fn new() -> Self {
        let mut board = Self {
            cells: [PieceColor::Blocked; EXTENDED_CELLS],
            side_to_move: FIRST_TO_MOVE,
            red_count: 0,
            blue_count: 0,
            blocked_count: 0,
            consecutive_jumps: 0,
            move_count: 0,
            undo_stack: Vec::with_capacity(128),
            observers: Vec::new(),
        };
        board.reset_cells();
        board
    }

    /// Restore the starting position: border blocked, interior empty except
    /// the four corner pieces, Red to move, no history.
    pub fn clear(&mut self) {
        self.reset_cells();
        self.notify(&BoardEvent::Cleared);
    }

    fn reset_cells(&mut self) {
        self.cells = [PieceColor::Blocked; EXTENDED_CELLS];
        for square in playable_squares() {
            self.cells[square] = PieceColor::Empty;
        }
        for square in RED_START_SQUARES {
            self.cells[square] = PieceColor::Red;
        }
        for square in BLUE_START_SQUARES {
            self.cells[square] = PieceColor::Blue;
        }

        self.side_to_move = FIRST_TO_MOVE;
        self.red_count = RED_START_SQUARES.len() as u32;
        self.blue_count = BLUE_START_SQUARES.len() as u32;
        self.blocked_count = BORDER_CELLS as u32;
        self.consecutive_jumps = 0;
        self.move_count = 0;
        self.undo_stack.clear();
    }

    /// Register an observer notified after every successful mutation.
    pub fn add_observer(&mut self, observer: Arc<dyn BoardObserver>) {
        self.observers.push(observer);
    }

    pub(crate) fn notify(&self, event: &BoardEvent) {
        for observer in &self.observers {
            observer.board_changed(event);
        }
    }

    /// Contents of `square`. Indices outside the grid read as `Blocked`.
    #[inline]
    pub fn get(&self, square: Square) -> PieceColor {
        self.cells.get(square).copied().unwrap_or(PieceColor::Blocked)
    }

    #[inline]
    pub fn side_to_move(&self) -> PieceColor {
        self.side_to_move
    }

    /// Moves and passes applied since the last clear.
    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Jumps since the last extend (or since the start of the game).
    #[inline]
    pub fn consecutive_jumps(&self) -> u32 {
        self.consecutive_jumps
    }

    /// Undo records, oldest first. One per applied move or pass.
    #[inline]
    pub fn history(&self) -> &[UndoState] {
        &self.undo_stack
    }

    pub fn last_move(&self) -> Option<Move> {
        self.undo_stack.last().map(|record| record.mv)
    }

    /// Number of cells holding `color`. `Blocked` includes the border ring
    /// and `Empty` is derived, so the four counts always sum to the grid size.
    pub fn num_pieces(&self, color: PieceColor) -> u32 {
        match color {
            PieceColor::Red => self.red_count,
            PieceColor::Blue => self.blue_count,
            PieceColor::Blocked => self.blocked_count,
            PieceColor::Empty => {
                EXTENDED_CELLS as u32 - self.red_count - self.blue_count - self.blocked_count
            }
        }
    }

    /// Blocks placed on the playable area.
    #[inline]
    pub fn num_blocks(&self) -> u32 {
        self.blocked_count - BORDER_CELLS as u32
    }

    /// Playable squares not holding a piece (blocks included).
    #[inline]
    pub fn empty_remaining(&self) -> u32 {
        PLAYABLE_CELLS as u32 - (self.red_count + self.blue_count)
    }

    /// Playable squares a piece could still move to.
    #[inline]
    pub fn open_cells(&self) -> u32 {
        self.empty_remaining() - self.num_blocks()
    }

    #[inline]
    pub(crate) fn count_mut(&mut self, color: PieceColor) -> &mut u32 {
        match color {
            PieceColor::Red => &mut self.red_count,
            PieceColor::Blue => &mut self.blue_count,
            _ => &mut self.blocked_count,
        }
    }

    /// True if some piece of `color` has an empty cell within extend or jump
    /// reach. Ignores whose turn it is.
    pub fn can_move(&self, color: PieceColor) -> bool {
        playable_squares()
            .filter(|square| self.cells[*square] == color)
            .any(|square| self.has_empty_target(square))
    }

    #[inline]
    fn has_empty_target(&self, square: Square) -> bool {
        EXTEND_OFFSETS
            .iter()
            .chain(JUMP_OFFSETS.iter())
            .any(|offset| self.cells[offset_square(square, *offset)] == PieceColor::Empty)
    }

    /// True iff `mv` is legal for the side to move.
    ///
    /// Nothing is legal once the game is over, pass included. Pass is legal
    /// only when the side to move has no extend or jump while its opponent
    /// still has one.
    pub fn legal_move(&self, mv: Move) -> bool {
        if self.decided() {
            return false;
        }
        match mv {
            Move::Pass => {
                !self.can_move(self.side_to_move) && self.can_move(self.side_to_move.opposite())
            }
            Move::Extend { from, to } => self.piece_move_allowed(from, to) && is_extend_offset(from, to),
            Move::Jump { from, to } => self.piece_move_allowed(from, to) && is_jump_offset(from, to),
        }
    }

    #[inline]
    fn piece_move_allowed(&self, from: Square, to: Square) -> bool {
        self.get(from) == self.side_to_move && self.get(to) == PieceColor::Empty
    }

    /// The end conditions read straight off the cached counters.
    #[inline]
    fn decided(&self) -> bool {
        self.consecutive_jumps >= JUMP_LIMIT
            || self.red_count == 0
            || self.blue_count == 0
            || (self.red_count + self.blue_count) as usize == PLAYABLE_CELLS
    }

    /// True iff the jump limit is reached, a side has no pieces, the board is
    /// full, or neither side can move.
    pub fn game_over(&self) -> bool {
        self.decided()
            || (!self.can_move(PieceColor::Red) && !self.can_move(PieceColor::Blue))
    }

    /// The side with more pieces, or `None` on equal counts. This is the
    /// result of the game once `game_over()` holds.
    pub fn winner(&self) -> Option<PieceColor> {
        match self.red_count.cmp(&self.blue_count) {
            std::cmp::Ordering::Greater => Some(PieceColor::Red),
            std::cmp::Ordering::Less => Some(PieceColor::Blue),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// True iff `square` and its reflections across the center row and
    /// column are all empty playable cells.
    pub fn legal_block(&self, square: Square) -> bool {
        is_playable(square)
            && reflections(square)
                .iter()
                .all(|mirrored| self.cells[*mirrored] == PieceColor::Empty)
    }

    /// Block `square` and its three reflections in one step.
    ///
    /// Blocks are not recorded in the undo history; they are meant to be
    /// placed while setting up a game.
    pub fn set_block(&mut self, square: Square) -> BoardResult<()> {
        if !self.legal_block(square) {
            return Err(BoardError::IllegalBlockPlacement(square));
        }

        for mirrored in reflections(square) {
            // Squares on a center line reflect onto themselves.
            if self.cells[mirrored] != PieceColor::Blocked {
                self.cells[mirrored] = PieceColor::Blocked;
                self.blocked_count += 1;
            }
        }

        self.notify(&BoardEvent::BlockPlaced(square));
        Ok(())
    }
}

#[cfg(test)]
impl Board {
    /// Build a position from seven rows, row 7 first, written with the dump
    /// characters `r`, `b`, `X` and `-`. History starts empty.
    pub(crate) fn from_rows(rows: [&str; SIDE], side_to_move: PieceColor) -> Self {
        let mut board = Board::new();
        board.cells = [PieceColor::Blocked; EXTENDED_CELLS];
        board.red_count = 0;
        board.blue_count = 0;
        board.blocked_count = BORDER_CELLS as u32;

        for (i, text) in rows.iter().enumerate() {
            let row = SIDE - 1 - i;
            assert_eq!(text.len(), SIDE, "row {} must have {SIDE} cells", row + 1);
            for (col, ch) in text.chars().enumerate() {
                let color = match ch {
                    'r' => PieceColor::Red,
                    'b' => PieceColor::Blue,
                    'X' => PieceColor::Blocked,
                    '-' => PieceColor::Empty,
                    other => panic!("unexpected layout character {other:?}"),
                };
                board.cells[square_index(col, row)] = color;
                match color {
                    PieceColor::Red => board.red_count += 1,
                    PieceColor::Blue => board.blue_count += 1,
                    PieceColor::Blocked => board.blocked_count += 1,
                    PieceColor::Empty => {}
                }
            }
        }

        board.side_to_move = side_to_move;
        board
    }
}
