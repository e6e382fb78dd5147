//! Change notifications for rendering and other board observers.

use crate::game_state::ataxx_types::Square;
use crate::moves::ataxx_move::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    Cleared,
    /// A move or pass was applied.
    MovePlayed(Move),
    /// Blocks were placed on this square and its reflections.
    BlockPlaced(Square),
    MoveUndone(Move),
}

/// Receives a [`BoardEvent`] after every successful board mutation.
pub trait BoardObserver: Send + Sync {
    fn board_changed(&self, event: &BoardEvent);
}
