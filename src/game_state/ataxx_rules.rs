//! Canonical Ataxx rule constants.
//!
//! Holds the literals that define a standard game: the jump limit that ends
//! play, the starting corners of each side, and the default search depth used
//! by the automated player.

use crate::game_state::ataxx_types::{square_index, PieceColor, Square};

/// Number of consecutive jumps (without an intervening extend) that ends the game.
pub const JUMP_LIMIT: u32 = 25;

/// Side that moves first after a clear.
pub const FIRST_TO_MOVE: PieceColor = PieceColor::Red;

/// Red starts on a7 and g1.
pub const RED_START_SQUARES: [Square; 2] = [square_index(0, 6), square_index(6, 0)];

/// Blue starts on a1 and g7.
pub const BLUE_START_SQUARES: [Square; 2] = [square_index(0, 0), square_index(6, 6)];

/// Default maximum search depth of the automated player.
pub const DEFAULT_SEARCH_DEPTH: u8 = 4;

/// Largest number of open cells at which the search recurses past one ply.
pub const DEEP_SEARCH_OPEN_CELLS: u32 = 5;
