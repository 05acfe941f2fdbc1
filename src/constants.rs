//! Constants for board geometry, the action space, and game limits.
//!
//! The board is a fixed 10x10 grid stored as a flat array indexed by
//! `rank * BOARD_SIZE + file`, with rank 0 being the first rank of the red
//! player.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const BOARD_SIZE: usize = 10;

/// Number of squares on the board.
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// File letters as they appear in move notation. There is no `J` file.
pub const FILE_CHARS: &[u8; BOARD_SIZE] = b"ABCDEFGHIK";

/// Number of combatant piece types per color.
pub const NUM_PIECE_TYPES: usize = 12;

/// Length of the living / captured piece count vectors (red first, then blue).
pub const NUM_PIECE_COUNTS: usize = NUM_PIECE_TYPES * 2;

// =============================================================================
// Action Space
// =============================================================================

/// Destinations per origin square: up to 9 steps in each of 4 directions.
pub const NUM_ACTION_DESTINATIONS: usize = 4 * (BOARD_SIZE - 1);

/// Size of the dense action space.
pub const NUM_DISTINCT_ACTIONS: usize = NUM_SQUARES * NUM_ACTION_DESTINATIONS;

// =============================================================================
// Game Limits
// =============================================================================

/// Number of players.
pub const NUM_PLAYERS: usize = 2;

/// A position seen this many times is a draw.
pub const NUM_REPETITIONS_TO_DRAW: u32 = 5;

/// Games whose move number passes this are drawn.
pub const MAX_MOVE_NUMBER: u32 = 1000;

/// Upper bound on the number of actions in one game.
pub const MAX_GAME_LENGTH: usize = 3000;

/// History length from which the anti-loop filter applies to legal actions.
pub const ANTI_LOOP_MIN_HISTORY: usize = 8;

// =============================================================================
// Utilities
// =============================================================================

pub const WIN_UTILITY: f64 = 1.0;
pub const DRAW_UTILITY: f64 = 0.0;
pub const LOSS_UTILITY: f64 = -1.0;

// =============================================================================
// Hashing
// =============================================================================

/// Seed of the (square, color, type) Zobrist table.
pub const ZOBRIST_PIECE_SEED: u64 = 2765481;

/// Seed of the side-to-move Zobrist table.
pub const ZOBRIST_TO_PLAY_SEED: u64 = 284628;

// =============================================================================
// Positions
// =============================================================================

/// Starting position used when no position string is given.
pub const DEFAULT_POSITION: &str = "FEBMBEFEEFBGIBHIBEDBGJDDDHCGJGDHDLIFKDDHAA__AA__AAAA__AA__AASTQQNSQPTSUPWPVRPXPURNQONNQSNVPTNQRRTYUP r 0";
