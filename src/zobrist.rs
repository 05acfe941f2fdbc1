//! Zobrist hashing tables.
//!
//! Both tables are generated once per process from fixed seeds, so equal
//! positions hash equally no matter how they were reached.

use once_cell::sync::Lazy;

use crate::constants::{NUM_SQUARES, ZOBRIST_PIECE_SEED, ZOBRIST_TO_PLAY_SEED};
use crate::piece::{Color, Piece, PieceType};

const NUM_COLORS: usize = 3;

type PieceTable = [[[u64; PieceType::COUNT]; NUM_COLORS]; NUM_SQUARES];

static PIECE_KEYS: Lazy<Box<PieceTable>> = Lazy::new(|| {
    let mut rng = fastrand::Rng::with_seed(ZOBRIST_PIECE_SEED);
    let mut table = Box::new([[[0u64; PieceType::COUNT]; NUM_COLORS]; NUM_SQUARES]);
    for square in table.iter_mut() {
        for color in square.iter_mut() {
            for key in color.iter_mut() {
                *key = rng.u64(..);
            }
        }
    }
    table
});

static TO_PLAY_KEYS: Lazy<[u64; 2]> = Lazy::new(|| {
    let mut rng = fastrand::Rng::with_seed(ZOBRIST_TO_PLAY_SEED);
    [rng.u64(..), rng.u64(..)]
});

/// Hash term of `piece` standing on the square with flat index `index`.
#[inline]
pub fn piece_key(index: usize, piece: &Piece) -> u64 {
    PIECE_KEYS[index][piece.color.index()][piece.piece_type.index()]
}

/// Hash term of the side to move.
#[inline]
pub fn to_play_key(color: Color) -> u64 {
    match color {
        Color::Blue => TO_PLAY_KEYS[1],
        _ => TO_PLAY_KEYS[0],
    }
}
