//! Board coordinates.
//!
//! Squares print as a file letter (`A`..`K`, no `J`) followed by a rank
//! character (`1`..`9`, then `:` for rank 10), e.g. `A1`, `K:`.

use std::fmt;
use std::ops::Add;

use crate::constants::{BOARD_SIZE, FILE_CHARS};

/// A square given by file `x` and rank `y`, both 0-based.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub x: i8,
    pub y: i8,
}

/// A displacement between two squares.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Offset {
    pub dx: i8,
    pub dy: i8,
}

/// Orthogonal unit steps: up, down, right, left.
pub const DIRECTIONS: [Offset; 4] = [
    Offset { dx: 0, dy: 1 },
    Offset { dx: 0, dy: -1 },
    Offset { dx: 1, dy: 0 },
    Offset { dx: -1, dy: 0 },
];

impl Square {
    pub const fn new(x: i8, y: i8) -> Self {
        Square { x, y }
    }

    pub fn on_board(self) -> bool {
        (0..BOARD_SIZE as i8).contains(&self.x) && (0..BOARD_SIZE as i8).contains(&self.y)
    }

    /// Flat index into the board array. Only meaningful for on-board squares.
    #[inline]
    pub fn index(self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }

    pub fn from_index(index: usize) -> Self {
        Square::new((index % BOARD_SIZE) as i8, (index / BOARD_SIZE) as i8)
    }

    /// Mirror the rank, turning a blue-relative square into a red-relative one.
    pub fn mirrored(self) -> Self {
        Square::new(self.x, BOARD_SIZE as i8 - 1 - self.y)
    }

    /// Parse a two-character square such as `E4` or `a:`.
    pub fn parse(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = FILE_CHARS
            .iter()
            .position(|&f| f == bytes[0].to_ascii_uppercase())?;
        let rank = bytes[1].checked_sub(b'1')?;
        if rank as usize >= BOARD_SIZE {
            return None;
        }
        Some(Square::new(file as i8, rank as i8))
    }
}

impl Add<Offset> for Square {
    type Output = Square;

    fn add(self, rhs: Offset) -> Square {
        Square::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Offset {
    pub fn between(from: Square, to: Square) -> Self {
        Offset {
            dx: to.x - from.x,
            dy: to.y - from.y,
        }
    }

    pub fn scaled(self, k: i8) -> Self {
        Offset {
            dx: self.dx * k,
            dy: self.dy * k,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = FILE_CHARS[self.x as usize] as char;
        let rank = (b'1' + self.y as u8) as char;
        write!(f, "{file}{rank}")
    }
}
