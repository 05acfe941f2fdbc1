//! Board model.
//!
//! The board owns the 100 squares, the side to move, the move number, the
//! living and captured piece counts and an incrementally maintained Zobrist
//! hash. Every square write goes through [`Board::set`] so the hash always
//! matches the contents.
//!
//! Positions are read and written in the StraDos3 format: 100 square
//! characters starting at A1 and running along each rank up to rank 10,
//! then the side to move (`r`/`b`) and the move number, separated by spaces.

use std::fmt;

use crate::constants::{BOARD_SIZE, DEFAULT_POSITION, NUM_PIECE_COUNTS, NUM_PIECE_TYPES, NUM_SQUARES};
use crate::piece::{Color, EMPTY_PIECE, Piece, PieceType};
use crate::square::{DIRECTIONS, Square};
use crate::zobrist::{piece_key, to_play_key};

/// A move of one piece from one square to another.
///
/// `piece` is the mover as it stood before the move was resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
}

impl Move {
    pub fn new(from: Square, to: Square, piece: Piece) -> Self {
        Move { from, to, piece }
    }

    /// Same origin, destination and moving piece type.
    pub fn same_route(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to && self.piece.piece_type == other.piece.piece_type
    }
}

/// Which losses are recorded in the captured-piece vector.
///
/// The default differs from the legacy engine, which only ever counted blue
/// losses. With `Symmetric`, `living + captured` is constant for every
/// (color, type); select `BlueOnly` to reproduce legacy captured vectors.
/// Living counts drop for both colors in either mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CaptureAccounting {
    /// Every captured piece is counted for its own color.
    #[default]
    Symmetric,
    /// Legacy mode: only blue losses are counted; red captures only lower
    /// the living count.
    BlueOnly,
}

#[derive(Clone, Debug)]
pub struct Board {
    squares: [Piece; NUM_SQUARES],
    to_play: Color,
    move_number: u32,
    living: [u32; NUM_PIECE_COUNTS],
    captured: [u32; NUM_PIECE_COUNTS],
    hash: u64,
    accounting: CaptureAccounting,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Index into the count vectors for a combatant of a player color.
pub fn count_index(color: Color, piece_type: PieceType) -> Option<usize> {
    let offset = match color {
        Color::Red => 0,
        Color::Blue => NUM_PIECE_TYPES,
        Color::Empty => return None,
    };
    Some(offset + piece_type.count_index()?)
}

impl Board {
    /// An empty board with red to move at move 1.
    pub fn new() -> Self {
        let mut board = Board {
            squares: [EMPTY_PIECE; NUM_SQUARES],
            to_play: Color::Red,
            move_number: 1,
            living: [0; NUM_PIECE_COUNTS],
            captured: [0; NUM_PIECE_COUNTS],
            hash: 0,
            accounting: CaptureAccounting::default(),
        };
        board.hash = board.compute_hash();
        board
    }

    /// The engine's default starting position.
    pub fn default_position() -> Self {
        Board::from_strados3(DEFAULT_POSITION).expect("default position is well formed")
    }

    /// Parse a StraDos3 position string.
    ///
    /// Returns `None` for a wrong field count, a board field that is not 100
    /// characters, an unknown square character, side to move, or move number.
    pub fn from_strados3(s: &str) -> Option<Board> {
        let fields: Vec<&str> = s.split(' ').collect();
        if fields.len() != 3 || fields[0].len() != NUM_SQUARES {
            return None;
        }

        let mut board = Board::new();
        for (index, c) in fields[0].chars().enumerate() {
            let piece = Piece::from_position_char(c)?;
            board.set(Square::from_index(index), piece);
            if let Some(i) = count_index(piece.color, piece.piece_type) {
                board.living[i] += 1;
            }
        }

        let to_play = match fields[1] {
            "r" => Color::Red,
            "b" => Color::Blue,
            _ => return None,
        };
        board.set_to_play(to_play);
        board.move_number = fields[2].parse().ok()?;
        Some(board)
    }

    /// Serialize with full information.
    pub fn to_strados3(&self) -> String {
        self.to_strados3_for(None)
    }

    /// Serialize as seen by `observer`; hidden opposing pieces become `?`.
    pub fn to_strados3_for(&self, observer: Option<Color>) -> String {
        let side = if self.to_play == Color::Blue { 'b' } else { 'r' };
        format!("{} {side} {}", self.layout_string(observer), self.move_number)
    }

    /// Only the 100 square characters of the position string.
    pub fn layout_string(&self, observer: Option<Color>) -> String {
        self.squares.iter().map(|p| p.position_char(observer)).collect()
    }

    /// Piece on `sq`. Panics if the square is off the board.
    #[inline]
    pub fn at(&self, sq: Square) -> Piece {
        assert!(sq.on_board(), "square {sq:?} is off the board");
        self.squares[sq.index()]
    }

    /// Piece on `sq`, or `None` off the board.
    pub fn get(&self, sq: Square) -> Option<Piece> {
        sq.on_board().then(|| self.squares[sq.index()])
    }

    /// Replace the content of `sq`, updating the hash.
    pub fn set(&mut self, sq: Square, piece: Piece) {
        let index = sq.index();
        self.hash ^= piece_key(index, &self.squares[index]);
        self.hash ^= piece_key(index, &piece);
        self.squares[index] = piece;
    }

    pub fn to_play(&self) -> Color {
        self.to_play
    }

    /// Change the side to move, updating the hash.
    pub fn set_to_play(&mut self, color: Color) {
        self.hash ^= to_play_key(self.to_play);
        self.hash ^= to_play_key(color);
        self.to_play = color;
    }

    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    pub fn set_move_number(&mut self, move_number: u32) {
        self.move_number = move_number;
    }

    pub(crate) fn advance_turn(&mut self) {
        self.move_number += 1;
        self.set_to_play(self.to_play.opponent());
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Hash recomputed from scratch; always equal to [`Board::hash`].
    pub fn compute_hash(&self) -> u64 {
        self.squares
            .iter()
            .enumerate()
            .fold(to_play_key(self.to_play), |h, (i, p)| h ^ piece_key(i, p))
    }

    /// Living pieces: 12 red counts followed by 12 blue counts.
    pub fn living_counts(&self) -> &[u32; NUM_PIECE_COUNTS] {
        &self.living
    }

    /// Captured pieces, laid out like [`Board::living_counts`].
    pub fn captured_counts(&self) -> &[u32; NUM_PIECE_COUNTS] {
        &self.captured
    }

    pub fn living(&self, color: Color, piece_type: PieceType) -> u32 {
        count_index(color, piece_type).map_or(0, |i| self.living[i])
    }

    pub fn captured(&self, color: Color, piece_type: PieceType) -> u32 {
        count_index(color, piece_type).map_or(0, |i| self.captured[i])
    }

    pub fn capture_accounting(&self) -> CaptureAccounting {
        self.accounting
    }

    pub fn set_capture_accounting(&mut self, accounting: CaptureAccounting) {
        self.accounting = accounting;
    }

    /// Remove `piece` from the counts after it was taken off the board.
    pub(crate) fn record_capture(&mut self, piece: &Piece) {
        let Some(i) = count_index(piece.color, piece.piece_type) else {
            return;
        };
        self.living[i] = self.living[i].saturating_sub(1);
        if piece.color == Color::Blue || self.accounting == CaptureAccounting::Symmetric {
            self.captured[i] += 1;
        }
    }

    /// All squares holding a piece equal to `piece` (color, type, visibility).
    pub fn find(&self, piece: &Piece) -> Vec<Square> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, p)| *p == piece)
            .map(|(i, _)| Square::from_index(i))
            .collect()
    }

    /// The orthogonally adjacent pieces; edge squares have fewer.
    pub fn neighbours(&self, sq: Square) -> impl Iterator<Item = Piece> + '_ {
        DIRECTIONS.iter().filter_map(move |&d| self.get(sq + d))
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.at(sq).is_empty()
    }

    /// True if `sq` holds a piece of the opponent of `color`.
    pub fn is_enemy(&self, sq: Square, color: Color) -> bool {
        let piece = self.at(sq);
        piece.color != Color::Empty && piece.color != color
    }

    pub fn is_empty_or_enemy(&self, sq: Square, color: Color) -> bool {
        self.is_empty(sq) || self.is_enemy(sq, color)
    }

    pub fn is_visible(&self, sq: Square) -> bool {
        self.at(sq).is_visible
    }

    /// Iterate over all squares with their pieces, A1 first.
    pub fn squares(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .map(|(i, p)| (Square::from_index(i), *p))
    }

    /// Board diagram as seen by `observer` (`None` shows everything).
    pub fn debug_string(&self, observer: Option<Color>) -> String {
        let mut s = format!("StraDos3: {}\n", self.to_strados3_for(observer));
        s.push_str(&self.diagram(observer));
        s.push('\n');
        match observer {
            Some(c) => s.push_str(&format!("Partial observation of the {c} player\n")),
            None => s.push_str("Observer view with all information\n"),
        }
        let side = if self.to_play == Color::Blue { 'B' } else { 'R' };
        s.push_str(&format!("To play: {side}\nMove number: {}\n", self.move_number));
        for (name, range) in [("Red", 0..NUM_PIECE_TYPES), ("Blue", NUM_PIECE_TYPES..NUM_PIECE_COUNTS)] {
            let counts: Vec<String> = self.living[range].iter().map(u32::to_string).collect();
            s.push_str(&format!("Living pieces {name}: {}\n", counts.join(" ")));
        }
        s
    }

    fn diagram(&self, observer: Option<Color>) -> String {
        let rule = format!("  {}\n", "-".repeat(BOARD_SIZE * 5 + 1));
        let mut s = String::from("\n");
        s.push_str(&rule);
        for y in (0..BOARD_SIZE as i8).rev() {
            let rank = (b'1' + y as u8) as char;
            s.push(rank);
            s.push(' ');
            for x in 0..BOARD_SIZE as i8 {
                s.push_str(&format!("| {} ", self.at(Square::new(x, y)).label(observer)));
            }
            s.push_str("|\n");
            s.push_str(&rule);
        }
        s.push_str("    ");
        for x in 0..BOARD_SIZE {
            s.push_str(&format!("{}    ", crate::constants::FILE_CHARS[x] as char));
        }
        s.push('\n');
        s
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.diagram(None))
    }
}

/// Equality of board state: squares, side to move and move number.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
            && self.to_play == other.to_play
            && self.move_number == other.move_number
    }
}
