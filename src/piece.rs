//! Colors, piece types and pieces, with their character encodings.
//!
//! Position strings use one letter per square: `A` is empty, `_` a lake,
//! `B`..`M` red pieces and `N`..`Y` blue pieces. Uppercase marks a piece
//! whose type is hidden from the opponent, lowercase a piece known to both
//! players.

use std::fmt;

use crate::constants::NUM_PIECE_TYPES;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
    Empty,
}

impl Color {
    /// The opposing color. `Empty` has no opponent.
    pub fn opponent(self) -> Color {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
            Color::Empty => Color::Empty,
        }
    }

    /// Player index: red is 0, blue is 1.
    pub fn player(self) -> Option<usize> {
        match self {
            Color::Red => Some(0),
            Color::Blue => Some(1),
            Color::Empty => None,
        }
    }

    pub fn from_player(player: usize) -> Option<Color> {
        match player {
            0 => Some(Color::Red),
            1 => Some(Color::Blue),
            _ => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Empty => "empty",
        };
        f.write_str(s)
    }
}

/// Piece types in combat-rank order. `Lake` and `Empty` never fight.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceType {
    Lake,
    Bomb,
    Flag,
    Spy,
    Scout,
    Miner,
    Sergeant,
    Lieutenant,
    Captain,
    Major,
    Colonel,
    General,
    Marshal,
    Empty,
}

/// The twelve combatant types, in the order used by the count vectors.
pub const PIECE_TYPES: [PieceType; NUM_PIECE_TYPES] = [
    PieceType::Bomb,
    PieceType::Flag,
    PieceType::Spy,
    PieceType::Scout,
    PieceType::Miner,
    PieceType::Sergeant,
    PieceType::Lieutenant,
    PieceType::Captain,
    PieceType::Major,
    PieceType::Colonel,
    PieceType::General,
    PieceType::Marshal,
];

impl PieceType {
    /// Number of variants, used to size the Zobrist table.
    pub(crate) const COUNT: usize = 14;

    /// Position in [`PIECE_TYPES`], `None` for lake and empty.
    pub fn count_index(self) -> Option<usize> {
        match self {
            PieceType::Lake | PieceType::Empty => None,
            t => Some(t as usize - 1),
        }
    }

    /// True for the types that belong to a player.
    pub fn is_combatant(self) -> bool {
        self.count_index().is_some()
    }

    /// Bombs and flags never move.
    pub fn is_movable(self) -> bool {
        self.is_combatant() && !matches!(self, PieceType::Bomb | PieceType::Flag)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Decode a position-string letter (either case) into its type.
    pub fn from_position_char(c: char) -> Option<PieceType> {
        let t = match c.to_ascii_uppercase() {
            'A' => PieceType::Empty,
            '_' => PieceType::Lake,
            'B' | 'N' => PieceType::Bomb,
            'M' | 'Y' => PieceType::Flag,
            'C' | 'O' => PieceType::Spy,
            'D' | 'P' => PieceType::Scout,
            'E' | 'Q' => PieceType::Miner,
            'F' | 'R' => PieceType::Sergeant,
            'G' | 'S' => PieceType::Lieutenant,
            'H' | 'T' => PieceType::Captain,
            'I' | 'U' => PieceType::Major,
            'J' | 'V' => PieceType::Colonel,
            'K' | 'W' => PieceType::General,
            'L' | 'X' => PieceType::Marshal,
            _ => return None,
        };
        Some(t)
    }

    /// Uppercase position-string letter of this type for the given color.
    pub fn position_char(self, color: Color) -> char {
        let (red, blue) = match self {
            PieceType::Empty => return 'A',
            PieceType::Lake => return '_',
            PieceType::Bomb => ('B', 'N'),
            PieceType::Flag => ('M', 'Y'),
            PieceType::Spy => ('C', 'O'),
            PieceType::Scout => ('D', 'P'),
            PieceType::Miner => ('E', 'Q'),
            PieceType::Sergeant => ('F', 'R'),
            PieceType::Lieutenant => ('G', 'S'),
            PieceType::Captain => ('H', 'T'),
            PieceType::Major => ('I', 'U'),
            PieceType::Colonel => ('J', 'V'),
            PieceType::General => ('K', 'W'),
            PieceType::Marshal => ('L', 'X'),
        };
        if color == Color::Blue { blue } else { red }
    }

    /// Short glyph used in annotated notation and board diagrams.
    pub fn glyph(self) -> char {
        match self {
            PieceType::Empty => ' ',
            PieceType::Lake => '_',
            PieceType::Bomb => 'B',
            PieceType::Flag => 'F',
            PieceType::Spy => 'S',
            PieceType::Scout => '2',
            PieceType::Miner => '3',
            PieceType::Sergeant => '4',
            PieceType::Lieutenant => '5',
            PieceType::Captain => '6',
            PieceType::Major => '7',
            PieceType::Colonel => '8',
            PieceType::General => '9',
            PieceType::Marshal => '0',
        }
    }

    pub fn from_glyph(c: char) -> Option<PieceType> {
        let t = match c.to_ascii_uppercase() {
            '_' => PieceType::Lake,
            'B' => PieceType::Bomb,
            'F' => PieceType::Flag,
            'S' => PieceType::Spy,
            '2' => PieceType::Scout,
            '3' => PieceType::Miner,
            '4' => PieceType::Sergeant,
            '5' => PieceType::Lieutenant,
            '6' => PieceType::Captain,
            '7' => PieceType::Major,
            '8' => PieceType::Colonel,
            '9' => PieceType::General,
            '0' => PieceType::Marshal,
            _ => return None,
        };
        Some(t)
    }
}

/// A square's content.
///
/// Equality ignores `has_moved`: two pieces of the same color, type and
/// visibility are the same piece for board comparison.
#[derive(Copy, Clone, Debug)]
pub struct Piece {
    pub color: Color,
    pub piece_type: PieceType,
    pub is_visible: bool,
    pub has_moved: bool,
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
            && self.piece_type == other.piece_type
            && self.is_visible == other.is_visible
    }
}

impl Eq for Piece {}

pub const EMPTY_PIECE: Piece = Piece {
    color: Color::Empty,
    piece_type: PieceType::Empty,
    is_visible: true,
    has_moved: false,
};

pub const LAKE_PIECE: Piece = Piece {
    color: Color::Empty,
    piece_type: PieceType::Lake,
    is_visible: true,
    has_moved: false,
};

impl Piece {
    /// A hidden, unmoved piece.
    pub fn new(color: Color, piece_type: PieceType) -> Self {
        Piece {
            color,
            piece_type,
            is_visible: false,
            has_moved: false,
        }
    }

    pub fn visible(color: Color, piece_type: PieceType) -> Self {
        Piece {
            is_visible: true,
            ..Piece::new(color, piece_type)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.piece_type == PieceType::Empty
    }

    pub fn is_lake(&self) -> bool {
        self.piece_type == PieceType::Lake
    }

    /// Decode one position-string character.
    pub fn from_position_char(c: char) -> Option<Piece> {
        let piece_type = PieceType::from_position_char(c)?;
        let piece = match piece_type {
            PieceType::Empty => EMPTY_PIECE,
            PieceType::Lake => LAKE_PIECE,
            _ => {
                let color = match c.to_ascii_uppercase() {
                    'B'..='M' => Color::Red,
                    _ => Color::Blue,
                };
                Piece {
                    color,
                    piece_type,
                    is_visible: c.is_ascii_lowercase(),
                    has_moved: false,
                }
            }
        };
        Some(piece)
    }

    /// Encode as a position-string character as seen by `observer`.
    ///
    /// With `Some(color)`, hidden pieces of the other color render as `?`.
    pub fn position_char(&self, observer: Option<Color>) -> char {
        match self.piece_type {
            PieceType::Empty => return 'a',
            PieceType::Lake => return '_',
            _ => {}
        }
        if let Some(obs) = observer {
            if !self.is_visible && self.color != obs {
                return '?';
            }
        }
        let c = self.piece_type.position_char(self.color);
        if self.is_visible { c.to_ascii_lowercase() } else { c }
    }

    /// Two-character label for board diagrams, e.g. `r0`, `B?`.
    pub fn label(&self, observer: Option<Color>) -> String {
        match self.piece_type {
            PieceType::Empty => return "  ".to_string(),
            PieceType::Lake => return "__".to_string(),
            _ => {}
        }
        let owner = match (self.color, self.is_visible) {
            (Color::Blue, true) => 'b',
            (Color::Blue, false) => 'B',
            (_, true) => 'r',
            (_, false) => 'R',
        };
        let hidden_from_observer = observer.is_some_and(|obs| obs != self.color) && !self.is_visible;
        let glyph = if hidden_from_observer { '?' } else { self.piece_type.glyph() };
        format!("{owner}{glyph}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_char_roundtrip() {
        for c in "abcdefghijklmnopqrstuvwxyBCDEFGHIJKLMNOPQRSTUVWXY_".chars() {
            let piece = Piece::from_position_char(c).unwrap();
            assert_eq!(piece.position_char(None), c, "roundtrip of {c}");
        }
    }

    #[test]
    fn test_invalid_chars() {
        assert!(Piece::from_position_char('Z').is_none());
        assert!(Piece::from_position_char('z').is_none());
        assert!(Piece::from_position_char('1').is_none());
    }

    #[test]
    fn test_colors_and_visibility() {
        let p = Piece::from_position_char('L').unwrap();
        assert_eq!(p.color, Color::Red);
        assert_eq!(p.piece_type, PieceType::Marshal);
        assert!(!p.is_visible);

        let p = Piece::from_position_char('x').unwrap();
        assert_eq!(p.color, Color::Blue);
        assert_eq!(p.piece_type, PieceType::Marshal);
        assert!(p.is_visible);
    }

    #[test]
    fn test_equality_ignores_has_moved() {
        let a = Piece::new(Color::Red, PieceType::Scout);
        let b = Piece {
            has_moved: true,
            ..a
        };
        assert_eq!(a, b);
        assert_ne!(a, Piece::visible(Color::Red, PieceType::Scout));
    }

    #[test]
    fn test_observer_masking() {
        let hidden_blue = Piece::new(Color::Blue, PieceType::Flag);
        assert_eq!(hidden_blue.position_char(Some(Color::Red)), '?');
        assert_eq!(hidden_blue.position_char(Some(Color::Blue)), 'Y');
        assert_eq!(hidden_blue.label(Some(Color::Red)), "B?");
        assert_eq!(hidden_blue.label(None), "BF");
    }

    #[test]
    fn test_count_index_order() {
        for (i, t) in PIECE_TYPES.iter().enumerate() {
            assert_eq!(t.count_index(), Some(i));
        }
        assert!(!PieceType::Bomb.is_movable());
        assert!(!PieceType::Flag.is_movable());
        assert!(PieceType::Spy.is_movable());
    }
}
