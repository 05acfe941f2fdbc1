//! Feature planes for learning code.
//!
//! 30 planes of 100 floats, squares in board order (A1 first):
//!
//! | planes | content                                               |
//! |--------|-------------------------------------------------------|
//! | 0..24  | one plane per (type, color): red then blue per type   |
//! | 24, 25 | pieces hidden from red, pieces hidden from blue       |
//! | 26     | empty squares                                         |
//! | 27     | lakes                                                 |
//! | 28     | side to move (0 red, 1 blue)                          |
//! | 29     | repetition count, scaled so 1 → 0 and 5 → 1            |

use crate::board::Board;
use crate::constants::{NUM_REPETITIONS_TO_DRAW, NUM_SQUARES};
use crate::piece::{Color, PIECE_TYPES, Piece, PieceType};

pub const NUM_PLANES: usize = 30;

/// Planes in which squares `player` cannot identify hold the probability
/// that the hidden piece has the plane's type.
pub fn observation_planes(board: &Board, player: Color, repetitions: u32) -> Vec<f32> {
    let mut values = Vec::with_capacity(NUM_PLANES * NUM_SQUARES);
    for piece_type in PIECE_TYPES {
        for color in [Color::Red, Color::Blue] {
            add_probability_plane(board, player, color, piece_type, &mut values);
        }
    }
    add_common_planes(board, repetitions, &mut values);
    values
}

/// Planes showing every piece as it is, for boards without hidden state
/// (such as determinized samples). The result is the same for both players.
pub fn perfect_information_planes(board: &Board, repetitions: u32) -> Vec<f32> {
    let mut values = Vec::with_capacity(NUM_PLANES * NUM_SQUARES);
    for piece_type in PIECE_TYPES {
        for color in [Color::Red, Color::Blue] {
            add_plane(board, &mut values, |p| p.color == color && p.piece_type == piece_type);
        }
    }
    add_common_planes(board, repetitions, &mut values);
    values
}

fn add_common_planes(board: &Board, repetitions: u32, values: &mut Vec<f32>) {
    for color in [Color::Red, Color::Blue] {
        add_plane(board, values, |p| !p.is_visible && p.color != color);
    }
    add_plane(board, values, |p| p.color == Color::Empty && p.is_empty());
    add_plane(board, values, |p| p.color == Color::Empty && p.is_lake());

    let side = board.to_play().player().unwrap_or(0) as f32;
    add_scalar_plane(side, values);
    let scaled = (repetitions as f32 - 1.0) / (NUM_REPETITIONS_TO_DRAW as f32 - 1.0);
    add_scalar_plane(scaled, values);
}

fn add_plane(board: &Board, values: &mut Vec<f32>, mut pred: impl FnMut(&Piece) -> bool) {
    values.extend(board.squares().map(|(_, p)| if pred(&p) { 1.0 } else { 0.0 }));
}

fn add_scalar_plane(value: f32, values: &mut Vec<f32>) {
    values.extend(std::iter::repeat_n(value, NUM_SQUARES));
}

fn add_probability_plane(board: &Board, player: Color, color: Color, piece_type: PieceType, values: &mut Vec<f32>) {
    let (hidden, hidden_moved) = board
        .squares()
        .filter(|(_, p)| p.color == color && !p.is_visible)
        .fold((0u32, 0u32), |(h, m), (_, p)| (h + 1, m + u32::from(p.has_moved)));
    let visible = board.find(&Piece::visible(color, piece_type)).len() as u32;
    let unseen = board.living(color, piece_type).saturating_sub(visible) as f32;

    let ratio = |denominator: u32| if denominator == 0 { 0.0 } else { unseen / denominator as f32 };
    let immobile = matches!(piece_type, PieceType::Bomb | PieceType::Flag);

    for (_, p) in board.squares() {
        let observed = p.is_visible || p.color == player || color == player;
        let value = if observed {
            if p.color == color && p.piece_type == piece_type { 1.0 } else { 0.0 }
        } else if immobile {
            if p.has_moved { 0.0 } else { ratio(hidden - hidden_moved) }
        } else {
            ratio(hidden)
        };
        values.push(value);
    }
}
