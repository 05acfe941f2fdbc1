//! Move notation.
//!
//! Three input forms are accepted, all reduced to the short form before the
//! move is looked up among the legal moves:
//!
//! - short: `A1A2`
//! - annotated: `A1-A2`, `A1[S]-A2`, `A1-A2[0]`, `A1[S]xA2[0]`
//! - StraDos XML: `<move id="20" source="A1" target="A2"/>`
//!
//! Only the short form is produced as canonical output.

use std::ops::ControlFlow;

use crate::board::{Board, Move};
use crate::square::Square;

impl Board {
    /// Parse a move in any accepted notation and match it to a legal move.
    pub fn parse_move(&self, text: &str) -> Option<Move> {
        if text.is_empty() {
            return None;
        }
        self.parse_short_move(text)
            .or_else(|| self.parse_annotated_move(text))
            .or_else(|| self.parse_strados_move(text))
    }

    /// Parse the 4-character short form.
    ///
    /// Rejects moves that are not legal and moves matching more than one
    /// legal move.
    pub fn parse_short_move(&self, text: &str) -> Option<Move> {
        if text.len() != 4 {
            return None;
        }
        let from = Square::parse(text.get(0..2)?)?;
        let to = Square::parse(text.get(2..4)?)?;

        let mut candidates = Vec::new();
        self.generate_legal_moves(|mv| {
            if mv.from == from && mv.to == to {
                candidates.push(mv);
            }
            ControlFlow::Continue(())
        });
        match candidates.as_slice() {
            [mv] => Some(*mv),
            _ => None,
        }
    }

    /// Parse the annotated long form by cutting out the two squares.
    pub fn parse_annotated_move(&self, text: &str) -> Option<Move> {
        let short = match text.len() {
            5 => format!("{}{}", text.get(0..2)?, text.get(3..5)?),
            8 if text.get(2..3)? == "[" => format!("{}{}", text.get(0..2)?, text.get(6..8)?),
            8 => format!("{}{}", text.get(0..2)?, text.get(3..5)?),
            11 => format!("{}{}", text.get(0..2)?, text.get(6..8)?),
            _ => return None,
        };
        self.parse_short_move(&short)
    }

    /// Parse the StraDos XML form by splitting on quote characters.
    pub fn parse_strados_move(&self, text: &str) -> Option<Move> {
        let segments: Vec<&str> = text.split('"').collect();
        if segments.len() != 7 {
            return None;
        }
        self.parse_short_move(&format!("{}{}", segments[3], segments[5]))
    }
}

impl Move {
    /// Canonical short form, e.g. `A1A2`.
    pub fn to_lan(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Annotated form against the board before the move, e.g. `A1[S]xB1[0]`.
    ///
    /// Piece glyphs are shown only for pieces both players can see.
    pub fn to_annotated(&self, board: &Board) -> String {
        let mut s = self.from.to_string();
        let mover = board.at(self.from);
        if mover.is_visible && !mover.is_empty() {
            s.push_str(&format!("[{}]", mover.piece_type.glyph()));
        }
        let target = board.at(self.to);
        s.push(if target.is_empty() { '-' } else { 'x' });
        s.push_str(&self.to.to_string());
        if target.is_visible && !target.is_empty() {
            s.push_str(&format!("[{}]", target.piece_type.glyph()));
        }
        s
    }

    /// StraDos XML form with the given move id.
    pub fn to_strados(&self, id: u32) -> String {
        format!("<move id=\"{id}\" source=\"{}\" target=\"{}\"/>", self.from, self.to)
    }
}
