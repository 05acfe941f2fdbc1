//! Legal move generation.
//!
//! Bombs and flags never move. Scouts slide any distance along a rank or
//! file, stopping on an empty square or on the first enemy piece. Every
//! other piece steps one square orthogonally onto an empty or enemy square.
//! Lakes and friendly pieces block.

use std::ops::ControlFlow;

use crate::board::{Board, Move};
use crate::piece::{Color, PieceType};
use crate::square::{DIRECTIONS, Offset, Square};

impl Board {
    /// Feed every legal move of the side to move to `yield_move`.
    ///
    /// Generation stops as soon as the callback returns `ControlFlow::Break`.
    pub fn generate_legal_moves<F>(&self, mut yield_move: F)
    where
        F: FnMut(Move) -> ControlFlow<()>,
    {
        let color = self.to_play();
        for (sq, piece) in self.squares() {
            if piece.color != color {
                continue;
            }
            let flow = match piece.piece_type {
                PieceType::Lake | PieceType::Empty | PieceType::Bomb | PieceType::Flag => {
                    ControlFlow::Continue(())
                }
                PieceType::Scout => self.scout_destinations(sq, color, |to| yield_move(Move::new(sq, to, piece))),
                _ => self.step_destinations(sq, color, |to| yield_move(Move::new(sq, to, piece))),
            };
            if flow.is_break() {
                return;
            }
        }
    }

    /// All legal moves of the side to move, in generation order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        self.generate_legal_moves(|mv| {
            moves.push(mv);
            ControlFlow::Continue(())
        });
        moves
    }

    /// True if the side to move has at least one legal move.
    pub fn has_legal_move(&self) -> bool {
        let mut found = false;
        self.generate_legal_moves(|_| {
            found = true;
            ControlFlow::Break(())
        });
        found
    }

    fn step_destinations<F>(&self, sq: Square, color: Color, mut yield_to: F) -> ControlFlow<()>
    where
        F: FnMut(Square) -> ControlFlow<()>,
    {
        for d in DIRECTIONS {
            let dest = sq + d;
            if dest.on_board() && self.is_empty_or_enemy(dest, color) {
                yield_to(dest)?;
            }
        }
        ControlFlow::Continue(())
    }

    fn scout_destinations<F>(&self, sq: Square, color: Color, mut yield_to: F) -> ControlFlow<()>
    where
        F: FnMut(Square) -> ControlFlow<()>,
    {
        for d in DIRECTIONS {
            self.ray_destinations(sq, color, d, &mut yield_to)?;
        }
        ControlFlow::Continue(())
    }

    fn ray_destinations<F>(&self, sq: Square, color: Color, step: Offset, yield_to: &mut F) -> ControlFlow<()>
    where
        F: FnMut(Square) -> ControlFlow<()>,
    {
        let mut dest = sq + step;
        while dest.on_board() {
            if self.is_empty(dest) {
                yield_to(dest)?;
            } else if self.is_enemy(dest, color) {
                return yield_to(dest);
            } else {
                // friendly piece or lake
                break;
            }
            dest = dest + step;
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(pieces: &[(usize, char)], side: char) -> Board {
        let mut layout = vec!['a'; 100];
        for &(i, c) in pieces {
            layout[i] = c;
        }
        let s: String = layout.into_iter().collect();
        Board::from_strados3(&format!("{s} {side} 1")).unwrap()
    }

    fn destinations(board: &Board) -> Vec<String> {
        let mut v: Vec<String> = board.legal_moves().iter().map(|m| m.to.to_string()).collect();
        v.sort();
        v
    }

    #[test]
    fn test_single_step_piece() {
        // red sergeant on E5
        let board = board_with(&[(44, 'F')], 'r');
        assert_eq!(destinations(&board), vec!["D5", "E4", "E6", "F5"]);
    }

    #[test]
    fn test_corner_and_friendly_block() {
        // red marshal A1, red bomb B1, blue scout A2
        let board = board_with(&[(0, 'L'), (1, 'B'), (10, 'P')], 'r');
        assert_eq!(destinations(&board), vec!["A2"]);
    }

    #[test]
    fn test_bomb_and_flag_do_not_move() {
        let board = board_with(&[(44, 'B'), (55, 'M')], 'r');
        assert!(board.legal_moves().is_empty());
        assert!(!board.has_legal_move());
    }

    #[test]
    fn test_only_side_to_move_generates() {
        let board = board_with(&[(44, 'F'), (77, 'R')], 'b');
        let moves = board.legal_moves();
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.piece.color == Color::Blue));
    }

    #[test]
    fn test_scout_rays() {
        // blue scout on A1, empty board: 9 up + 9 right
        let board = board_with(&[(0, 'P')], 'b');
        assert_eq!(board.legal_moves().len(), 18);

        // lake on C4 blocks scout on C1 at C3; red piece on F1 is capturable
        let board = board_with(&[(2, 'P'), (32, '_'), (5, 'E')], 'b');
        let dests = destinations(&board);
        assert_eq!(dests, vec!["A1", "B1", "C2", "C3", "D1", "E1", "F1"]);
    }

    #[test]
    fn test_early_stop() {
        let board = Board::default_position();
        let mut seen = 0;
        board.generate_legal_moves(|_| {
            seen += 1;
            if seen == 2 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
        });
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_never_into_lake() {
        let board = Board::default_position();
        for mv in board.legal_moves() {
            assert!(!board.at(mv.to).is_lake());
            assert_ne!(board.at(mv.to).color, Color::Red);
        }
    }
}
