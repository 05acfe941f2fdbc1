//! Determinization: sampling one concrete board from a player's view.
//!
//! The observer cannot see the type of the opponent's hidden pieces. A
//! sample keeps every visible square as it is and deals the hidden types out
//! again: the types of the unmoved hidden pieces are shuffled among the
//! unmoved hidden squares, then the moved hidden squares draw from what is
//! left, which is exactly the types of the moved hidden pieces. Bombs and
//! flags therefore never land on a piece that has moved, and the number of
//! living pieces of each type is unchanged.
//!
//! Every square of the sample is visible. The source board is never touched.

use crate::board::Board;
use crate::error::EngineError;
use crate::piece::{Color, Piece, PieceType};
use crate::square::Square;

/// Sample a fully visible board consistent with what `observer` knows.
pub fn determinize(board: &Board, observer: Color, rng: &mut fastrand::Rng) -> Result<Board, EngineError> {
    let opponent = observer.opponent();

    let mut unmoved: Vec<(Square, Piece)> = Vec::new();
    let mut moved: Vec<(Square, Piece)> = Vec::new();
    for (sq, piece) in board.squares() {
        if piece.color == opponent && !piece.is_visible {
            if piece.has_moved {
                moved.push((sq, piece));
            } else {
                unmoved.push((sq, piece));
            }
        }
    }

    let mut pool: Vec<PieceType> = unmoved.iter().map(|(_, p)| p.piece_type).collect();
    rng.shuffle(&mut pool);

    let mut sample = board.clone();
    deal(&mut sample, &unmoved, &mut pool)?;

    let mut residual: Vec<PieceType> = moved.iter().map(|(_, p)| p.piece_type).collect();
    rng.shuffle(&mut residual);
    pool.extend(residual);
    deal(&mut sample, &moved, &mut pool)?;

    // The observer's own hidden pieces are known to the observer.
    for (sq, piece) in board.squares() {
        if piece.color == observer && !piece.is_visible {
            sample.set(sq, Piece { is_visible: true, ..piece });
        }
    }

    Ok(sample)
}

fn deal(sample: &mut Board, targets: &[(Square, Piece)], pool: &mut Vec<PieceType>) -> Result<(), EngineError> {
    for &(sq, piece) in targets {
        let piece_type = pool.pop().ok_or_else(|| {
            EngineError::InvariantViolation(format!("no hidden piece type left to place on {sq}"))
        })?;
        sample.set(
            sq,
            Piece {
                piece_type,
                is_visible: true,
                ..piece
            },
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_is_untouched() {
        let board = Board::default_position();
        let before = board.to_strados3();
        let mut rng = fastrand::Rng::with_seed(7);
        let sample = determinize(&board, Color::Red, &mut rng).unwrap();
        assert_eq!(board.to_strados3(), before);
        assert!(sample.squares().all(|(_, p)| p.is_visible));
        assert_eq!(sample.hash(), sample.compute_hash());
        assert_eq!(sample.living_counts(), board.living_counts());
    }

    #[test]
    fn test_observer_pieces_keep_their_type() {
        let board = Board::default_position();
        let mut rng = fastrand::Rng::with_seed(11);
        let sample = determinize(&board, Color::Blue, &mut rng).unwrap();
        for (sq, piece) in board.squares() {
            if piece.color == Color::Blue {
                assert_eq!(sample.at(sq).piece_type, piece.piece_type);
            }
        }
    }

    #[test]
    fn test_samples_differ_across_seeds() {
        let board = Board::default_position();
        let a = determinize(&board, Color::Red, &mut fastrand::Rng::with_seed(1)).unwrap();
        let b = determinize(&board, Color::Red, &mut fastrand::Rng::with_seed(2)).unwrap();
        assert_ne!(a.to_strados3(), b.to_strados3());
    }
}
