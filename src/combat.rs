//! Move application and combat resolution.

use crate::board::{Board, Move};
use crate::error::EngineError;
use crate::piece::{EMPTY_PIECE, PieceType};

/// Result of a fight between an attacker and a defender.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Combat {
    /// The attacker takes the defender's square.
    AttackerWins,
    /// The attacker is removed; the defender stays.
    DefenderWins,
    /// Both pieces are removed.
    BothCaptured,
}

/// What happened when a move was applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Relocated,
    Fight(Combat),
}

/// Resolve a fight by type alone.
///
/// Bombs beat everything but miners, a spy takes a marshal when it attacks,
/// and otherwise the higher rank wins with equal ranks trading.
pub fn resolve_combat(attacker: PieceType, defender: PieceType) -> Combat {
    use PieceType::*;
    match (attacker, defender) {
        (Miner, Bomb) => Combat::AttackerWins,
        (_, Bomb) => Combat::DefenderWins,
        (Spy, Marshal) => Combat::AttackerWins,
        (a, d) if a > d => Combat::AttackerWins,
        (a, d) if a < d => Combat::DefenderWins,
        _ => Combat::BothCaptured,
    }
}

impl Board {
    /// Apply `mv`, resolving any fight, then pass the turn.
    ///
    /// The pieces are read from the board, not from `mv.piece`. A move into a
    /// lake is an internal error: the generator never produces one.
    pub fn apply_move(&mut self, mv: &Move) -> Result<MoveOutcome, EngineError> {
        let mut mover = self.at(mv.from);
        let mut defender = self.at(mv.to);

        if defender.is_lake() {
            return Err(EngineError::InvariantViolation(format!(
                "move {}{} enters a lake",
                mv.from, mv.to
            )));
        }
        mover.has_moved = true;

        let outcome = if defender.is_empty() {
            self.set(mv.from, EMPTY_PIECE);
            self.set(mv.to, mover);
            MoveOutcome::Relocated
        } else {
            mover.is_visible = true;
            defender.is_visible = true;

            let combat = resolve_combat(mover.piece_type, defender.piece_type);
            self.set(mv.from, EMPTY_PIECE);
            match combat {
                Combat::AttackerWins => {
                    self.set(mv.to, mover);
                    self.record_capture(&defender);
                }
                Combat::DefenderWins => {
                    self.set(mv.to, defender);
                    self.record_capture(&mover);
                }
                Combat::BothCaptured => {
                    self.set(mv.to, EMPTY_PIECE);
                    self.record_capture(&mover);
                    self.record_capture(&defender);
                }
            }
            MoveOutcome::Fight(combat)
        };

        self.advance_turn();
        Ok(outcome)
    }
}
