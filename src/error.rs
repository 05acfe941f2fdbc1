//! Engine error type.
//!
//! Malformed text (positions, move notation) is not an error: parsers return
//! `None`. `EngineError` covers contract violations by callers and internal
//! inconsistencies that would otherwise corrupt the game state.

use thiserror::Error;

use crate::square::Square;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Action id outside `[0, NUM_DISTINCT_ACTIONS)`.
    #[error("action {0} is out of range")]
    ActionOutOfRange(i64),
    /// An action decoded to a destination off the board.
    #[error("destination index {0} leaves the board")]
    DestinationOutOfRange(usize),
    /// An in-range action that is not legal in the current position.
    #[error("action {0} is not legal in this position")]
    IllegalAction(i64),
    /// A move that is not an orthogonal step of 1..=9 squares.
    #[error("move {from}{to} cannot be encoded as an action")]
    NotAnAction { from: Square, to: Square },
    /// Undo requested with no moves played.
    #[error("cannot undo: move history is empty")]
    EmptyHistory,
    /// Undo of an action that is not the last one applied.
    #[error("cannot undo action {got}: last applied action is {expected}")]
    UndoMismatch { expected: i64, got: i64 },
    /// Serialized state or position string could not be read.
    #[error("invalid position: {0}")]
    InvalidPosition(String),
    /// Internal consistency broken, e.g. a move into a lake.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
