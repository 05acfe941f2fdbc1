//! Move ⇄ action encoding.
//!
//! An action is `origin * 36 + destination`, where `origin` is
//! `file * 10 + rank` and `destination` is `direction * 9 + distance - 1`
//! over the directions up, down, right, left. Blue moves are mirrored
//! across the board first, so both players share one action space.

use crate::board::{Board, Move};
use crate::constants::{BOARD_SIZE, NUM_ACTION_DESTINATIONS, NUM_DISTINCT_ACTIONS};
use crate::error::EngineError;
use crate::piece::Color;
use crate::square::{DIRECTIONS, Offset, Square};

/// Dense action id in `[0, NUM_DISTINCT_ACTIONS)`.
pub type Action = i64;

const MAX_DISTANCE: usize = BOARD_SIZE - 1;

fn reflect(color: Color, sq: Square) -> Square {
    if color == Color::Blue { sq.mirrored() } else { sq }
}

/// Destination index of an orthogonal offset, `None` for anything else.
pub fn offset_to_destination_index(offset: Offset) -> Option<usize> {
    let distance = offset.dx.unsigned_abs().max(offset.dy.unsigned_abs()) as usize;
    if distance == 0 || distance > MAX_DISTANCE || (offset.dx != 0 && offset.dy != 0) {
        return None;
    }
    let unit = Offset {
        dx: offset.dx.signum(),
        dy: offset.dy.signum(),
    };
    let direction = DIRECTIONS.iter().position(|&d| d == unit)?;
    Some(direction * MAX_DISTANCE + distance - 1)
}

/// Offset encoded by a destination index.
pub fn destination_index_to_offset(index: usize) -> Result<Offset, EngineError> {
    if index >= NUM_ACTION_DESTINATIONS {
        return Err(EngineError::DestinationOutOfRange(index));
    }
    let direction = DIRECTIONS[index / MAX_DISTANCE];
    Ok(direction.scaled((index % MAX_DISTANCE + 1) as i8))
}

/// Encode `mv` from the perspective of the mover's color.
pub fn move_to_action(mv: &Move) -> Result<Action, EngineError> {
    let color = mv.piece.color;
    let from = reflect(color, mv.from);
    let to = reflect(color, mv.to);
    let destination = offset_to_destination_index(Offset::between(from, to))
        .ok_or(EngineError::NotAnAction { from: mv.from, to: mv.to })?;
    let origin = from.x as usize * BOARD_SIZE + from.y as usize;
    Ok((origin * NUM_ACTION_DESTINATIONS + destination) as Action)
}

/// Split an action into its perspective origin square and destination index.
pub fn action_to_destination(action: Action) -> Result<(Square, usize), EngineError> {
    if !(0..NUM_DISTINCT_ACTIONS as Action).contains(&action) {
        return Err(EngineError::ActionOutOfRange(action));
    }
    let action = action as usize;
    let origin = action / NUM_ACTION_DESTINATIONS;
    let from = Square::new((origin / BOARD_SIZE) as i8, (origin % BOARD_SIZE) as i8);
    Ok((from, action % NUM_ACTION_DESTINATIONS))
}

/// Decode `action` for the side to move on `board`.
///
/// The mover is whatever piece stands on the decoded origin square; the side
/// to move always knows its own pieces.
pub fn action_to_move(action: Action, board: &Board) -> Result<Move, EngineError> {
    let color = board.to_play();
    let (from, destination) = action_to_destination(action)?;
    let to = from + destination_index_to_offset(destination)?;
    if !to.on_board() {
        return Err(EngineError::DestinationOutOfRange(destination));
    }
    let from = reflect(color, from);
    let to = reflect(color, to);
    let mut piece = board.at(from);
    piece.color = color;
    Ok(Move::new(from, to, piece))
}
