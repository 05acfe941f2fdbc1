//! The interface through which search code drives a game.
//!
//! [`GameState`] is the full contract a game-tree harness needs: whose turn
//! it is, which actions are legal, applying and undoing actions, terminal
//! detection and returns, cloning and a text (de)serialization.

use crate::action::Action;
use crate::constants::{DRAW_UTILITY, LOSS_UTILITY, NUM_PLAYERS, WIN_UTILITY};
use crate::error::EngineError;

/// Player index: 0 is red, 1 is blue.
pub type Player = usize;

pub trait GameState: Clone + Sized {
    /// The player whose turn it is.
    fn current_player(&self) -> Player;

    /// Sorted legal actions; empty once the game is over.
    fn legal_actions(&self) -> Vec<Action>;

    fn apply_action(&mut self, action: Action) -> Result<(), EngineError>;

    /// Take back `action`, which must be the last action applied.
    fn undo_action(&mut self, action: Action) -> Result<(), EngineError>;

    fn is_terminal(&self) -> bool;

    /// Per-player utilities; all zero while the game is running.
    fn returns(&self) -> [f64; NUM_PLAYERS];

    fn action_to_string(&self, action: Action) -> Result<String, EngineError>;

    fn serialize(&self) -> String;

    fn deserialize(s: &str) -> Result<Self, EngineError>;

    fn num_distinct_actions() -> usize;

    fn max_game_length() -> usize;

    fn num_players() -> usize {
        NUM_PLAYERS
    }

    fn min_utility() -> f64 {
        LOSS_UTILITY
    }

    fn max_utility() -> f64 {
        WIN_UTILITY
    }

    fn utility_sum() -> f64 {
        DRAW_UTILITY
    }
}

/// Play uniformly random legal actions until the game ends or `max_plies`
/// actions were applied. Returns the number of actions played.
pub fn random_playout<G: GameState>(
    state: &mut G,
    rng: &mut fastrand::Rng,
    max_plies: usize,
) -> Result<usize, EngineError> {
    let mut plies = 0;
    while plies < max_plies && !state.is_terminal() {
        let actions = state.legal_actions();
        if actions.is_empty() {
            break;
        }
        let action = actions[rng.usize(..actions.len())];
        state.apply_action(action)?;
        plies += 1;
    }
    Ok(plies)
}
