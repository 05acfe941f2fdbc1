//! Yorktown: a rules engine for a two-player Stratego variant.
//!
//! This crate provides the board model, move generation, combat resolution,
//! a dense action encoding and a [`GameState`](game::GameState) interface for
//! tree-search code, along with determinization of hidden information.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, action space and game limits
//! - [`piece`] / [`square`] - Piece types, colors and coordinates
//! - [`board`] - Board state, StraDos3 position strings, hashing
//! - [`movegen`] - Legal move generation
//! - [`combat`] - Move application and fight resolution
//! - [`action`] - Move <-> integer action encoding
//! - [`notation`] - Move parsing and rendering
//! - [`state`] - Game state with history, repetition and terminal detection
//! - [`determinize`] - Sampling hidden opponent pieces
//! - [`features`] - Feature planes for learning code
//! - [`protocol`] - Line-oriented text protocol
//!
//! ## Example
//!
//! ```
//! use yorktown::game::GameState;
//! use yorktown::state::YorktownState;
//!
//! // Start from the default position
//! let mut state = YorktownState::new();
//!
//! // Play the first legal action
//! let action = state.legal_actions()[0];
//! state.apply_action(action).unwrap();
//! assert_eq!(state.current_player(), 1);
//!
//! // And take it back
//! state.undo_action(action).unwrap();
//! assert_eq!(state.board(), state.start_board());
//! ```

pub mod action;
pub mod board;
pub mod combat;
pub mod constants;
pub mod determinize;
pub mod error;
pub mod features;
pub mod game;
pub mod history;
pub mod movegen;
pub mod notation;
pub mod piece;
pub mod protocol;
pub mod square;
pub mod state;
pub mod zobrist;
