//! Game state: a board plus everything needed to judge the game.
//!
//! The state keeps the start board and the move list so that undo can
//! replay the game, a repetition table for draw detection, and a lazily
//! computed legal-action list that is dropped whenever the board changes.
//!
//! A determinized sample is rooted at its sampled board: the moves before
//! the sample stay in the history for the anti-loop filter, but undo stops
//! at the root and replays from the sample, never from the hidden start.

use std::ops::ControlFlow;
use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::unsync::OnceCell;

use crate::action::{Action, action_to_move, move_to_action};
use crate::board::{Board, CaptureAccounting, Move};
use crate::constants::{
    ANTI_LOOP_MIN_HISTORY, DRAW_UTILITY, LOSS_UTILITY, MAX_GAME_LENGTH, MAX_MOVE_NUMBER,
    NUM_DISTINCT_ACTIONS, NUM_PLAYERS, NUM_REPETITIONS_TO_DRAW, WIN_UTILITY,
};
use crate::determinize::determinize;
use crate::error::EngineError;
use crate::features::{observation_planes, perfect_information_planes};
use crate::game::{GameState, Player};
use crate::history::RepetitionTable;
use crate::piece::{Color, PieceType};

#[derive(Clone, Debug)]
pub struct YorktownState {
    start_board: Board,
    board: Board,
    moves: Vec<Move>,
    actions: Vec<Action>,
    /// Number of leading moves already contained in `start_board`.
    root: usize,
    repetitions: RepetitionTable,
    legal_actions: OnceCell<Vec<Action>>,
}

impl Default for YorktownState {
    fn default() -> Self {
        Self::new()
    }
}

impl YorktownState {
    /// A game from the engine's default position.
    pub fn new() -> Self {
        Self::from_board(Board::default_position())
    }

    /// A game from a StraDos3 position string.
    pub fn from_strados3(s: &str) -> Option<Self> {
        Board::from_strados3(s).map(Self::from_board)
    }

    pub fn from_board(board: Board) -> Self {
        let mut repetitions = RepetitionTable::new();
        repetitions.record(board.hash());
        YorktownState {
            start_board: board.clone(),
            board,
            moves: Vec::new(),
            actions: Vec::new(),
            root: 0,
            repetitions,
            legal_actions: OnceCell::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn start_board(&self) -> &Board {
        &self.start_board
    }

    pub fn moves_history(&self) -> &[Move] {
        &self.moves
    }

    pub fn actions_history(&self) -> &[Action] {
        &self.actions
    }

    pub fn move_number(&self) -> u32 {
        self.board.move_number()
    }

    /// Occurrences of the current position in this game line.
    pub fn repetition_count(&self) -> u32 {
        self.repetitions.count(self.board.hash())
    }

    pub fn set_capture_accounting(&mut self, accounting: CaptureAccounting) {
        self.start_board.set_capture_accounting(accounting);
        self.board.set_capture_accounting(accounting);
    }

    /// Parse a move in any accepted notation against the current board.
    pub fn parse_move(&self, text: &str) -> Option<Move> {
        self.board.parse_move(text)
    }

    /// Legal actions before the terminal check, computed once per position.
    ///
    /// Once eight moves have been played, a move that repeats both the
    /// mover's previous move and the one three turns before is left out.
    fn cached_legal_actions(&self) -> &[Action] {
        self.legal_actions.get_or_init(|| {
            let n = self.moves.len();
            let mut actions = Vec::new();
            self.board.generate_legal_moves(|mv| {
                let looping = n >= ANTI_LOOP_MIN_HISTORY
                    && mv.same_route(&self.moves[n - 2])
                    && mv.same_route(&self.moves[n - 6]);
                if !looping {
                    if let Ok(action) = move_to_action(&mv) {
                        actions.push(action);
                    }
                }
                ControlFlow::Continue(())
            });
            actions.sort_unstable();
            actions.dedup();
            actions
        })
    }

    fn is_repetition_draw(&self) -> bool {
        self.repetition_count() >= NUM_REPETITIONS_TO_DRAW
    }

    /// Returns if the game is over, in order of precedence: repetition draw,
    /// a lost flag, no legal actions for the side to move, move ceiling.
    pub fn maybe_final_returns(&self) -> Option<[f64; NUM_PLAYERS]> {
        if self.is_repetition_draw() {
            return Some([DRAW_UTILITY; NUM_PLAYERS]);
        }
        if self.board.living(Color::Red, PieceType::Flag) != 1 {
            return Some([LOSS_UTILITY, WIN_UTILITY]);
        }
        if self.board.living(Color::Blue, PieceType::Flag) != 1 {
            return Some([WIN_UTILITY, LOSS_UTILITY]);
        }
        if self.cached_legal_actions().is_empty() {
            let mut returns = [WIN_UTILITY; NUM_PLAYERS];
            returns[self.current_player()] = LOSS_UTILITY;
            return Some(returns);
        }
        if self.board.move_number() > MAX_MOVE_NUMBER {
            return Some([DRAW_UTILITY; NUM_PLAYERS]);
        }
        None
    }

    /// Full position string; the state carries no hidden history.
    pub fn information_state_string(&self, _player: Player) -> String {
        self.board.to_strados3()
    }

    /// Position string with the other player's hidden pieces masked.
    pub fn observation_string(&self, player: Player) -> String {
        self.board.to_strados3_for(Color::from_player(player))
    }

    /// Feature planes for `player`, with estimates for unseen pieces.
    pub fn observation_tensor(&self, player: Player) -> Vec<f32> {
        let color = Color::from_player(player).unwrap_or(Color::Red);
        observation_planes(&self.board, color, self.repetition_count())
    }

    /// Feature planes with every piece shown as it is, identical for both
    /// players; `_player` keeps the per-player tensor interface.
    pub fn information_state_tensor(&self, _player: Player) -> Vec<f32> {
        perfect_information_planes(&self.board, self.repetition_count())
    }

    /// A copy in which `observer`'s hidden opponents have sampled identities.
    ///
    /// The copy is rooted at the sample: it cannot be undone past the point
    /// where it was taken, and it inherits the repetition count of the
    /// current position.
    pub fn determinized_for(&self, observer: Color, rng: &mut fastrand::Rng) -> Result<Self, EngineError> {
        let sample = determinize(&self.board, observer, rng)?;
        let mut repetitions = RepetitionTable::new();
        for _ in 0..self.repetition_count().max(1) {
            repetitions.record(sample.hash());
        }
        Ok(YorktownState {
            start_board: sample.clone(),
            board: sample,
            moves: self.moves.clone(),
            actions: self.actions.clone(),
            root: self.moves.len(),
            repetitions,
            legal_actions: OnceCell::new(),
        })
    }

    /// Determinized copy from the side to move's point of view, seeded from
    /// the clock.
    pub fn clone_and_randomize(&self) -> Result<Self, EngineError> {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let mut rng = fastrand::Rng::with_seed(seed);
        self.determinized_for(self.board.to_play(), &mut rng)
    }

    /// Replay the moves after the root from the start board.
    fn replay(&mut self) -> Result<(), EngineError> {
        let mut board = self.start_board.clone();
        for mv in &self.moves[self.root..] {
            board.apply_move(mv)?;
        }
        self.board = board;
        Ok(())
    }
}

impl GameState for YorktownState {
    fn current_player(&self) -> Player {
        self.board.to_play().player().unwrap_or(0)
    }

    fn legal_actions(&self) -> Vec<Action> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.cached_legal_actions().to_vec()
    }

    fn apply_action(&mut self, action: Action) -> Result<(), EngineError> {
        let mv = action_to_move(action, &self.board)?;
        if self.cached_legal_actions().binary_search(&action).is_err() {
            return Err(EngineError::IllegalAction(action));
        }
        self.board.apply_move(&mv)?;
        self.moves.push(mv);
        self.actions.push(action);
        self.repetitions.record(self.board.hash());
        self.legal_actions = OnceCell::new();
        Ok(())
    }

    fn undo_action(&mut self, action: Action) -> Result<(), EngineError> {
        let &last = self.actions[self.root..].last().ok_or(EngineError::EmptyHistory)?;
        if last != action {
            return Err(EngineError::UndoMismatch {
                expected: last,
                got: action,
            });
        }
        self.repetitions.forget(self.board.hash());
        self.moves.pop();
        self.actions.pop();
        self.legal_actions = OnceCell::new();
        self.replay()
    }

    fn is_terminal(&self) -> bool {
        self.maybe_final_returns().is_some()
    }

    fn returns(&self) -> [f64; NUM_PLAYERS] {
        self.maybe_final_returns().unwrap_or([DRAW_UTILITY; NUM_PLAYERS])
    }

    fn action_to_string(&self, action: Action) -> Result<String, EngineError> {
        Ok(action_to_move(action, &self.board)?.to_lan())
    }

    /// Start position on the first line, then one applied action per line.
    fn serialize(&self) -> String {
        let mut s = self.start_board.to_strados3();
        s.push('\n');
        for action in &self.actions[self.root..] {
            s.push_str(&format!("{action}\n"));
        }
        s
    }

    fn deserialize(s: &str) -> Result<Self, EngineError> {
        if s.is_empty() {
            return Ok(Self::new());
        }
        let mut lines = s.lines();
        let first = lines.next().unwrap_or_default();
        let mut state = Self::from_strados3(first)
            .ok_or_else(|| EngineError::InvalidPosition(first.to_string()))?;
        for line in lines.filter(|l| !l.trim().is_empty()) {
            let action: Action = line
                .trim()
                .parse()
                .map_err(|_| EngineError::InvalidPosition(format!("bad action line: {line}")))?;
            state.apply_action(action)?;
        }
        Ok(state)
    }

    fn num_distinct_actions() -> usize {
        NUM_DISTINCT_ACTIONS
    }

    fn max_game_length() -> usize {
        MAX_GAME_LENGTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = YorktownState::new();
        assert_eq!(state.current_player(), 0);
        assert!(!state.is_terminal());
        assert_eq!(state.repetition_count(), 1);
        let actions = state.legal_actions();
        assert!(!actions.is_empty());
        assert!(actions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_cache_is_dropped_on_apply() {
        let mut state = YorktownState::new();
        let before = state.legal_actions();
        state.apply_action(before[0]).unwrap();
        assert_eq!(state.current_player(), 1);
        let after = state.legal_actions();
        let mut expected: Vec<Action> = state
            .board()
            .legal_moves()
            .iter()
            .map(|m| move_to_action(m).unwrap())
            .collect();
        expected.sort_unstable();
        expected.dedup();
        assert_eq!(after, expected);
    }

    #[test]
    fn test_undo_errors() {
        let mut state = YorktownState::new();
        assert_eq!(state.undo_action(0), Err(EngineError::EmptyHistory));
        let action = state.legal_actions()[0];
        state.apply_action(action).unwrap();
        assert_eq!(
            state.undo_action(action + 1),
            Err(EngineError::UndoMismatch {
                expected: action,
                got: action + 1
            })
        );
        assert_eq!(state.undo_action(action), Ok(()));
        assert_eq!(state.board(), state.start_board());
    }

    #[test]
    fn test_deserialize_empty_is_default() {
        let state = YorktownState::deserialize("").unwrap();
        assert_eq!(state.board(), &Board::default_position());
        assert!(matches!(
            YorktownState::deserialize("nonsense"),
            Err(EngineError::InvalidPosition(_))
        ));
    }

    fn layout(pieces: &[(usize, char)]) -> String {
        let mut layout = vec!['a'; 100];
        for &(i, c) in pieces {
            layout[i] = c;
        }
        layout.into_iter().collect()
    }

    #[test]
    fn test_illegal_action_is_rejected() {
        // red spy A1, red flag K1, blue marshal B2, blue flag K10; B1 is empty
        let position = format!("{} r 3", layout(&[(0, 'C'), (9, 'M'), (11, 'X'), (99, 'Y')]));
        let mut state = YorktownState::from_strados3(&position).unwrap();

        // B1 -> B2 from an empty square
        let from_empty = 360;
        assert!(!state.legal_actions().contains(&from_empty));
        assert_eq!(state.apply_action(from_empty), Err(EngineError::IllegalAction(from_empty)));
        assert_eq!(state.board().to_strados3(), position);
        assert_eq!(state.board().living(Color::Blue, PieceType::Marshal), 1);
        assert!(state.actions_history().is_empty());

        assert_eq!(state.apply_action(-5), Err(EngineError::ActionOutOfRange(-5)));
    }

    #[test]
    fn test_sample_undo_stays_in_sample() {
        let mut state = YorktownState::new();
        let first = state.legal_actions()[0];
        state.apply_action(first).unwrap();

        let mut rng = fastrand::Rng::with_seed(5);
        let mut sample = state.determinized_for(Color::Blue, &mut rng).unwrap();
        let sampled = sample.board().to_strados3();
        assert_eq!(sample.repetition_count(), state.repetition_count());

        let action = sample.legal_actions()[0];
        sample.apply_action(action).unwrap();
        sample.undo_action(action).unwrap();
        assert_eq!(sample.board().to_strados3(), sampled);
        assert_eq!(sample.repetition_count(), 1);

        // the move played before sampling cannot be taken back
        assert_eq!(sample.undo_action(first), Err(EngineError::EmptyHistory));
        assert_eq!(sample.actions_history(), state.actions_history());
        assert_eq!(sample.board().to_strados3(), sampled);
    }

    #[test]
    fn test_sample_keeps_repetition_count() {
        // red marshal A1, blue marshal K10, both flags
        let position = format!("{} r 1", layout(&[(0, 'L'), (9, 'M'), (99, 'X'), (90, 'Y')]));
        let mut state = YorktownState::from_strados3(&position).unwrap();
        for text in ["A1A2", "K:K9", "A2A1", "K9K:"] {
            let mv = state.parse_move(text).unwrap();
            state.apply_action(move_to_action(&mv).unwrap()).unwrap();
        }
        assert_eq!(state.repetition_count(), 2);

        let sample = state.clone_and_randomize().unwrap();
        assert_eq!(sample.repetition_count(), 2);
        let planes = sample.observation_tensor(0);
        assert!((planes[29 * 100] - 0.25).abs() < 1e-6);
    }
}
