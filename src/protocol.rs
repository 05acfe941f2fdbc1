//! Line-oriented text protocol.
//!
//! Modelled on GTP: each line is an optional numeric id, a command and its
//! arguments. Responses start with `=` on success or `?` on failure, followed
//! by the id and the message, and end with a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`, `quit`
//! - `clear_board` - Reset to the starting position
//! - `setboard <board> <r|b> <move number>` - Start from a StraDos3 position
//! - `play <move>` - Play a move in any accepted notation
//! - `legal_moves` - List legal moves in short form
//! - `undo` - Take back the last move
//! - `genmove` - Play a random legal move
//! - `showboard` - Print the board diagram
//! - `sample` - Print a determinized position for the side to move
//! - `is_terminal`, `returns`

use std::io::{self, BufRead, Write};

use crate::action::move_to_action;
use crate::constants::DEFAULT_POSITION;
use crate::game::GameState;
use crate::state::YorktownState;

const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "genmove",
    "is_terminal",
    "known_command",
    "legal_moves",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "returns",
    "sample",
    "setboard",
    "showboard",
    "undo",
    "version",
];

pub struct ProtocolEngine {
    state: YorktownState,
    start_position: String,
    rng: fastrand::Rng,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    pub fn new() -> Self {
        Self {
            state: YorktownState::new(),
            start_position: DEFAULT_POSITION.to_string(),
            rng: fastrand::Rng::new(),
        }
    }

    /// Engine starting from `position`, or `None` if it does not parse.
    pub fn with_position(position: &str, seed: Option<u64>) -> Option<Self> {
        let state = YorktownState::from_strados3(position)?;
        let rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Some(Self {
            state,
            start_position: position.to_string(),
            rng,
        })
    }

    pub fn state(&self) -> &YorktownState {
        &self.state
    }

    /// Run the command loop on stdin and stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            if !success {
                eprintln!("rejected: {command_line} ({message})");
            }
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(stdout, "{prefix}{id_str} {message}\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional leading numeric id from the command.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute one command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "clear_board" => match YorktownState::from_strados3(&self.start_position) {
                Some(state) => {
                    self.state = state;
                    (true, String::new())
                }
                None => (false, "invalid start position".to_string()),
            },

            "setboard" => {
                let position = args.join(" ");
                match YorktownState::from_strados3(&position) {
                    Some(state) => {
                        self.state = state;
                        self.start_position = position;
                        (true, String::new())
                    }
                    None => (false, "invalid position".to_string()),
                }
            }

            "play" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                if self.state.is_terminal() {
                    return (false, "game is over".to_string());
                }
                // XML moves contain spaces
                let text = args.join(" ");
                let Some(mv) = self.state.parse_move(&text) else {
                    return (false, "illegal move".to_string());
                };
                match move_to_action(&mv).and_then(|a| self.state.apply_action(a)) {
                    Ok(()) => (true, mv.to_lan()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "legal_moves" => {
                let moves: Result<Vec<String>, _> = self
                    .state
                    .legal_actions()
                    .into_iter()
                    .map(|a| self.state.action_to_string(a))
                    .collect();
                match moves {
                    Ok(moves) => (true, moves.join(" ")),
                    Err(e) => (false, e.to_string()),
                }
            }

            "undo" => {
                let Some(&last) = self.state.actions_history().last() else {
                    return (false, "nothing to undo".to_string());
                };
                match self.state.undo_action(last) {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let actions = self.state.legal_actions();
                if actions.is_empty() {
                    return (false, "no legal moves".to_string());
                }
                let action = actions[self.rng.usize(..actions.len())];
                let text = match self.state.action_to_string(action) {
                    Ok(text) => text,
                    Err(e) => return (false, e.to_string()),
                };
                match self.state.apply_action(action) {
                    Ok(()) => (true, text),
                    Err(e) => (false, e.to_string()),
                }
            }

            "showboard" => (true, self.state.board().debug_string(None)),

            "sample" => {
                let observer = self.state.board().to_play();
                match self.state.determinized_for(observer, &mut self.rng) {
                    Ok(sample) => (true, sample.board().to_strados3()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "is_terminal" => (true, self.state.is_terminal().to_string()),

            "returns" => {
                let [red, blue] = self.state.returns();
                (true, format!("{red} {blue}"))
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
