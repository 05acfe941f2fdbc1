//! Yorktown: a Stratego-variant rules engine.
//!
//! ## Usage
//!
//! - `yorktown` - Play a short random demo game
//! - `yorktown protocol` - Start the text protocol on stdin/stdout
//! - `yorktown demo --plies 200` - Play random moves and show the result
//! - `yorktown sample --position <S>` - Print a determinized position

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use yorktown::constants::DEFAULT_POSITION;
use yorktown::game::{GameState, random_playout};
use yorktown::protocol::ProtocolEngine;
use yorktown::state::YorktownState;

/// Yorktown: a Stratego-variant rules engine
#[derive(Parser)]
#[command(name = "yorktown")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the line-oriented text protocol
    Protocol {
        /// StraDos3 starting position
        #[arg(long)]
        position: Option<String>,
        /// Seed for genmove and sample
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play random moves from a position and print the board
    Demo {
        /// Maximum number of moves to play
        #[arg(long, default_value_t = 100)]
        plies: usize,
        #[arg(long)]
        seed: Option<u64>,
        /// StraDos3 starting position
        #[arg(long)]
        position: Option<String>,
    },
    /// Sample the hidden pieces of a position for the side to move
    Sample {
        /// StraDos3 position
        #[arg(long)]
        position: String,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Protocol { position, seed }) => {
            let position = position.unwrap_or_else(|| DEFAULT_POSITION.to_string());
            let mut engine = ProtocolEngine::with_position(&position, seed)
                .with_context(|| format!("invalid position: {position}"))?;
            engine.run().context("protocol loop failed")?;
        }
        Some(Commands::Demo {
            plies,
            seed,
            position,
        }) => run_demo(position.as_deref(), plies, seed)?,
        Some(Commands::Sample { position, seed }) => run_sample(&position, seed)?,
        None => run_demo(None, 40, None)?,
    }
    Ok(())
}

fn load_state(position: Option<&str>) -> Result<YorktownState> {
    let position = position.unwrap_or(DEFAULT_POSITION);
    YorktownState::from_strados3(position).with_context(|| format!("invalid position: {position}"))
}

fn make_rng(seed: Option<u64>) -> fastrand::Rng {
    seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
}

fn run_demo(position: Option<&str>, plies: usize, seed: Option<u64>) -> Result<()> {
    println!("Yorktown: Stratego-variant rules engine\n");

    let mut state = load_state(position)?;
    let mut rng = make_rng(seed);
    println!("{}", state.board().debug_string(None));

    let played = random_playout(&mut state, &mut rng, plies).context("random playout failed")?;
    eprintln!("played {played} moves");

    let history: Vec<String> = state.moves_history().iter().map(|m| m.to_lan()).collect();
    println!("Moves: {}", history.join(" "));
    println!("{}", state.board().debug_string(None));
    if state.is_terminal() {
        let [red, blue] = state.returns();
        println!("Game over: red {red}, blue {blue}");
    }
    Ok(())
}

fn run_sample(position: &str, seed: Option<u64>) -> Result<()> {
    let state = load_state(Some(position))?;
    let mut rng = make_rng(seed);
    let observer = state.board().to_play();
    let sample = state
        .determinized_for(observer, &mut rng)
        .context("could not sample hidden pieces")?;
    println!("{}", sample.board().to_strados3());
    Ok(())
}
