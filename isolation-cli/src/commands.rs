pub mod play;
pub mod solve;
pub mod tournament;

use std::time::Duration;

use clap::Subcommand;
use color_eyre::eyre::Result;
use isolation_game_types::{Board, Movement};
use isolation_minimax::AgentOptions;

use play::Play;
use solve::Solve;
use tournament::Tournament;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Play a single match between two contestants
    Play(Play),
    /// Rank agents by their win rate against a roster of baseline opponents
    Tournament(Tournament),
    /// Search a position from a JSON fixture and explain the chosen move
    Solve(Solve),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Play(p) => p.run()?,
            Command::Tournament(t) => t.run()?,
            Command::Solve(s) => s.run()?,
        }

        Ok(())
    }
}

fn parse_movement(s: &str) -> Result<Movement, String> {
    match s {
        "knight" => Ok(Movement::Knight),
        "king" => Ok(Movement::King),
        _ => Err(format!("unknown movement `{s}`, expected `knight` or `king`")),
    }
}

fn parse_threshold(s: &str) -> Result<f64, String> {
    let threshold: f64 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;

    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(format!("threshold must be a positive number of milliseconds, got `{s}`"));
    }

    Ok(threshold)
}

fn parse_side(s: &str) -> Result<usize, String> {
    let side: usize = s.parse().map_err(|e| format!("`{s}` is not a board size: {e}"))?;

    if side == 0 || side > MAX_SIDE {
        return Err(format!("board sides must be between 1 and {MAX_SIDE}, got {side}"));
    }

    Ok(side)
}

/// Largest `--width` or `--height`, a square board of this side has
/// [isolation_game_types::board::MAX_CELLS] cells
const MAX_SIDE: usize = 1 << 10;

#[derive(clap::Args, Debug, Clone)]
pub(crate) struct BoardArgs {
    /// Number of columns
    #[clap(long, value_parser = parse_side, default_value_t = 7)]
    width: usize,

    /// Number of rows
    #[clap(long, value_parser = parse_side, default_value_t = 7)]
    height: usize,

    /// How players move once placed, `knight` or `king`
    #[clap(long, value_parser = parse_movement, default_value = "knight")]
    movement: Movement,
}

impl BoardArgs {
    pub(crate) fn board(&self) -> Board {
        Board::with_movement(self.width, self.height, self.movement)
    }
}

#[derive(clap::Args, Debug, Clone)]
pub(crate) struct SearchArgs {
    /// Milliseconds each contestant gets per move
    #[clap(short, long, value_parser, default_value_t = 150)]
    time_limit: u64,

    /// Milliseconds an agent keeps in reserve before it stops searching
    #[clap(long, value_parser = parse_threshold, default_value_t = 10.0)]
    threshold: f64,

    /// Depth of the fixed depth minimax agents
    #[clap(short, long, value_parser, default_value_t = 3)]
    depth: usize,

    /// Deepest the iterative deepening agents will go. Unlimited if not specified
    #[clap(long, value_parser)]
    max_depth: Option<usize>,
}

impl SearchArgs {
    pub(crate) fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit)
    }

    pub(crate) fn agent_options(&self) -> AgentOptions {
        AgentOptions {
            search_depth: self.depth,
            timeout: self.threshold,
            max_depth: self.max_depth,
            ..Default::default()
        }
    }
}
