use std::{fmt::Display, str::FromStr};

use isolation_game_types::{
    types::{ForecastableGame, MoveGeneratableGame, PlayerGettableGame},
    Board, Move,
};
use isolation_minimax::{
    AgentOptions, EvaluationStrategy, IsolationAgent, Scorable, SearchStrategy,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Anything that can sit at the board and play
pub(crate) trait Contestant {
    fn name(&self) -> &str;

    /// `board` is a copy, `time_left` counts down the milliseconds left for this move
    fn choose_move(&mut self, board: &Board, time_left: &dyn Fn() -> f64) -> Move;
}

pub(crate) type BoxedContestant = Box<dyn Contestant>;

/// Plays a uniformly random legal move
pub(crate) struct RandomContestant {
    rng: StdRng,
}

impl RandomContestant {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Contestant for RandomContestant {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, board: &Board, _time_left: &dyn Fn() -> f64) -> Move {
        board
            .get_legal_moves()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Move::FORFEIT)
    }
}

/// Plays whichever move scores best one ply ahead, ties going to the first legal move
pub(crate) struct GreedyContestant {
    name: String,
    strategy: EvaluationStrategy,
}

impl GreedyContestant {
    pub(crate) fn new(strategy: EvaluationStrategy) -> Self {
        Self {
            name: ContestantSpec::Greedy(strategy).to_string(),
            strategy,
        }
    }
}

impl Contestant for GreedyContestant {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, board: &Board, _time_left: &dyn Fn() -> f64) -> Move {
        let me = board.active_player();
        let mut best: Option<(Move, f64)> = None;

        for m in board.get_legal_moves() {
            let score = self.strategy.score(&board.forecast_move(m), me);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((m, score));
            }
        }

        best.map_or(Move::FORFEIT, |(m, _)| m)
    }
}

impl Contestant for IsolationAgent<EvaluationStrategy> {
    fn name(&self) -> &str {
        IsolationAgent::name(self)
    }

    fn choose_move(&mut self, board: &Board, time_left: &dyn Fn() -> f64) -> Move {
        IsolationAgent::choose_move(self, board, time_left)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A contestant as written on the command line
///
/// `random`, `greedy:<eval>`, `mm:<eval>` or `ab:<eval>` where `<eval>` is the name of an
/// [EvaluationStrategy], for example `ab:mobility-ratio`.
pub(crate) enum ContestantSpec {
    Random,
    Greedy(EvaluationStrategy),
    Agent(SearchStrategy, EvaluationStrategy),
}

impl ContestantSpec {
    /// `options.strategy` is replaced by the search this contestant names
    pub(crate) fn build(&self, options: AgentOptions, seed: u64) -> BoxedContestant {
        match *self {
            ContestantSpec::Random => Box::new(RandomContestant::new(seed)),
            ContestantSpec::Greedy(eval) => Box::new(GreedyContestant::new(eval)),
            ContestantSpec::Agent(strategy, eval) => Box::new(IsolationAgent::new(
                self.to_string(),
                eval,
                AgentOptions { strategy, ..options },
            )),
        }
    }
}

impl Display for ContestantSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContestantSpec::Random => write!(f, "random"),
            ContestantSpec::Greedy(eval) => write!(f, "greedy:{eval}"),
            ContestantSpec::Agent(SearchStrategy::Minimax, eval) => write!(f, "mm:{eval}"),
            ContestantSpec::Agent(SearchStrategy::AlphaBeta, eval) => write!(f, "ab:{eval}"),
        }
    }
}

impl FromStr for ContestantSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "random" {
            return Ok(ContestantSpec::Random);
        }

        let (kind, eval) = s
            .split_once(':')
            .ok_or_else(|| format!("`{s}` should be `random` or `<kind>:<eval>`"))?;
        let eval: EvaluationStrategy = eval.parse().map_err(|e| format!("{e}"))?;

        match kind {
            "greedy" => Ok(ContestantSpec::Greedy(eval)),
            "mm" => Ok(ContestantSpec::Agent(SearchStrategy::Minimax, eval)),
            "ab" => Ok(ContestantSpec::Agent(SearchStrategy::AlphaBeta, eval)),
            _ => Err(format!("unknown contestant kind `{kind}`")),
        }
    }
}
