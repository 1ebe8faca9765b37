use std::fmt::Display;

use derivative::Derivative;
use isolation_game_types::types::{ForecastableGame, Move, MoveGeneratableGame};
use tracing::{info_span, warn};

use crate::{AbortedEarly, AlphaBetaSearch, MinimaxSearch, Scorable, TimeGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Which search an [IsolationAgent] runs
pub enum SearchStrategy {
    /// A single [MinimaxSearch] to [AgentOptions::search_depth]
    Minimax,
    /// An iterative deepening [AlphaBetaSearch]
    AlphaBeta,
}

impl Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchStrategy::Minimax => write!(f, "minimax"),
            SearchStrategy::AlphaBeta => write!(f, "alphabeta"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Optional properties that can be defined for an [IsolationAgent]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use isolation_minimax::{AgentOptions, SearchStrategy};
///
/// let defaults: AgentOptions = Default::default();
///
/// assert_eq!(defaults.strategy, SearchStrategy::AlphaBeta);
/// assert_eq!(defaults.search_depth, 3);
/// assert_eq!(defaults.timeout, 10.0);
/// assert_eq!(defaults.max_depth, None);
/// ```
pub struct AgentOptions {
    /// Which search to run
    pub strategy: SearchStrategy,
    /// How deep the fixed depth search looks. Ignored by alpha-beta
    ///
    /// Defaults to 3
    pub search_depth: usize,
    /// How much of the remaining time we keep in reserve, in the same unit as the time source
    ///
    /// The search gives up as soon as less than this is left. Must be positive and finite, with
    /// zero or less the search only notices once the time is already gone. Defaults to 10
    /// milliseconds
    pub timeout: f64,
    /// The deepest iterative deepening will go, `None` to keep going until we run out of time
    pub max_depth: Option<usize>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::AlphaBeta,
            search_depth: 3,
            timeout: 10.0,
            max_depth: None,
        }
    }
}

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// A configured player: a search, an evaluation function and its limits
///
/// The agent holds no state between moves, so one agent can play any number of games.
pub struct IsolationAgent<ScorableType> {
    name: String,
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    options: AgentOptions,
}

impl<ScorableType> IsolationAgent<ScorableType> {
    /// Construct a new agent
    ///
    /// # Panics
    ///
    /// Debug builds panic on the first move if `options.timeout` is not positive. Callers taking
    /// the threshold from user input should reject those values first.
    pub fn new(
        name: impl Into<String>,
        score_function: ScorableType,
        options: AgentOptions,
    ) -> Self {
        Self {
            name: name.into(),
            score_function,
            options,
        }
    }

    #[allow(missing_docs)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[allow(missing_docs)]
    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    /// Pick the next move to make
    ///
    /// `time_left` reports the time remaining for this move, in milliseconds for the wall clock
    /// sources in this crate. Running out of time is never an error here: a fixed depth search
    /// that runs out answers [Move::FORFEIT], and alpha-beta answers the move from its last
    /// completed depth (see [AlphaBetaSearch::deepened_alphabeta]).
    pub fn choose_move<GameType>(&self, game: &GameType, time_left: &dyn Fn() -> f64) -> Move
    where
        GameType: MoveGeneratableGame + ForecastableGame,
        ScorableType: Scorable<GameType>,
    {
        info_span!(
            "choose_move",
            agent = %self.name,
            strategy = %self.options.strategy,
            chosen_move = tracing::field::Empty,
            depth = tracing::field::Empty,
        )
        .in_scope(|| {
            let time_guard = TimeGuard::new(time_left, self.options.timeout);

            let (chosen, depth) = match self.options.strategy {
                SearchStrategy::Minimax => {
                    let search = MinimaxSearch::new(&self.score_function, &time_guard);

                    match search.minimax(game, self.options.search_depth) {
                        Ok(m) => (m, Some(self.options.search_depth)),
                        Err(AbortedEarly) => {
                            warn!(
                                depth = self.options.search_depth,
                                "Ran out of time before the search finished, forfeiting"
                            );
                            (Move::FORFEIT, None)
                        }
                    }
                }
                SearchStrategy::AlphaBeta => {
                    let search = AlphaBetaSearch::new(&self.score_function, &time_guard);
                    let (m, completed) = search.deepened_alphabeta(game, self.options.max_depth);

                    (m, completed.map(|result| result.depth))
                }
            };

            let current_span = tracing::Span::current();
            current_span.record("chosen_move", tracing::field::display(chosen));
            if let Some(depth) = depth {
                current_span.record("depth", depth);
            }

            chosen
        })
    }
}
