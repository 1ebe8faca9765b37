use std::fmt::Debug;

use isolation_game_types::types::{ForecastableGame, Move, MoveGeneratableGame};
use tracing::{debug, info};

use crate::{context::SearchContext, AbortedEarly, Scorable, SearchReturn, TimeGuard};

/// Minimax with alpha-beta pruning, plus an iterative deepening driver
///
/// Alpha is the value the maximizing root player can already guarantee elsewhere in the tree
/// and beta the value the minimizing opponent can. Bounds are passed down by value, so a child
/// tightening its window never leaks into its siblings.
pub struct AlphaBetaSearch<'a, ScorableType> {
    context: SearchContext<'a, ScorableType>,
}

impl<'a, ScorableType> Debug for AlphaBetaSearch<'a, ScorableType> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaBetaSearch").finish_non_exhaustive()
    }
}

impl<'a, ScorableType> AlphaBetaSearch<'a, ScorableType> {
    #[allow(missing_docs)]
    pub fn new(score_function: &'a ScorableType, time_guard: &'a TimeGuard<'a>) -> Self {
        Self {
            context: SearchContext::new(score_function, time_guard),
        }
    }

    /// Returns the best move for the side to move, looking `depth` plies ahead
    ///
    /// Returns [Move::FORFEIT] if there are no legal moves.
    pub fn alphabeta<GameType>(&self, game: &GameType, depth: usize) -> Result<Move, AbortedEarly>
    where
        GameType: MoveGeneratableGame + ForecastableGame,
        ScorableType: Scorable<GameType>,
    {
        Ok(self.alphabeta_report(game, depth)?.best_move)
    }

    /// [AlphaBetaSearch::alphabeta] with the full `(-inf, +inf)` window, returning everything we
    /// learned about the root
    pub fn alphabeta_report<GameType>(
        &self,
        game: &GameType,
        depth: usize,
    ) -> Result<SearchReturn, AbortedEarly>
    where
        GameType: MoveGeneratableGame + ForecastableGame,
        ScorableType: Scorable<GameType>,
    {
        self.alphabeta_report_with_window(game, depth, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Runs the search from the root with the given window
    ///
    /// Alpha is raised across the root moves but the root never takes a beta cutoff: every root
    /// move gets compared before one is chosen. Like [crate::MinimaxSearch] the first move with
    /// the strictly greatest value wins.
    pub fn alphabeta_report_with_window<GameType>(
        &self,
        game: &GameType,
        depth: usize,
        alpha: f64,
        beta: f64,
    ) -> Result<SearchReturn, AbortedEarly>
    where
        GameType: MoveGeneratableGame + ForecastableGame,
        ScorableType: Scorable<GameType>,
    {
        self.context.reset();
        self.context.enter_node()?;

        let me = game.active_player();
        let legal_moves = game.get_legal_moves();

        let Some(&first_move) = legal_moves.first() else {
            return Ok(self.context.forfeit(depth));
        };

        let mut alpha = alpha;
        let mut best_move = first_move;
        let mut best_score = f64::NEG_INFINITY;
        let mut options = Vec::with_capacity(legal_moves.len());

        for m in legal_moves {
            let value = self.min_value(
                &game.forecast_move(m),
                me,
                depth.saturating_sub(1),
                alpha,
                beta,
            )?;
            options.push((m, value));

            if value > best_score {
                best_score = value;
                best_move = m;
            }

            alpha = alpha.max(value);
        }

        Ok(self.context.finish(best_move, best_score, options, depth))
    }

    fn max_value<GameType>(
        &self,
        game: &GameType,
        me: GameType::PlayerType,
        depth: usize,
        alpha: f64,
        beta: f64,
    ) -> Result<f64, AbortedEarly>
    where
        GameType: MoveGeneratableGame + ForecastableGame,
        ScorableType: Scorable<GameType>,
    {
        self.context.enter_node()?;

        let legal_moves = game.get_legal_moves();
        if let Some(score) = self.context.leaf_score(game, me, &legal_moves, depth) {
            return Ok(score);
        }

        let mut alpha = alpha;
        let mut max_value = f64::NEG_INFINITY;

        for m in legal_moves {
            let value = self.min_value(&game.forecast_move(m), me, depth - 1, alpha, beta)?;
            max_value = max_value.max(value);

            if max_value >= beta {
                // beta cutoff, the minimizer will never let us get here
                return Ok(max_value);
            }

            alpha = alpha.max(max_value);
        }

        Ok(max_value)
    }

    fn min_value<GameType>(
        &self,
        game: &GameType,
        me: GameType::PlayerType,
        depth: usize,
        alpha: f64,
        beta: f64,
    ) -> Result<f64, AbortedEarly>
    where
        GameType: MoveGeneratableGame + ForecastableGame,
        ScorableType: Scorable<GameType>,
    {
        self.context.enter_node()?;

        let legal_moves = game.get_legal_moves();
        if let Some(score) = self.context.leaf_score(game, me, &legal_moves, depth) {
            return Ok(score);
        }

        let mut beta = beta;
        let mut min_value = f64::INFINITY;

        for m in legal_moves {
            let value = self.max_value(&game.forecast_move(m), me, depth - 1, alpha, beta)?;
            min_value = min_value.min(value);

            if min_value <= alpha {
                // alpha cutoff
                return Ok(min_value);
            }

            beta = beta.min(min_value);
        }

        Ok(min_value)
    }

    /// This will do an iterative deepening alpha-beta until we run out of time. Iterative
    /// deepening means it will first run the search at a depth of 1, then at a depth of 2, and so
    /// on.
    ///
    /// Only completed depths count. When the clock aborts a depth part way through we return the
    /// move from the last depth that finished, since a half searched root has only been compared
    /// against some of its siblings. If not even depth 1 finished we fall back to the first legal
    /// move, or [Move::FORFEIT] when there is none.
    ///
    /// We also stop early, without waiting for the clock, once a depth proves a forced win or
    /// searches the whole remaining game tree, and when `max_depth` is reached.
    ///
    /// Returns the chosen move along with the report of the last completed depth.
    pub fn deepened_alphabeta<GameType>(
        &self,
        game: &GameType,
        max_depth: Option<usize>,
    ) -> (Move, Option<SearchReturn>)
    where
        GameType: MoveGeneratableGame + ForecastableGame,
        ScorableType: Scorable<GameType>,
    {
        let legal_moves = game.get_legal_moves();
        let Some(&fallback) = legal_moves.first() else {
            return (Move::FORFEIT, None);
        };

        let mut completed: Option<SearchReturn> = None;

        for depth in 1.. {
            if max_depth.map_or(false, |max_depth| depth > max_depth) {
                break;
            }

            let result = match self.alphabeta_report(game, depth) {
                Ok(result) => result,
                Err(AbortedEarly) => {
                    info!(
                        depth,
                        completed_depth = ?completed.as_ref().map(|r| r.depth),
                        "Ran out of time, using the last completed depth"
                    );
                    break;
                }
            };

            debug!(
                depth,
                best_move = %result.best_move,
                score = result.score,
                nodes = result.nodes,
                "Completed depth",
            );

            let finished = result.is_forced_win() || !result.reached_depth_limit;
            completed = Some(result);

            if finished {
                info!(depth, "The rest of the game is decided, no need to keep going");
                break;
            }
        }

        let best_move = completed.as_ref().map_or(fallback, |r| r.best_move);
        (best_move, completed)
    }
}
