use std::fmt::Debug;

use isolation_game_types::types::{ForecastableGame, Move, MoveGeneratableGame};

use crate::{context::SearchContext, AbortedEarly, Scorable, SearchReturn, TimeGuard};

/// Fixed depth minimax
///
/// The root player maximizes and the opponent minimizes. Every node polls the [TimeGuard] before
/// doing any work. A fixed depth search has nothing to fall back to, so running out of time
/// simply returns [AbortedEarly] to the caller.
pub struct MinimaxSearch<'a, ScorableType> {
    context: SearchContext<'a, ScorableType>,
}

impl<'a, ScorableType> Debug for MinimaxSearch<'a, ScorableType> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MinimaxSearch").finish_non_exhaustive()
    }
}

impl<'a, ScorableType> MinimaxSearch<'a, ScorableType> {
    #[allow(missing_docs)]
    pub fn new(score_function: &'a ScorableType, time_guard: &'a TimeGuard<'a>) -> Self {
        Self {
            context: SearchContext::new(score_function, time_guard),
        }
    }

    /// Returns the best move for the side to move, looking `depth` plies ahead
    ///
    /// Returns [Move::FORFEIT] if there are no legal moves.
    pub fn minimax<GameType>(&self, game: &GameType, depth: usize) -> Result<Move, AbortedEarly>
    where
        GameType: MoveGeneratableGame + ForecastableGame,
        ScorableType: Scorable<GameType>,
    {
        Ok(self.minimax_report(game, depth)?.best_move)
    }

    /// The same search as [MinimaxSearch::minimax] but returns everything we learned about the
    /// root
    ///
    /// The first move with the strictly greatest value wins, so ties go to enumeration order. A
    /// depth of 0 is treated like a depth of 1 since the root has to pick something.
    pub fn minimax_report<GameType>(
        &self,
        game: &GameType,
        depth: usize,
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

        let mut best_move = first_move;
        let mut best_score = f64::NEG_INFINITY;
        let mut options = Vec::with_capacity(legal_moves.len());

        for m in legal_moves {
            let value = self.min_value(&game.forecast_move(m), me, depth.saturating_sub(1))?;
            options.push((m, value));

            if value > best_score {
                best_score = value;
                best_move = m;
            }
        }

        Ok(self.context.finish(best_move, best_score, options, depth))
    }

    fn max_value<GameType>(
        &self,
        game: &GameType,
        me: GameType::PlayerType,
        depth: usize,
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

        let mut max_value = f64::NEG_INFINITY;
        for m in legal_moves {
            max_value = max_value.max(self.min_value(&game.forecast_move(m), me, depth - 1)?);
        }

        Ok(max_value)
    }

    fn min_value<GameType>(
        &self,
        game: &GameType,
        me: GameType::PlayerType,
        depth: usize,
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

        let mut min_value = f64::INFINITY;
        for m in legal_moves {
            min_value = min_value.min(self.max_value(&game.forecast_move(m), me, depth - 1)?);
        }

        Ok(min_value)
    }
}

#[cfg(test)]
mod tests {
    use isolation_game_types::{wire_representation::Game, Board};

    use super::*;
    use crate::{
        heuristics::improved_score,
        test_support::{forced_win_tree, node, tree_score, CountingClock, TreeGame},
    };

    fn fixture(json: &str) -> Board {
        let game: Game = serde_json::from_str(json).unwrap();
        Board::try_from(game).unwrap()
    }

    #[test]
    fn test_shallow_search_takes_the_decoy() {
        let game = TreeGame::new(forced_win_tree());
        let clock = CountingClock::unlimited();
        let time_left = || clock.time_left();
        let guard = TimeGuard::new(&time_left, 0.5);
        let search = MinimaxSearch::new(&tree_score, &guard);

        assert_eq!(search.minimax(&game, 1), Ok(Move::new(0, 1)));
        assert_eq!(search.minimax(&game, 2), Ok(Move::new(0, 1)));
    }

    #[test]
    fn test_finds_the_forced_win_at_every_sufficient_depth() {
        let game = TreeGame::new(forced_win_tree());
        let clock = CountingClock::unlimited();
        let time_left = || clock.time_left();
        let guard = TimeGuard::new(&time_left, 0.5);
        let search = MinimaxSearch::new(&tree_score, &guard);

        for depth in 3..=7 {
            let result = search.minimax_report(&game, depth).unwrap();
            assert_eq!(result.best_move, Move::new(0, 0), "depth {depth}");
            assert!(result.is_forced_win());
        }
    }

    #[test]
    fn test_reports_values_of_every_root_move() {
        let game = TreeGame::new(forced_win_tree());
        let clock = CountingClock::unlimited();
        let time_left = || clock.time_left();
        let guard = TimeGuard::new(&time_left, 0.5);
        let search = MinimaxSearch::new(&tree_score, &guard);

        let result = search.minimax_report(&game, 2).unwrap();

        assert_eq!(
            result.options,
            vec![
                (Move::new(0, 0), 0.0),
                (Move::new(0, 1), 7.0),
                (Move::new(0, 2), -5.0)
            ]
        );
        assert_eq!(result.score, 7.0);
        assert_eq!(result.nodes, 9);
        assert!(result.reached_depth_limit);
    }

    #[test]
    fn test_every_node_polls_the_clock() {
        let game = TreeGame::new(forced_win_tree());
        let clock = CountingClock::unlimited();
        let time_left = || clock.time_left();
        let guard = TimeGuard::new(&time_left, 0.5);
        let search = MinimaxSearch::new(&tree_score, &guard);

        let result = search.minimax_report(&game, 3).unwrap();

        assert_eq!(clock.calls(), result.nodes);
    }

    #[test]
    fn test_ties_go_to_the_first_move() {
        let tree = node(0.0, vec![node(4.0, vec![]), node(4.0, vec![])]);
        let game = TreeGame::new(tree);
        let clock = CountingClock::unlimited();
        let time_left = || clock.time_left();
        let guard = TimeGuard::new(&time_left, 0.5);
        let search = MinimaxSearch::new(&tree_score, &guard);

        assert_eq!(search.minimax(&game, 1), Ok(Move::new(0, 0)));
    }

    #[test]
    fn test_lost_position_still_answers_a_legal_move() {
        let game = TreeGame::new(node(
            0.0,
            vec![
                node(f64::NEG_INFINITY, vec![]),
                node(f64::NEG_INFINITY, vec![]),
            ],
        ));
        let clock = CountingClock::unlimited();
        let time_left = || clock.time_left();
        let guard = TimeGuard::new(&time_left, 0.5);
        let search = MinimaxSearch::new(&tree_score, &guard);

        let result = search.minimax_report(&game, 2).unwrap();

        assert_eq!(result.best_move, Move::new(0, 0));
        assert!(result.is_forced_loss());
    }

    #[test]
    fn test_no_legal_moves_returns_forfeit_without_children() {
        let board = fixture(include_str!("../../isolation-game-types/fixtures/no_moves.json"));
        let time_left = || 1_000.0;
        let guard = TimeGuard::new(&time_left, 10.0);
        let search = MinimaxSearch::new(&improved_score::<Board>, &guard);

        let result = search.minimax_report(&board, 3).unwrap();

        assert_eq!(result.best_move, Move::FORFEIT);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_aborts_when_clock_runs_out() {
        let game = TreeGame::new(forced_win_tree());
        let clock = CountingClock::new(4);
        let time_left = || clock.time_left();
        let guard = TimeGuard::new(&time_left, 0.5);
        let search = MinimaxSearch::new(&tree_score, &guard);

        assert_eq!(search.minimax(&game, 3), Err(AbortedEarly));
        assert_eq!(clock.calls(), 4);
    }

    #[test]
    fn test_takes_the_immediate_win_on_a_board() {
        let board = fixture(include_str!(
            "../../isolation-game-types/fixtures/one_move_win.json"
        ));
        let time_left = || 1_000.0;
        let guard = TimeGuard::new(&time_left, 10.0);
        let search = MinimaxSearch::new(&improved_score::<Board>, &guard);

        for depth in 1..=4 {
            assert_eq!(search.minimax(&board, depth), Ok(Move::new(1, 1)));
        }
    }
}
