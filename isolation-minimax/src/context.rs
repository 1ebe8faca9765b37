use std::cell::Cell;

use isolation_game_types::types::{Move, PlayerGettableGame};

use crate::{AbortedEarly, Scorable, SearchReturn, TimeGuard};

/// The per-search state shared by both searches
///
/// Searches only ever take `&self`, so the counters live in [Cell]s.
pub(crate) struct SearchContext<'a, ScorableType> {
    score_function: &'a ScorableType,
    time_guard: &'a TimeGuard<'a>,
    nodes: Cell<u64>,
    reached_depth_limit: Cell<bool>,
}

impl<'a, ScorableType> SearchContext<'a, ScorableType> {
    pub(crate) fn new(score_function: &'a ScorableType, time_guard: &'a TimeGuard<'a>) -> Self {
        Self {
            score_function,
            time_guard,
            nodes: Cell::new(0),
            reached_depth_limit: Cell::new(false),
        }
    }

    pub(crate) fn reset(&self) {
        self.nodes.set(0);
        self.reached_depth_limit.set(false);
    }

    /// Count the node and poll the clock. Every node, the root included, starts here
    pub(crate) fn enter_node(&self) -> Result<(), AbortedEarly> {
        self.nodes.set(self.nodes.get() + 1);
        self.time_guard.check()
    }

    /// Scores `game` if it is a leaf: either the side to move is stuck or we are out of depth
    pub(crate) fn leaf_score<GameType>(
        &self,
        game: &GameType,
        me: GameType::PlayerType,
        legal_moves: &[Move],
        depth: usize,
    ) -> Option<f64>
    where
        GameType: PlayerGettableGame,
        ScorableType: Scorable<GameType>,
    {
        if legal_moves.is_empty() {
            return Some(self.score_function.score(game, me));
        }

        if depth == 0 {
            self.reached_depth_limit.set(true);
            return Some(self.score_function.score(game, me));
        }

        None
    }

    /// The report for a root with no legal moves
    pub(crate) fn forfeit(&self, depth: usize) -> SearchReturn {
        SearchReturn {
            best_move: Move::FORFEIT,
            score: f64::NEG_INFINITY,
            options: vec![],
            depth,
            nodes: self.nodes.get(),
            reached_depth_limit: false,
        }
    }

    pub(crate) fn finish(
        &self,
        best_move: Move,
        score: f64,
        options: Vec<(Move, f64)>,
        depth: usize,
    ) -> SearchReturn {
        SearchReturn {
            best_move,
            score,
            options,
            depth,
            nodes: self.nodes.get(),
            reached_depth_limit: self.reached_depth_limit.get(),
        }
    }
}
