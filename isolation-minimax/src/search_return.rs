use std::fmt::Display;

use isolation_game_types::Move;
use itertools::Itertools;

#[derive(Debug, Clone, PartialEq)]
/// This is returned from a completed search
/// It describes the root of the tree, which is all a caller needs to pick a move
pub struct SearchReturn {
    /// The chosen move. [Move::FORFEIT] if the root had no legal moves
    pub best_move: Move,
    /// The value of `best_move`
    pub score: f64,
    /// Every root move with the value the search gave it, in enumeration order
    ///
    /// With alpha-beta only the chosen value is exact. The other values are upper bounds on what
    /// those moves are worth.
    pub options: Vec<(Move, f64)>,
    /// The depth limit this search ran with
    pub depth: usize,
    /// How many nodes were visited, including the root
    pub nodes: u64,
    /// Whether any node was cut off by the depth limit. If not, a deeper search of the same
    /// position would visit exactly the same nodes
    pub reached_depth_limit: bool,
}

impl SearchReturn {
    /// True when the search proved `best_move` wins no matter what the opponent does
    pub fn is_forced_win(&self) -> bool {
        self.score == f64::INFINITY
    }

    /// True when every move loses against best play
    pub fn is_forced_loss(&self) -> bool {
        self.score == f64::NEG_INFINITY
    }
}

impl Display for SearchReturn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "depth {}: {} scored {} ({} nodes)",
            self.depth, self.best_move, self.score, self.nodes
        )?;
        write!(
            f,
            "options: {}",
            self.options
                .iter()
                .map(|(m, score)| format!("{m} => {score}"))
                .join(", ")
        )
    }
}
