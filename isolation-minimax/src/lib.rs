#![deny(missing_debug_implementations)]
#![warn(missing_docs, missing_copy_implementations)]
//! This crate implements minimax game tree search for two player Isolation style games. You
//! provide a 'scoring' function that turns a position into an `f64` from the point of view of a
//! player, and decided positions score `-inf` or `+inf`.
//!
//! We lean on the `isolation-game-types` crate for the game logic, in particular for the
//! forecast logic which is used to generate the next positions.
//!
//! There are two searches:
//!
//! - [MinimaxSearch] runs a fixed depth minimax
//! - [AlphaBetaSearch] runs minimax with alpha-beta pruning, and deepens iteratively until it runs
//!   out of time
//!
//! Both poll a [TimeGuard] at every node. When the time runs low the search unwinds with
//! [AbortedEarly] and the caller falls back to the best move it already knows. [IsolationAgent]
//! wraps all of this behind a single [IsolationAgent::choose_move].
//!
//! ```rust
//! use isolation_game_types::{Board, Move};
//! use isolation_minimax::{AgentOptions, EvaluationStrategy, IsolationAgent, SearchStrategy};
//!
//! let mut board = Board::new(7, 7);
//! board.apply_move(Move::new(3, 3));
//! board.apply_move(Move::new(0, 0));
//!
//! let options = AgentOptions {
//!     strategy: SearchStrategy::AlphaBeta,
//!     max_depth: Some(3),
//!     ..Default::default()
//! };
//! let agent = IsolationAgent::new("ab-improved", EvaluationStrategy::Improved, options);
//!
//! // Remaining time in milliseconds, this one never runs out
//! let chosen = agent.choose_move(&board, &|| 1_000.0);
//! assert!(!chosen.is_forfeit());
//! ```

mod agent;
pub use agent::{AgentOptions, IsolationAgent, SearchStrategy};

mod context;

mod alphabeta;
pub use alphabeta::AlphaBetaSearch;

pub mod heuristics;
pub use heuristics::EvaluationStrategy;

mod minimax;
pub use minimax::MinimaxSearch;

mod score;
pub use score::Scorable;

mod search_return;
pub use search_return::SearchReturn;

mod time_guard;
pub use time_guard::{time_left_until, AbortedEarly, TimeGuard};

#[cfg(test)]
mod test_support;
