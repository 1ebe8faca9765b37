//! A hand-built game tree and a deterministic clock for exercising the searches
//!
//! [TreeGame] follows the Isolation convention: a node without children means the side to move
//! is stuck. Node values are from [Player::First]'s point of view.

use std::{cell::Cell, rc::Rc};

use isolation_game_types::types::{
    ForecastableGame, Move, MoveGeneratableGame, Player, PlayerGettableGame,
};

#[derive(Debug)]
pub(crate) struct Tree {
    value: f64,
    children: Vec<Tree>,
}

pub(crate) fn node(value: f64, children: Vec<Tree>) -> Tree {
    Tree { value, children }
}

/// `a` starts a three ply forced win. `b` looks best until depth 3 and `c` gets pruned by
/// alpha-beta at depth 2.
///
/// ```text
/// root
/// ├─ a: 0 ─┬─ 0 ── +inf
/// │        └─ 0 ── +inf
/// ├─ b: 10 ── 7 ── 100 ── 1 ── 1
/// └─ c: 3 ─┬─ 2 ── 50
///          └─ -5 ── -50
/// ```
pub(crate) fn forced_win_tree() -> Tree {
    node(
        0.0,
        vec![
            node(
                0.0,
                vec![
                    node(0.0, vec![node(f64::INFINITY, vec![])]),
                    node(0.0, vec![node(f64::INFINITY, vec![])]),
                ],
            ),
            node(
                10.0,
                vec![node(
                    7.0,
                    vec![node(100.0, vec![node(1.0, vec![node(1.0, vec![])])])],
                )],
            ),
            node(
                3.0,
                vec![
                    node(2.0, vec![node(50.0, vec![])]),
                    node(-5.0, vec![node(-50.0, vec![])]),
                ],
            ),
        ],
    )
}

#[derive(Debug, Clone)]
pub(crate) struct TreeGame {
    root: Rc<Tree>,
    path: Vec<usize>,
    active: Player,
}

impl TreeGame {
    pub(crate) fn new(tree: Tree) -> Self {
        Self {
            root: Rc::new(tree),
            path: vec![],
            active: Player::First,
        }
    }

    fn current(&self) -> &Tree {
        self.path
            .iter()
            .fold(self.root.as_ref(), |tree, &idx| &tree.children[idx])
    }
}

impl PlayerGettableGame for TreeGame {
    type PlayerType = Player;

    fn active_player(&self) -> Player {
        self.active
    }

    fn get_opponent(&self, player: Player) -> Player {
        !player
    }
}

impl MoveGeneratableGame for TreeGame {
    fn get_legal_moves_for(&self, player: Player) -> Vec<Move> {
        if player != self.active {
            return vec![];
        }

        let row = self.path.len() as i32;
        (0..self.current().children.len())
            .map(|col| Move::new(row, col as i32))
            .collect()
    }
}

impl ForecastableGame for TreeGame {
    fn forecast_move(&self, m: Move) -> Self {
        let mut next = self.clone();
        next.path.push(m.col as usize);
        next.active = !next.active;
        next
    }
}

pub(crate) fn tree_score(game: &TreeGame, player: Player) -> f64 {
    let value = game.current().value;
    match player {
        Player::First => value,
        Player::Second => -value,
    }
}

/// Every query costs one unit of time, so a search aborts on exactly the `budget`th node when
/// used with a threshold of `0.5`
#[derive(Debug)]
pub(crate) struct CountingClock {
    budget: u64,
    calls: Cell<u64>,
}

impl CountingClock {
    pub(crate) fn new(budget: u64) -> Self {
        Self {
            budget,
            calls: Cell::new(0),
        }
    }

    pub(crate) fn unlimited() -> Self {
        Self::new(u64::MAX)
    }

    pub(crate) fn time_left(&self) -> f64 {
        self.calls.set(self.calls.get() + 1);
        self.budget as f64 - self.calls.get() as f64
    }

    pub(crate) fn calls(&self) -> u64 {
        self.calls.get()
    }
}
