use std::{
    fmt::Display,
    time::{Duration, Instant},
};

use isolation_game_types::{
    types::{MoveGeneratableGame, PlayerGettableGame},
    Board, Move, Player,
};
use isolation_minimax::time_left_until;
use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info};

use crate::contestants::Contestant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Why the loser lost
pub(crate) enum Outcome {
    /// They had nothing left to play
    NoLegalMoves,
    /// They answered after their time ran out
    Timeout,
    /// They answered a move that is not legal, including [Move::FORFEIT]
    IllegalMove(Move),
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::NoLegalMoves => write!(f, "ran out of moves"),
            Outcome::Timeout => write!(f, "ran out of time"),
            Outcome::IllegalMove(m) => write!(f, "played the illegal move {m}"),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MatchResult {
    pub(crate) winner: Player,
    pub(crate) outcome: Outcome,
    /// Every move applied, starting from the board the match was given
    pub(crate) history: Vec<Move>,
    pub(crate) final_board: Board,
}

/// Plays `board` out between the two contestants, `first` playing [Player::First]
///
/// Each move gets a fresh `time_limit`. The match continues from whoever is active on `board`,
/// so a board with an opening already applied works too.
pub(crate) fn play_match(
    mut board: Board,
    first: &mut dyn Contestant,
    second: &mut dyn Contestant,
    time_limit: Duration,
) -> MatchResult {
    let mut history = vec![];

    loop {
        let active = board.active_player();
        let legal_moves = board.get_legal_moves();

        let contestant: &mut dyn Contestant = match active {
            Player::First => &mut *first,
            Player::Second => &mut *second,
        };

        let lost = |outcome: Outcome, history: Vec<Move>, board: Board| {
            info!(loser = %active, %outcome, moves = history.len(), "Match over");
            MatchResult {
                winner: !active,
                outcome,
                history,
                final_board: board,
            }
        };

        if legal_moves.is_empty() {
            return lost(Outcome::NoLegalMoves, history, board);
        }

        let deadline = Instant::now() + time_limit;
        let time_left = time_left_until(deadline);
        let m = contestant.choose_move(&board.clone(), &time_left);

        if time_left() < 0.0 {
            return lost(Outcome::Timeout, history, board);
        }

        if !legal_moves.contains(&m) {
            return lost(Outcome::IllegalMove(m), history, board);
        }

        debug!(player = %active, contestant = contestant.name(), %m, "Move");
        board.apply_move(m);
        history.push(m);
    }
}

/// Both players place themselves on random open cells
pub(crate) fn random_opening<R: Rng>(board: &Board, rng: &mut R) -> Board {
    let mut board = board.clone();

    for _ in 0..2 {
        if let Some(&m) = board.get_legal_moves().choose(rng) {
            board.apply_move(m);
        }
    }

    board
}
