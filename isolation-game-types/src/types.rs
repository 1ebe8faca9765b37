//! Traits and value types shared by every Isolation game representation
//!
//! Each trait covers one capability so that consumers only ask for what they use. The searches
//! need [MoveGeneratableGame] and [ForecastableGame]; the evaluation functions additionally need
//! [VictorDeterminableGame], [PositionGettableGame] and [DimensionGettableGame].

use std::{fmt::Display, ops::Not};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// A board cell, used both as the move that lands on it and as a player location
pub struct Move {
    #[allow(missing_docs)]
    pub row: i32,
    #[allow(missing_docs)]
    pub col: i32,
}

impl Move {
    /// The reserved "no legal move" value. A player that answers this has forfeited
    pub const FORFEIT: Move = Move { row: -1, col: -1 };

    #[allow(missing_docs)]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// True for [Move::FORFEIT]
    pub fn is_forfeit(&self) -> bool {
        *self == Self::FORFEIT
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Move {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// One of the two players. `First` moves first on a fresh board
pub enum Player {
    #[allow(missing_docs)]
    First,
    #[allow(missing_docs)]
    Second,
}

impl Player {
    /// Index into per-player arrays
    pub fn as_index(&self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }
}

impl Not for Player {
    type Output = Player;

    fn not(self) -> Self::Output {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::First => write!(f, "Player 1"),
            Player::Second => write!(f, "Player 2"),
        }
    }
}

/// A game that knows whose turn it is
pub trait PlayerGettableGame {
    /// The handle used to refer to a player
    type PlayerType: Copy + Eq + std::fmt::Debug;

    /// The player whose turn it is
    fn active_player(&self) -> Self::PlayerType;

    /// The player waiting for the active player to move
    fn inactive_player(&self) -> Self::PlayerType {
        self.get_opponent(self.active_player())
    }

    /// The other player
    fn get_opponent(&self, player: Self::PlayerType) -> Self::PlayerType;
}

/// A game that can list the legal moves of either player
///
/// Implementations must enumerate moves in a deterministic order, searches break ties on
/// enumeration order.
pub trait MoveGeneratableGame: PlayerGettableGame {
    /// The moves `player` could make from the current position
    fn get_legal_moves_for(&self, player: Self::PlayerType) -> Vec<Move>;

    /// The moves available to the active player
    fn get_legal_moves(&self) -> Vec<Move> {
        self.get_legal_moves_for(self.active_player())
    }

    /// Whether `player` has any move at all
    fn has_legal_moves(&self, player: Self::PlayerType) -> bool {
        !self.get_legal_moves_for(player).is_empty()
    }
}

/// A game that can produce the position after a move without touching the current one
pub trait ForecastableGame: Sized {
    /// Returns the successor position after the active player makes `m`
    fn forecast_move(&self, m: Move) -> Self;
}

/// A game that can tell whether it has been decided
pub trait VictorDeterminableGame: PlayerGettableGame {
    /// `player` has won: their opponent is to move and has no legal moves
    fn is_winner(&self, player: Self::PlayerType) -> bool;

    /// `player` has lost: they are to move and have no legal moves
    fn is_loser(&self, player: Self::PlayerType) -> bool;
}

/// A game that knows where the players stand
pub trait PositionGettableGame: PlayerGettableGame {
    /// The cell `player` occupies, or `None` before their first move
    fn get_player_location(&self, player: Self::PlayerType) -> Option<Move>;
}

/// A rectangular game board
pub trait DimensionGettableGame {
    /// Number of columns
    fn width(&self) -> usize;
    /// Number of rows
    fn height(&self) -> usize;
}
