//! The serialisable shape of an Isolation position
//!
//! This is what fixture files contain. It is deliberately loose, [Board::try_from] does the
//! validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    board::{Board, Movement, MAX_CELLS},
    types::{Move, Player},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Game {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub movement: Movement,
    pub active_player: Player,
    #[serde(default)]
    pub first: Option<Move>,
    #[serde(default)]
    pub second: Option<Move>,
    /// Every occupied cell, including the cells the players currently stand on
    #[serde(default)]
    pub blocked: Vec<Move>,
}

#[derive(Debug, Error, PartialEq, Eq)]
/// Reasons a [Game] does not describe a valid [Board]
pub enum WireError {
    /// The board has no cells
    #[error("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard {
        #[allow(missing_docs)]
        width: usize,
        #[allow(missing_docs)]
        height: usize,
    },
    /// The board has more than [MAX_CELLS] cells
    #[error("board must have at most {} cells, got {width}x{height}", MAX_CELLS)]
    TooLarge {
        #[allow(missing_docs)]
        width: usize,
        #[allow(missing_docs)]
        height: usize,
    },
    /// A cell lies outside the board
    #[error("cell {0} is outside the board")]
    OutOfBounds(Move),
    /// A cell is listed as blocked twice
    #[error("cell {0} is blocked more than once")]
    DuplicateBlocked(Move),
    /// Both players claim the same cell
    #[error("both players are on {0}")]
    SharedLocation(Move),
    /// A player stands on a cell that is not in the blocked list
    #[error("{player} is on {cell} but that cell is not blocked")]
    UnblockedLocation {
        #[allow(missing_docs)]
        player: Player,
        #[allow(missing_docs)]
        cell: Move,
    },
}

impl TryFrom<Game> for Board {
    type Error = WireError;

    fn try_from(game: Game) -> Result<Self, Self::Error> {
        if game.width == 0 || game.height == 0 {
            return Err(WireError::EmptyBoard {
                width: game.width,
                height: game.height,
            });
        }

        match game.width.checked_mul(game.height) {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => {
                return Err(WireError::TooLarge {
                    width: game.width,
                    height: game.height,
                })
            }
        }

        let mut board = Board::with_movement(game.width, game.height, game.movement);

        for &cell in &game.blocked {
            let idx = board
                .cell_index(cell)
                .ok_or(WireError::OutOfBounds(cell))?;

            if board.blocked[idx] {
                return Err(WireError::DuplicateBlocked(cell));
            }
            board.blocked[idx] = true;
        }

        if let (Some(first), Some(second)) = (game.first, game.second) {
            if first == second {
                return Err(WireError::SharedLocation(first));
            }
        }

        for (player, location) in [(Player::First, game.first), (Player::Second, game.second)] {
            if let Some(cell) = location {
                let idx = board
                    .cell_index(cell)
                    .ok_or(WireError::OutOfBounds(cell))?;

                if !board.blocked[idx] {
                    return Err(WireError::UnblockedLocation { player, cell });
                }
            }
            board.locations[player.as_index()] = location;
        }

        board.active = game.active_player;
        board.move_count = game.blocked.len();

        Ok(board)
    }
}

impl From<&Board> for Game {
    fn from(board: &Board) -> Self {
        let blocked = itertools::iproduct!(0..board.height, 0..board.width)
            .map(|(row, col)| Move::new(row as i32, col as i32))
            .filter(|&cell| !board.is_open(cell))
            .collect();

        Self {
            width: board.width,
            height: board.height,
            movement: board.movement,
            active_player: board.active,
            first: board.locations[0],
            second: board.locations[1],
            blocked,
        }
    }
}
