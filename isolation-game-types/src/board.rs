//! The standard Isolation board
//!
//! Two players take turns occupying cells. A cell is blocked for the rest of the game once any
//! player has stood on it. A player who has not moved yet may place itself on any open cell,
//! after that it moves according to the board's [Movement]. The player to move with no legal
//! moves loses.

use std::fmt::Display;

use itertools::{iproduct, Itertools};
use serde::{Deserialize, Serialize};

use crate::types::{
    DimensionGettableGame, ForecastableGame, Move, MoveGeneratableGame, Player,
    PlayerGettableGame, PositionGettableGame, VictorDeterminableGame,
};

const KNIGHT_DIRECTIONS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The most cells a board may have
///
/// Every row and column index of a board this size fits the `i32` coordinates of a [Move].
pub const MAX_CELLS: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// How a placed player travels between cells
pub enum Movement {
    /// L-shaped jumps like a chess knight. This is the standard game
    #[default]
    Knight,
    /// A single step in any of the eight directions
    King,
}

impl Movement {
    fn directions(&self) -> &'static [(i32, i32); 8] {
        match self {
            Movement::Knight => &KNIGHT_DIRECTIONS,
            Movement::King => &KING_DIRECTIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// An Isolation position
pub struct Board {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) movement: Movement,
    /// Row-major, `true` once a player has occupied the cell
    pub(crate) blocked: Vec<bool>,
    pub(crate) locations: [Option<Move>; 2],
    pub(crate) active: Player,
    pub(crate) move_count: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(7, 7)
    }
}

impl Board {
    /// An empty knight-movement board with [Player::First] to move
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_movement(width, height, Movement::Knight)
    }

    /// `width * height` is expected to be at most [MAX_CELLS]. Boards read from a
    /// [crate::wire_representation::Game] are checked for that.
    pub fn with_movement(width: usize, height: usize, movement: Movement) -> Self {
        Self {
            width,
            height,
            movement,
            blocked: vec![false; width * height],
            locations: [None, None],
            active: Player::First,
            move_count: 0,
        }
    }

    #[allow(missing_docs)]
    pub fn movement(&self) -> Movement {
        self.movement
    }

    /// Number of moves applied so far
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub(crate) fn cell_index(&self, cell: Move) -> Option<usize> {
        let row: usize = cell.row.try_into().ok()?;
        let col: usize = cell.col.try_into().ok()?;

        if row >= self.height || col >= self.width {
            return None;
        }

        Some(row * self.width + col)
    }

    /// Whether `cell` is on the board and nobody has occupied it yet
    pub fn is_open(&self, cell: Move) -> bool {
        self.cell_index(cell)
            .map(|idx| !self.blocked[idx])
            .unwrap_or(false)
    }

    /// Every open cell in row-major order
    pub fn open_cells(&self) -> Vec<Move> {
        iproduct!(0..self.height, 0..self.width)
            .map(|(row, col)| Move::new(row as i32, col as i32))
            .filter(|&cell| self.is_open(cell))
            .collect()
    }

    fn moves_from(&self, location: Option<Move>) -> Vec<Move> {
        let Some(location) = location else {
            return self.open_cells();
        };

        self.movement
            .directions()
            .iter()
            .map(|(dr, dc)| Move::new(location.row + dr, location.col + dc))
            .filter(|&cell| self.is_open(cell))
            .collect()
    }

    /// Moves the active player to `m` and hands the turn over
    ///
    /// The move is not checked for legality; callers that accept moves from outside should check
    /// it against [MoveGeneratableGame::get_legal_moves] first.
    pub fn apply_move(&mut self, m: Move) {
        debug_assert!(self.is_open(m), "{m} is not an open cell");

        if let Some(idx) = self.cell_index(m) {
            self.blocked[idx] = true;
        }

        self.locations[self.active.as_index()] = Some(m);
        self.active = !self.active;
        self.move_count += 1;
    }
}

impl PlayerGettableGame for Board {
    type PlayerType = Player;

    fn active_player(&self) -> Player {
        self.active
    }

    fn get_opponent(&self, player: Player) -> Player {
        !player
    }
}

impl MoveGeneratableGame for Board {
    fn get_legal_moves_for(&self, player: Player) -> Vec<Move> {
        self.moves_from(self.locations[player.as_index()])
    }
}

impl ForecastableGame for Board {
    fn forecast_move(&self, m: Move) -> Self {
        let mut next = self.clone();
        next.apply_move(m);
        next
    }
}

impl VictorDeterminableGame for Board {
    fn is_winner(&self, player: Player) -> bool {
        player == self.inactive_player() && !self.has_legal_moves(self.active)
    }

    fn is_loser(&self, player: Player) -> bool {
        player == self.active && !self.has_legal_moves(self.active)
    }
}

impl PositionGettableGame for Board {
    fn get_player_location(&self, player: Player) -> Option<Move> {
        self.locations[player.as_index()]
    }
}

impl DimensionGettableGame for Board {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = (0..self.width).map(|col| format!("{col:^3}")).join(" ");
        writeln!(f, "     {header}")?;

        for row in 0..self.height {
            let cells = (0..self.width)
                .map(|col| {
                    let cell = Move::new(row as i32, col as i32);
                    if self.locations[0] == Some(cell) {
                        '1'
                    } else if self.locations[1] == Some(cell) {
                        '2'
                    } else if self.is_open(cell) {
                        ' '
                    } else {
                        '-'
                    }
                })
                .map(|c| format!(" {c} "))
                .join("|");
            writeln!(f, " {row:>2} |{cells}|")?;
        }

        Ok(())
    }
}
