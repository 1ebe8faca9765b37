//! Static evaluation functions for Isolation positions
//!
//! Every function here scores a position for `player`, higher being better for them. They all
//! check for a decided game first: a lost position is [f64::NEG_INFINITY] and a won one is
//! [f64::INFINITY], whatever the heuristic would have said.
//!
//! Distances are measured to the geometric center of the board, `(height / 2, width / 2)` in
//! real arithmetic, with rows paired with the height and columns with the width.

use std::{fmt::Display, str::FromStr};

use isolation_game_types::types::{
    DimensionGettableGame, Move, MoveGeneratableGame, PositionGettableGame,
    VictorDeterminableGame,
};

use crate::Scorable;

/// The smallest squared distance we ever divide by
///
/// On a board with odd dimensions a player can sit exactly on the center.
pub const MIN_SQUARED_DISTANCE: f64 = 0.5;

fn decided<GameType>(game: &GameType, player: GameType::PlayerType) -> Option<f64>
where
    GameType: VictorDeterminableGame,
{
    if game.is_loser(player) {
        Some(f64::NEG_INFINITY)
    } else if game.is_winner(player) {
        Some(f64::INFINITY)
    } else {
        None
    }
}

fn squared_distance_from_center<GameType>(game: &GameType, cell: Move) -> f64
where
    GameType: DimensionGettableGame,
{
    let center_row = game.height() as f64 / 2.0;
    let center_col = game.width() as f64 / 2.0;

    (cell.row as f64 - center_row).powi(2) + (cell.col as f64 - center_col).powi(2)
}

fn floored_distance<GameType>(game: &GameType, cell: Move) -> f64
where
    GameType: DimensionGettableGame,
{
    squared_distance_from_center(game, cell).max(MIN_SQUARED_DISTANCE)
}

/// Rewards positions whose continuations head for the center
///
/// For every legal move we take the relative change in squared distance to the center,
/// `(after - now) / now`. The best (smallest) change is then mapped through `1 / (1 + x)`. Since
/// distances are floored at [MIN_SQUARED_DISTANCE] the change is always greater than `-1`.
///
/// A player with no legal moves left scores `0.0`, as does one who has not placed themselves
/// yet.
pub fn centrality_score<GameType>(game: &GameType, player: GameType::PlayerType) -> f64
where
    GameType: MoveGeneratableGame
        + VictorDeterminableGame
        + PositionGettableGame
        + DimensionGettableGame,
{
    if let Some(score) = decided(game, player) {
        return score;
    }

    let Some(location) = game.get_player_location(player) else {
        return 0.0;
    };
    let now = floored_distance(game, location);

    let best_change = game
        .get_legal_moves_for(player)
        .into_iter()
        .map(|m| (floored_distance(game, m) - now) / now)
        .fold(f64::INFINITY, f64::min);

    1.0 / (1.0 + best_change)
}

/// `own / opp - opp / own` over the number of legal moves each player has
///
/// Running out of moves is checked before dividing: no moves of our own is [f64::NEG_INFINITY]
/// even if the opponent is stuck too, otherwise a stuck opponent is [f64::INFINITY].
pub fn mobility_ratio_score<GameType>(game: &GameType, player: GameType::PlayerType) -> f64
where
    GameType: MoveGeneratableGame + VictorDeterminableGame,
{
    if let Some(score) = decided(game, player) {
        return score;
    }

    let own_moves = game.get_legal_moves_for(player).len() as f64;
    if own_moves == 0.0 {
        return f64::NEG_INFINITY;
    }

    let opp_moves = game.get_legal_moves_for(game.get_opponent(player)).len() as f64;
    if opp_moves == 0.0 {
        return f64::INFINITY;
    }

    own_moves / opp_moves - opp_moves / own_moves
}

/// The opponent's squared distance from the center over our own
pub fn relative_centrality_score<GameType>(game: &GameType, player: GameType::PlayerType) -> f64
where
    GameType: MoveGeneratableGame
        + VictorDeterminableGame
        + PositionGettableGame
        + DimensionGettableGame,
{
    if let Some(score) = decided(game, player) {
        return score;
    }

    let own = game.get_player_location(player);
    let opp = game.get_player_location(game.get_opponent(player));

    match (own, opp) {
        (Some(own), Some(opp)) => floored_distance(game, opp) / floored_distance(game, own),
        _ => 0.0,
    }
}

/// Zero unless the game is decided. Useful as a baseline and for testing
pub fn null_score<GameType>(game: &GameType, player: GameType::PlayerType) -> f64
where
    GameType: VictorDeterminableGame,
{
    decided(game, player).unwrap_or(0.0)
}

/// The number of legal moves `player` has
pub fn open_move_score<GameType>(game: &GameType, player: GameType::PlayerType) -> f64
where
    GameType: MoveGeneratableGame + VictorDeterminableGame,
{
    if let Some(score) = decided(game, player) {
        return score;
    }

    game.get_legal_moves_for(player).len() as f64
}

/// Our legal move count minus the opponent's
pub fn improved_score<GameType>(game: &GameType, player: GameType::PlayerType) -> f64
where
    GameType: MoveGeneratableGame + VictorDeterminableGame,
{
    if let Some(score) = decided(game, player) {
        return score;
    }

    let own_moves = game.get_legal_moves_for(player).len() as f64;
    let opp_moves = game.get_legal_moves_for(game.get_opponent(player)).len() as f64;

    own_moves - opp_moves
}

/// Our squared distance from the center. Further out scores higher
pub fn center_score<GameType>(game: &GameType, player: GameType::PlayerType) -> f64
where
    GameType: VictorDeterminableGame + PositionGettableGame + DimensionGettableGame,
{
    if let Some(score) = decided(game, player) {
        return score;
    }

    game.get_player_location(player)
        .map_or(0.0, |location| squared_distance_from_center(game, location))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The built in evaluation functions
pub enum EvaluationStrategy {
    /// See [centrality_score]
    Centrality,
    /// See [mobility_ratio_score]
    MobilityRatio,
    /// See [relative_centrality_score]
    RelativeCentrality,
    /// See [null_score]
    Null,
    /// See [open_move_score]
    OpenMove,
    /// See [improved_score]
    Improved,
    /// See [center_score]
    Center,
}

impl EvaluationStrategy {
    /// Every strategy, the three search heuristics first
    pub const ALL: [EvaluationStrategy; 7] = [
        EvaluationStrategy::Centrality,
        EvaluationStrategy::MobilityRatio,
        EvaluationStrategy::RelativeCentrality,
        EvaluationStrategy::Null,
        EvaluationStrategy::OpenMove,
        EvaluationStrategy::Improved,
        EvaluationStrategy::Center,
    ];

    /// The kebab-case name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            EvaluationStrategy::Centrality => "centrality",
            EvaluationStrategy::MobilityRatio => "mobility-ratio",
            EvaluationStrategy::RelativeCentrality => "relative-centrality",
            EvaluationStrategy::Null => "null",
            EvaluationStrategy::OpenMove => "open-move",
            EvaluationStrategy::Improved => "improved",
            EvaluationStrategy::Center => "center",
        }
    }
}

impl<GameType> Scorable<GameType> for EvaluationStrategy
where
    GameType: MoveGeneratableGame
        + VictorDeterminableGame
        + PositionGettableGame
        + DimensionGettableGame,
{
    fn score(&self, game: &GameType, player: GameType::PlayerType) -> f64 {
        match self {
            EvaluationStrategy::Centrality => centrality_score(game, player),
            EvaluationStrategy::MobilityRatio => mobility_ratio_score(game, player),
            EvaluationStrategy::RelativeCentrality => relative_centrality_score(game, player),
            EvaluationStrategy::Null => null_score(game, player),
            EvaluationStrategy::OpenMove => open_move_score(game, player),
            EvaluationStrategy::Improved => improved_score(game, player),
            EvaluationStrategy::Center => center_score(game, player),
        }
    }
}

impl Display for EvaluationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Returned when a name does not match any [EvaluationStrategy]
pub struct UnknownStrategy(pub String);

impl Display for UnknownStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown evaluation strategy `{}`, expected one of: {}",
            self.0,
            itertools::join(EvaluationStrategy::ALL, ", ")
        )
    }
}

impl std::error::Error for UnknownStrategy {}

impl FromStr for EvaluationStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EvaluationStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| UnknownStrategy(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use isolation_game_types::{
        types::{ForecastableGame, PlayerGettableGame},
        wire_representation::Game,
        Board, Movement, Player,
    };

    use super::*;

    fn fixture(json: &str) -> Board {
        let game: Game = serde_json::from_str(json).unwrap();
        Board::try_from(game).unwrap()
    }

    fn board(game: Game) -> Board {
        Board::try_from(game).unwrap()
    }

    #[test]
    fn test_decided_positions_score_infinite_for_every_strategy() {
        let board = fixture(include_str!("../../isolation-game-types/fixtures/no_moves.json"));
        assert_eq!(board.active_player(), Player::First);

        for strategy in EvaluationStrategy::ALL {
            assert_eq!(
                strategy.score(&board, Player::First),
                f64::NEG_INFINITY,
                "{strategy}"
            );
            assert_eq!(
                strategy.score(&board, Player::Second),
                f64::INFINITY,
                "{strategy}"
            );
        }
    }

    #[test]
    fn test_mobility_checks_own_moves_before_opponent_moves() {
        // Second is to move and can still step right, First is walled in
        let board = board(Game {
            width: 4,
            height: 1,
            movement: Movement::King,
            active_player: Player::Second,
            first: Some(Move::new(0, 0)),
            second: Some(Move::new(0, 1)),
            blocked: vec![Move::new(0, 0), Move::new(0, 1)],
        });
        assert!(!board.is_loser(Player::First));

        assert_eq!(mobility_ratio_score(&board, Player::First), f64::NEG_INFINITY);
        assert_eq!(mobility_ratio_score(&board, Player::Second), f64::INFINITY);
    }

    #[test]
    fn test_mobility_ratio_is_antisymmetric() {
        let board = fixture(include_str!("../../isolation-game-types/fixtures/mid_game.json"));
        let own = board.get_legal_moves_for(Player::First).len() as f64;
        let opp = board.get_legal_moves_for(Player::Second).len() as f64;

        let first = mobility_ratio_score(&board, Player::First);
        let second = mobility_ratio_score(&board, Player::Second);

        assert_eq!(first, own / opp - opp / own);
        assert_eq!(first, -second);
    }

    #[test]
    fn test_centrality_prefers_the_edges_over_the_corner() {
        // A 3x3 board where First has just placed itself in the middle
        let start = board(Game {
            width: 3,
            height: 3,
            movement: Movement::King,
            active_player: Player::First,
            first: Some(Move::new(1, 1)),
            second: None,
            blocked: vec![Move::new(1, 1)],
        });

        let score_after = |m: Move| centrality_score(&start.forecast_move(m), Player::First);

        let corner = score_after(Move::new(0, 0));
        let top = score_after(Move::new(0, 1));
        let left = score_after(Move::new(1, 0));

        assert!((corner - 1.8).abs() < 1e-9, "{corner}");
        assert!((top - 5.0).abs() < 1e-9, "{top}");
        assert_eq!(top, left);
        assert!(corner < top);
    }

    #[test]
    fn test_location_less_players_score_neutral() {
        let board = fixture(include_str!(
            "../../isolation-game-types/fixtures/start_of_game.json"
        ));

        assert_eq!(centrality_score(&board, Player::First), 0.0);
        assert_eq!(relative_centrality_score(&board, Player::First), 0.0);
        assert_eq!(center_score(&board, Player::First), 0.0);
        assert_eq!(open_move_score(&board, Player::First), 49.0);
        assert_eq!(improved_score(&board, Player::First), 0.0);
    }

    #[test]
    fn test_relative_centrality() {
        let mut board = Board::new(7, 7);
        board.apply_move(Move::new(3, 3));
        board.apply_move(Move::new(0, 0));

        // First sits half a cell from the center in each direction, Second at the far corner
        assert_eq!(relative_centrality_score(&board, Player::First), 24.5 / 0.5);
        assert_eq!(relative_centrality_score(&board, Player::Second), 0.5 / 24.5);
        assert_eq!(center_score(&board, Player::Second), 24.5);
    }

    #[test]
    fn test_move_count_baselines() {
        let board = fixture(include_str!("../../isolation-game-types/fixtures/mid_game.json"));
        let own = board.get_legal_moves_for(Player::First).len() as f64;
        let opp = board.get_legal_moves_for(Player::Second).len() as f64;

        assert_eq!(null_score(&board, Player::First), 0.0);
        assert_eq!(open_move_score(&board, Player::First), own);
        assert_eq!(improved_score(&board, Player::First), own - opp);
    }

    #[test]
    fn test_strategy_names_round_trip() {
        for strategy in EvaluationStrategy::ALL {
            assert_eq!(strategy.to_string().parse::<EvaluationStrategy>(), Ok(strategy));
        }

        assert_eq!(
            "sideways".parse::<EvaluationStrategy>(),
            Err(UnknownStrategy("sideways".to_owned()))
        );
    }

    #[test]
    fn test_plain_functions_are_scorable() {
        let board = fixture(include_str!("../../isolation-game-types/fixtures/mid_game.json"));

        assert_eq!(
            Scorable::score(&improved_score::<Board>, &board, Player::First),
            EvaluationStrategy::Improved.score(&board, Player::First),
        );
    }
}
