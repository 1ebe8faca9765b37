use isolation_game_types::types::PlayerGettableGame;

/// This trait is used to control something that can return a score from a game board
///
/// Scores are from the point of view of `player`, higher is better for them. Positions that
/// `player` has already lost should score [f64::NEG_INFINITY] and positions they have won
/// [f64::INFINITY].
pub trait Scorable<GameType: PlayerGettableGame> {
    /// Score the given game for `player`
    fn score(&self, game: &GameType, player: GameType::PlayerType) -> f64;
}

impl<GameType, FnLike> Scorable<GameType> for FnLike
where
    GameType: PlayerGettableGame,
    FnLike: Fn(&GameType, GameType::PlayerType) -> f64,
{
    fn score(&self, game: &GameType, player: GameType::PlayerType) -> f64 {
        (self)(game, player)
    }
}
