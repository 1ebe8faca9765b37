use color_eyre::eyre::Result;
use isolation_game_types::Player;
use itertools::Itertools;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    contestants::ContestantSpec,
    referee::{play_match, random_opening},
};

use super::{BoardArgs, SearchArgs};

#[derive(clap::Args, Debug)]
pub(crate) struct Play {
    /// Contestant playing first, e.g. `ab:improved`
    #[clap(value_parser)]
    first: ContestantSpec,

    /// Contestant playing second, e.g. `random`
    #[clap(value_parser)]
    second: ContestantSpec,

    /// Start from a random two move opening instead of an empty board
    #[clap(long)]
    random_opening: bool,

    /// Seed for the random opening and random contestants
    #[clap(long, value_parser)]
    seed: Option<u64>,

    #[clap(flatten)]
    board: BoardArgs,

    #[clap(flatten)]
    search: SearchArgs,
}

impl Play {
    pub(crate) fn run(self) -> Result<()> {
        let seed = self.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);

        let options = self.search.agent_options();
        let mut first = self.first.build(options, rng.gen());
        let mut second = self.second.build(options, rng.gen());

        let board = if self.random_opening {
            random_opening(&self.board.board(), &mut rng)
        } else {
            self.board.board()
        };

        println!("{} vs {} (seed {seed})", first.name(), second.name());
        println!("{board}");

        let result = play_match(
            board,
            first.as_mut(),
            second.as_mut(),
            self.search.time_limit(),
        );

        println!("Moves: {}", result.history.iter().join(", "));
        println!("{}", result.final_board);

        let (winner, loser) = match result.winner {
            Player::First => (first.name(), second.name()),
            Player::Second => (second.name(), first.name()),
        };
        println!(
            "{} ({winner}) wins after {} moves, {loser} {}",
            result.winner,
            result.history.len(),
            result.outcome
        );

        Ok(())
    }
}
